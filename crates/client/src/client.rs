//! Webconnex public API HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Read-only: fetch a
//! form's metadata, fetch its inventory report.

use std::time::Duration;

use housecount_engine::RawRecord;
use serde::Deserialize;

use crate::form::FormInfo;

const WEBCONNEX_API_BASE: &str = "https://api.webconnex.com/v2/public";

/// Webconnex API client (blocking). Auth is the `apiKey` request header.
#[derive(Clone, Debug)]
pub struct WebconnexClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
}

/// Error type for API operations.
#[derive(Debug)]
pub enum ClientError {
    /// No API key configured
    MissingApiKey,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::MissingApiKey => {
                write!(f, "missing Webconnex API key (set WEBCONNEX_API_KEY)")
            }
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// Every endpoint wraps its payload in a `data` envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

impl WebconnexClient {
    /// Create a client for the production API.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, WEBCONNEX_API_BASE.to_string())
    }

    /// Create a client against an explicit base URL (tests).
    pub fn with_base_url(api_key: String, api_base: String) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("housecount/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base,
            api_key,
        }
    }

    /// Create a client from the `WEBCONNEX_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ClientError> {
        let key = std::env::var("WEBCONNEX_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ClientError::MissingApiKey)?;
        Ok(Self::new(key))
    }

    /// Fetch one form's metadata.
    pub fn form(&self, form_id: u64) -> Result<FormInfo, ClientError> {
        let url = format!("{}/forms/{}", self.api_base, form_id);
        let resp = self.get(&url)?;
        let envelope: Envelope<FormInfo> =
            resp.json().map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Fetch one form's full inventory report, ready for classification.
    ///
    /// The upstream rejects this endpoint for unpublished forms; that
    /// surfaces here as `ClientError::Http` for the whole fetch. Check
    /// `FormInfo::published` first to tell the cases apart.
    pub fn inventory(&self, form_id: u64) -> Result<Vec<RawRecord>, ClientError> {
        let url = format!("{}/forms/{}/inventory", self.api_base, form_id);
        let resp = self.get(&url)?;
        let envelope: Envelope<Vec<RawRecord>> =
            resp.json().map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ClientError> {
        let response = self
            .http
            .get(url)
            .header("apiKey", &self.api_key)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status, body));
        }

        Ok(response)
    }
}
