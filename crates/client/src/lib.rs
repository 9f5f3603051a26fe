//! `housecount-client`: blocking Webconnex public API client.
//!
//! Minimal read-only surface for the inventory flow: form metadata and the
//! inventory report, decoded into `housecount-engine` records.

pub mod client;
pub mod form;

pub use client::{ClientError, WebconnexClient};
pub use form::FormInfo;
