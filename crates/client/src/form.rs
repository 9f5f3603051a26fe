use serde::Deserialize;

/// One form (event listing), from GET `/forms/{id}`. Only the slice the
/// inventory flow needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    pub id: u64,
    pub name: String,
    /// Public URL path; absent for unpublished and archived forms.
    #[serde(default)]
    pub published_path: Option<String>,
}

impl FormInfo {
    /// Only published forms answer the inventory endpoint.
    pub fn published(&self) -> bool {
        self.published_path.is_some()
    }
}
