use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Full store payload for create and full-replace update. Missing string
/// fields deserialize to empty strings and fail validation as "required";
/// a missing `is_active` falls back to the active default.
#[derive(Debug, Clone, Deserialize)]
pub struct StorePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial payload for PATCH: only present fields are validated and applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}
