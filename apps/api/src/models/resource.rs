use serde::{Deserialize, Serialize};

/// A named social-service organization, taken either from the static demo
/// catalog or from a places-search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub next_steps: Option<String>,
    /// Places results only.
    pub rating: Option<f32>,
}

impl Resource {
    /// Builds a fully populated catalog entry.
    pub fn listed(name: &str, address: &str, phone: &str, hours: &str, next_steps: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            phone: Some(phone.to_string()),
            hours: Some(hours.to_string()),
            next_steps: Some(next_steps.to_string()),
            rating: None,
        }
    }
}
