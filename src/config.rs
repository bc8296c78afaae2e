//! App Configuration
//!
//! Values baked in at build time (e.g. `GROCERY_API_BASE=/api trunk build`).

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_HUB: &str = "dataHub";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix for every backend path
    pub api_base: String,
    /// Sent as `X-Auth-Token` when present
    pub auth_token: Option<String>,
    /// Name of the notification channel
    pub hub_channel: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            auth_token: None,
            hub_channel: DEFAULT_HUB.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: option_env!("GROCERY_API_BASE").unwrap_or(DEFAULT_API_BASE).to_string(),
            auth_token: option_env!("GROCERY_AUTH_TOKEN").map(str::to_string),
            hub_channel: option_env!("GROCERY_HUB").unwrap_or(DEFAULT_HUB).to_string(),
        }
    }

    /// Join `api_base` and a resource path with exactly one `/`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
