//! Server configuration from the process environment

/// Placeholder value some deployments ship instead of a real key.
/// Treated the same as an unset credential.
const PLACEHOLDER_KEY: &str = "your-api-key-here";

const DEFAULT_API_BASE: &str = "https://api.deepseek.com";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_PORT: u16 = 8000;

/// Relay server configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Provider API credential. No hardcoded fallback: requests fail
    /// closed with a configuration error while this is unset.
    pub api_key: Option<String>,
    /// Provider base address, e.g. `https://api.deepseek.com`
    pub api_base: String,
    /// Model identifier sent on every completion request
    pub model: String,
    /// Port the relay server listens on
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RELAYCHAT_API_KEY").ok(),
            api_base: std::env::var("RELAYCHAT_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: std::env::var("RELAYCHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: std::env::var("RELAYCHAT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// The credential, if one is actually usable.
    ///
    /// Unset, empty, and the well-known placeholder all count as
    /// missing so a misconfigured deployment never reaches the
    /// provider with a bogus key.
    pub fn credential(&self) -> Option<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_KEY => Some(key),
            _ => None,
        }
    }
}
