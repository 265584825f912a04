use serde::Deserialize;

/// Static client configuration.
///
/// Auth-prefixed endpoints are routed to `auth_url`, everything else to
/// `base_url`. Neither is negotiated at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_url: String,
    /// Per-request deadline in milliseconds.
    pub timeout_ms: u64,
    /// Where the durable session file lives.
    pub session_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fintrack-api-czav.onrender.com/api".to_string(),
            auth_url: "https://fintrack-api-czav.onrender.com/api/auth".to_string(),
            timeout_ms: 10_000,
            session_path: "config/fintrack_session.json".to_string(),
        }
    }
}
