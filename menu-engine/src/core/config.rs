/// Engine configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | MENU_STORE_URL | http://localhost:54321 | Base URL of the remote store |
/// | MENU_STORE_API_KEY | (empty) | Store API key, also sent as bearer token |
/// | REQUEST_TIMEOUT_MS | 30000 | Store request timeout (milliseconds) |
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote store
    pub store_url: String,
    /// API key for the store (empty for a local unauthenticated store)
    pub store_api_key: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            store_url: std::env::var("MENU_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:54321".into()),
            store_api_key: std::env::var("MENU_STORE_API_KEY").unwrap_or_default(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
        }
    }

    /// Build a configuration with explicit store coordinates
    ///
    /// Common in tests and embedding code that does not read the
    /// environment.
    pub fn new(store_url: impl Into<String>, store_api_key: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            store_api_key: store_api_key.into(),
            request_timeout_ms: 30_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
