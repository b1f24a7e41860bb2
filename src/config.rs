/// Application-level constants
pub const APP_NAME: &str = "Sonde";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default query window when the caller gives no explicit date range.
pub const DEFAULT_DATE_WINDOW_DAYS: i64 = 30;

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Backend connection settings for the analytics API client.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the analytics backend, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Default query window in days.
    pub date_window_days: i64,
}

impl EngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let raw: String = base_url.into();
        Self {
            base_url: raw.trim_end_matches('/').to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            date_window_days: DEFAULT_DATE_WINDOW_DAYS,
        }
    }
}
