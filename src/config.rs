use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Carescribe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clinic API base URL when `CARESCRIBE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout for clinic API calls, in seconds.
pub const API_TIMEOUT_SECS: u64 = 30;

/// Resolve the clinic API base URL from the environment.
pub fn api_base_url() -> String {
    env::var("CARESCRIBE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
