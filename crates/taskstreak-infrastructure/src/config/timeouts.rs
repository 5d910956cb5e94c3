use std::time::Duration;

/// Configuration for various timeout durations across the application
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// HTTP request timeout for document store calls
    pub http_request: Duration,

    /// HTTP connect timeout for document store calls
    pub http_connect: Duration,

    /// Time to wait for a pooled SQLite connection
    pub db_acquire: Duration,

    /// Access tokens are refreshed this long before they expire
    pub token_refresh_margin: Duration,
}

impl TimeoutConfig {
    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

/// Global timeout configuration instance
static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    http_request: Duration::from_secs(30),
    http_connect: Duration::from_secs(10),
    db_acquire: Duration::from_secs(10),
    token_refresh_margin: Duration::from_secs(60),
};
