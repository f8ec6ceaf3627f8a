use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATA_DIR | ./data | Embedded store directory |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| production |
/// | STAFF_USERNAME | admin | Staff console login name |
/// | STAFF_PASSWORD_HASH | (unset) | Argon2 hash; login disabled when unset |
/// | LINE_CHANNEL_TOKEN | (unset) | Chat push credential; push degrades to no-op when unset |
/// | LINE_PUSH_ENDPOINT | https://api.line.me/v2/bot/message/push | Push endpoint |
/// | JWT_SECRET | (generated) | Staff token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Staff token lifetime |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/var/lib/wok HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the embedded document store
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | production
    pub environment: String,
    /// JWT configuration for staff sessions
    pub jwt: JwtConfig,
    /// Staff console login name
    pub staff_username: String,
    /// Argon2 hash of the staff password; staff login is disabled when unset
    pub staff_password_hash: Option<String>,
    /// Chat-platform push credential; absence degrades push to a no-op
    pub line_channel_token: Option<String>,
    /// Chat-platform push endpoint
    pub line_push_endpoint: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            staff_username: std::env::var("STAFF_USERNAME").unwrap_or_else(|_| "admin".into()),
            staff_password_hash: std::env::var("STAFF_PASSWORD_HASH").ok(),
            line_channel_token: std::env::var("LINE_CHANNEL_TOKEN").ok(),
            line_push_endpoint: std::env::var("LINE_PUSH_ENDPOINT")
                .unwrap_or_else(|_| "https://api.line.me/v2/bot/message/push".into()),
        }
    }

    /// Override data dir and port; used by tests
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }
}
