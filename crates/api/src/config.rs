use axum::http::HeaderValue;
use simflow_core::config::{self, ConfigError};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Built once at
/// startup and shared read-only through [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for in-flight simulation runs (default: `30`).
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8080`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = config::or_default("HOST", "0.0.0.0");
        let port = config::parse_or("PORT", 8080)?;
        let cors_origins =
            parse_origins(&config::or_default("CORS_ORIGINS", "http://localhost:5173"))?;
        let request_timeout_secs = config::parse_or("REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs = config::parse_or("SHUTDOWN_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
        })
    }
}

/// Parse a comma-separated origin list. An invalid origin is a startup
/// error rather than a silently dropped entry.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    config::split_list(raw)
        .into_iter()
        .map(|origin| config::parse_value::<HeaderValue>("CORS_ORIGINS", &origin))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:5173, https://sims.example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://sims.example.com");
    }

    #[test]
    fn parse_origins_rejects_invalid_header_value() {
        let err = parse_origins("http://ok.example.com,bad\norigin").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "CORS_ORIGINS", .. }));
    }
}
