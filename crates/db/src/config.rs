use simflow_core::config::{self, ConfigError};

/// Database connection settings, read once at startup.
///
/// | Env Var                   | Default    |
/// |---------------------------|------------|
/// | `DATABASE_URL`            | (required) |
/// | `DB_MAX_CONNECTIONS`      | `20`       |
/// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`        |
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: config::require("DATABASE_URL")?,
            max_connections: config::parse_or("DB_MAX_CONNECTIONS", 20)?,
            acquire_timeout_secs: config::parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        })
    }
}
