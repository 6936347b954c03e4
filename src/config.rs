//! Environment-derived configuration, grouped per concern.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Listening address. HOST and PORT are required; starting without them is
/// a configuration error, not something to paper over with defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let host = host.ok_or(ConfigError::MissingVar("HOST"))?;
        let port = port.ok_or(ConfigError::MissingVar("PORT"))?;
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidVar {
            var: "PORT",
            value: port.clone(),
            reason: "expected a TCP port number".to_string(),
        })?;
        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub uri: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            uri: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "b_blog".to_string()),
        }
    }
}
