//! HTTP server configuration

use axum::http::HeaderValue;
use moveops_core::error::{AppError, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `MOVEOPS_CORS_ORIGINS`
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec![DEFAULT_CORS_ORIGINS.to_string()],
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `MOVEOPS_HOST`                 | `127.0.0.1`             |
    /// | `MOVEOPS_PORT`                 | `8080`                  |
    /// | `MOVEOPS_CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `MOVEOPS_REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("MOVEOPS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("MOVEOPS_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Config(format!("MOVEOPS_PORT must be a valid port, got {:?}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins: Vec<String> = lookup("MOVEOPS_CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| {
                AppError::Config(format!("Invalid CORS origin '{}': {}", origin, e))
            })?;
        }

        let request_timeout_secs = match lookup("MOVEOPS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(AppError::Config(format!(
                        "MOVEOPS_REQUEST_TIMEOUT_SECS must be a positive integer, got {:?}",
                        raw
                    )))
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }

    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
