//! Daemon configuration (environment, optionally seeded from `.env`)

use anyhow::{bail, Context, Result};
use moveops_api_http::ServerConfig;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "~/.moveops/moveops.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// SQLite file path, or a full `sqlite:` URL
    pub database: String,
    pub log_format: LogFormat,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<PathBuf>,
    /// Load demo deals/employees/materials into an empty database
    pub seed_demo: bool,
    pub server: ServerConfig,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = match lookup("MOVEOPS_DB_PATH") {
            Some(url) if url.starts_with("sqlite:") => url,
            Some(path) => shellexpand::tilde(&path).into_owned(),
            None => shellexpand::tilde(DEFAULT_DB_PATH).into_owned(),
        };

        let log_format = match lookup("MOVEOPS_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("MOVEOPS_LOG_FORMAT must be 'pretty' or 'json', got {:?}", other),
        };

        let log_dir = lookup("MOVEOPS_LOG_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned()));

        let seed_demo = match lookup("MOVEOPS_SEED_DEMO").as_deref() {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => bail!("MOVEOPS_SEED_DEMO must be true or false, got {:?}", other),
        };

        let server = ServerConfig::from_lookup(&lookup).context("Invalid server configuration")?;

        Ok(Self {
            database,
            log_format,
            log_dir,
            seed_demo,
            server,
        })
    }

    /// Create the parent directory of a file database
    pub fn prepare_storage(&self) -> Result<()> {
        if self.database.starts_with("sqlite:") {
            return Ok(());
        }
        if let Some(parent) = PathBuf::from(&self.database).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create {}", parent.display()))?;
            }
        }
        Ok(())
    }
}
