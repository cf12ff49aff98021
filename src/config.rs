//! TOML configuration for the command line tool.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sql::Dialect;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown SQL dialect '{0}'")]
    UnknownDialect(String),
}

/// Settings stored in a `cableschema.toml` file.
///
/// Every key is optional; missing ones take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file.
    pub database: PathBuf,
    /// Dialect used to render SQL scripts.
    pub dialect: String,
    /// Enforce foreign keys on the SQLite connection.
    pub foreign_keys: bool,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("cablelist.sqlite"),
            dialect: Dialect::default().name().to_string(),
            foreign_keys: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.dialect()?;
        Ok(config)
    }

    pub fn dialect(&self) -> Result<Dialect, ConfigError> {
        Dialect::from_str(&self.dialect).ok_or_else(|| ConfigError::UnknownDialect(self.dialect.clone()))
    }
}
