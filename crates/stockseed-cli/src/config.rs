use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockseed_core::{DEFAULT_PORT, DatabaseConfig, Error as CoreError};
use stockseed_generate::{FlatOptions, StructuredOptions};

/// Checked before [`FALLBACK_DATABASE_URL_ENV`].
pub const DATABASE_URL_ENV: &str = "STOCKSEED_DATABASE_URL";
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Database(#[from] CoreError),
    #[error(
        "no database configured: pass --database-url, set STOCKSEED_DATABASE_URL or DATABASE_URL, or add a [database] section"
    )]
    MissingDatabase,
}

/// Contents of a `stockseed.toml` file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub database: DatabaseSection,
    pub structured: StructuredOptions,
    pub flat: FlatOptions,
}

/// `[database]`: either `url` or discrete fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl DatabaseSection {
    fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.user.is_none()
            && self.password.is_none()
            && self.database.is_none()
    }

    fn to_config(&self) -> Result<DatabaseConfig, ConfigError> {
        if let Some(url) = &self.url {
            return Ok(DatabaseConfig::from_url(url)?);
        }
        let config = DatabaseConfig::new(
            self.host.clone().unwrap_or_else(|| "localhost".to_string()),
            self.port.unwrap_or(DEFAULT_PORT),
            self.user.clone().unwrap_or_default(),
            self.password.clone(),
            self.database.clone().unwrap_or_default(),
        )?;
        Ok(config)
    }
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Pick the connection settings: flag, then environment, then file.
pub fn resolve_database<E>(
    flag: Option<&str>,
    env: E,
    file: &DatabaseSection,
) -> Result<DatabaseConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(url) = flag {
        return Ok(DatabaseConfig::from_url(url)?);
    }
    let from_env = [DATABASE_URL_ENV, FALLBACK_DATABASE_URL_ENV]
        .into_iter()
        .filter_map(|key| env(key))
        .find(|value| !value.trim().is_empty());
    if let Some(url) = from_env {
        return Ok(DatabaseConfig::from_url(&url)?);
    }
    if file.is_empty() {
        return Err(ConfigError::MissingDatabase);
    }
    file.to_config()
}
