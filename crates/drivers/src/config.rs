use std::fs;
use std::path::{Path, PathBuf};

use privata_adapters::fs::{DEFAULT_FULL_SIZE_MAX, DEFAULT_THUMBNAIL_MAX};
use privata_application::DEFAULT_ADMIN_PASSWORD;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "privata.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data_path: String,
    pub cache_dir: String,
    pub identity_path: String,
    pub export_dir: String,
    pub admin_password: String,
    pub full_size_max: u32,
    pub thumbnail_max: u32,
    /// Keep galleries and ratings in memory for this process only.
    pub ephemeral: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: "privata.sqlite3".to_string(),
            cache_dir: "cache".to_string(),
            identity_path: ".privata-viewer".to_string(),
            export_dir: ".".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            full_size_max: DEFAULT_FULL_SIZE_MAX,
            thumbnail_max: DEFAULT_THUMBNAIL_MAX,
            ephemeral: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl AppConfig {
    /// An explicit path must exist. Without one, `privata.toml` in the
    /// working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
