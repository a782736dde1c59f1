//! TOML configuration file
//!
//! ```toml
//! [export]
//! enabled_outputs = ["pricebook", "square"]
//! output_dir = "/srv/export"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! file = "none"
//!
//! [settings]
//! path = "/var/lib/catexport/settings.toml"
//! group = "catexport"
//!
//! [data]
//! file = "stock.json"
//! table_prefix = "0_"
//! ```

use crate::core::error_handling::ContextualError;
use crate::factory::DEFAULT_GROUP;
use crate::settings::ConfigMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const APP_DIR: &str = "catexport";
pub const CONFIG_FILE_NAME: &str = "catexport.toml";

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("The specified configuration file does not exist: {path}")]
    Missing { path: PathBuf },

    #[error("Error reading configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ContextualError for ConfigFileError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Persisted configuration store; in-memory when absent
    pub path: Option<PathBuf>,
    /// Grouping identifier under which handler settings are persisted
    pub group: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: None,
            group: DEFAULT_GROUP.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON file of tables loaded into the in-memory data access
    pub file: Option<PathBuf>,
    pub table_prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct RawFileConfig {
    export: toml::Table,
    logging: LoggingConfig,
    settings: SettingsConfig,
    data: DataConfig,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    /// Global export configuration, nested tables flattened to dotted keys
    pub export: ConfigMap,
    pub logging: LoggingConfig,
    pub settings: SettingsConfig,
    pub data: DataConfig,
    /// File the configuration came from, if any
    pub source: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigFileError> {
        let raw: RawFileConfig = toml::from_str(contents).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            export: ConfigMap::from_toml(&raw.export),
            logging: raw.logging,
            settings: raw.settings,
            data: raw.data,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load `explicit` (which must exist), else the default file if present,
    /// else an empty configuration
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigFileError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigFileError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigFileError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents, &path)
    }
}
