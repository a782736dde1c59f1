//! Configuration store persisted as a flat TOML file
//!
//! Nested tables are flattened to dotted keys on load; writes store every
//! key at the top level, so the file round-trips through [`ConfigMap`].

use super::error::{SettingsError, SettingsResult};
use super::map::{ConfigMap, ConfigValue};
use super::traits::ConfigurationManager;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    values: RwLock<ConfigMap>,
}

impl TomlConfigStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
                path: path.clone(),
                source,
            })?;
            let table = contents
                .parse::<toml::Table>()
                .map_err(|e| SettingsError::Malformed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            ConfigMap::from_toml(&table)
        } else {
            ConfigMap::new()
        };

        log::debug!(
            "Opened configuration store {} with {} keys",
            path.display(),
            values.len()
        );

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &ConfigMap) -> SettingsResult<()> {
        let contents = toml::to_string(values).map_err(|e| SettingsError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, contents).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn poisoned() -> SettingsError {
    SettingsError::Unavailable("configuration store lock poisoned".to_string())
}

impl ConfigurationManager for TomlConfigStore {
    fn get(&self, key: &str) -> SettingsResult<Option<ConfigValue>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: ConfigValue) -> SettingsResult<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key, value);
        self.persist(&values)
    }

    fn delete(&self, key: &str) -> SettingsResult<bool> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        let existed = values.remove(key).is_some();
        if existed {
            self.persist(&values)?;
        }
        Ok(existed)
    }

    fn all(&self) -> SettingsResult<ConfigMap> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.clone())
    }
}
