use super::error::{SettingsError, SettingsResult};
use super::map::{ConfigMap, ConfigValue};
use super::traits::ConfigurationManager;
use std::sync::RwLock;

/// Process-local configuration store
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: RwLock<ConfigMap>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: ConfigMap) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

fn poisoned() -> SettingsError {
    SettingsError::Unavailable("configuration store lock poisoned".to_string())
}

impl ConfigurationManager for MemoryConfigStore {
    fn get(&self, key: &str) -> SettingsResult<Option<ConfigValue>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: ConfigValue) -> SettingsResult<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> SettingsResult<bool> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        Ok(values.remove(key).is_some())
    }

    fn all(&self) -> SettingsResult<ConfigMap> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.clone())
    }
}
