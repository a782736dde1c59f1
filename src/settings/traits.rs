use super::error::SettingsResult;
use super::map::{ConfigMap, ConfigValue};

/// Persisted key/value configuration store.
///
/// The export subsystem treats it as opaque: keys are never interpreted
/// beyond prefix filtering.
pub trait ConfigurationManager: Send + Sync {
    fn get(&self, key: &str) -> SettingsResult<Option<ConfigValue>>;

    fn set(&self, key: &str, value: ConfigValue) -> SettingsResult<()>;

    /// Returns whether the key existed
    fn delete(&self, key: &str) -> SettingsResult<bool>;

    fn all(&self) -> SettingsResult<ConfigMap>;

    /// Value for `key`, or `default` when missing or unreadable
    fn get_or(&self, key: &str, default: ConfigValue) -> ConfigValue {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Configuration store read of '{}' failed: {}", key, e);
                default
            }
        }
    }

    /// Every entry under `prefix`, with the prefix removed
    fn with_prefix(&self, prefix: &str) -> SettingsResult<ConfigMap> {
        Ok(self.all()?.strip_prefix(prefix))
    }
}
