//! Configuration values and the persisted configuration manager
//!
//! [`ConfigMap`] is the opaque key/value map that flows from the
//! orchestrator through the factory into each handler. The
//! [`ConfigurationManager`] trait is the persisted store behind it; the
//! crate ships an in-memory store and a TOML-file store.

mod error;
mod map;
mod memory;
mod toml_store;
mod traits;

pub use error::{SettingsError, SettingsResult};
pub use map::{ConfigMap, ConfigValue};
pub use memory::MemoryConfigStore;
pub use toml_store::TomlConfigStore;
pub use traits::ConfigurationManager;
