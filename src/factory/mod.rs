//! Handler Factory
//!
//! Turns a handler name into a constructed, configured instance: catalog
//! lookup, type resolution, construction with a [`HandlerContext`],
//! data-access injection and configuration.

use crate::data::DataAccess;
use crate::discovery::{DiscoveredHandler, DiscoveryService};
use crate::handler::{
    ConfigSchema, HandlerContext, HandlerError, HandlerResult, OutputHandler, ValidationReport,
};
use crate::settings::{ConfigMap, ConfigurationManager};
use serde::Serialize;
use std::sync::Arc;

/// Default grouping identifier for persisted handler settings
pub const DEFAULT_GROUP: &str = "catexport";

/// A constructed handler together with the name it was requested by
pub type NamedHandler = (String, Box<dyn OutputHandler>);

/// Readiness of one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerStatus {
    pub name: String,
    pub title: String,
    pub category: String,
    pub priority: i32,
    pub requires_config: bool,
    /// `status()` of the configured instance, empty when construction failed
    pub status: String,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HandlerFactory {
    discovery: Arc<DiscoveryService>,
    data_access: Option<Arc<dyn DataAccess>>,
    config: ConfigMap,
    group: String,
    settings: Option<Arc<dyn ConfigurationManager>>,
}

impl std::fmt::Debug for HandlerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFactory")
            .field("group", &self.group)
            .field("config", &self.config)
            .field("data_access", &self.data_access.is_some())
            .field("settings", &self.settings.is_some())
            .finish()
    }
}

impl HandlerFactory {
    pub fn new(discovery: Arc<DiscoveryService>) -> Self {
        Self {
            discovery,
            data_access: None,
            config: ConfigMap::new(),
            group: DEFAULT_GROUP.to_string(),
            settings: None,
        }
    }

    pub fn with_data_access(mut self, data_access: Arc<dyn DataAccess>) -> Self {
        self.data_access = Some(data_access);
        self
    }

    /// Global configuration applied to every handler this factory builds
    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }

    pub fn with_settings(mut self, settings: Arc<dyn ConfigurationManager>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn discovery(&self) -> &Arc<DiscoveryService> {
        &self.discovery
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    pub fn settings(&self) -> Option<&Arc<dyn ConfigurationManager>> {
        self.settings.as_ref()
    }

    fn context(&self) -> HandlerContext {
        let ctx = HandlerContext::new(&self.group);
        match &self.settings {
            Some(settings) => ctx.with_settings(settings.clone()),
            None => ctx,
        }
    }

    fn lookup(&self, name: &str) -> HandlerResult<DiscoveredHandler> {
        self.discovery
            .find_by_name(name)?
            .ok_or_else(|| HandlerError::NotFound {
                name: name.to_string(),
            })
    }

    /// Construct and inject, without applying configuration
    fn build(&self, entry: &DiscoveredHandler) -> HandlerResult<Box<dyn OutputHandler>> {
        let descriptor = &entry.descriptor;
        let constructor = match descriptor.constructor {
            Some(constructor) if (descriptor.is_available)() => constructor,
            _ => {
                return Err(HandlerError::TypeUnavailable {
                    name: entry.metadata.name.clone(),
                    type_name: entry.type_name.clone(),
                })
            }
        };

        let mut handler = constructor(&self.context())?;
        if let Some(data_access) = &self.data_access {
            handler.set_data_access(data_access.clone());
        }
        Ok(handler)
    }

    /// Build the handler registered as `name` and configure it with the
    /// global configuration overlaid by `per_call`
    pub fn create_handler(
        &self,
        name: &str,
        per_call: &ConfigMap,
    ) -> HandlerResult<Box<dyn OutputHandler>> {
        let entry = self.lookup(name)?;
        let mut handler = self.build(&entry)?;
        handler.apply_config(&self.config.merged(per_call))?;
        log::debug!("Created handler '{}' ({})", name, entry.type_name);
        Ok(handler)
    }

    /// Build every name in order; failures are logged and skipped
    pub fn create_handlers<S: AsRef<str>>(&self, names: &[S], config: &ConfigMap) -> Vec<NamedHandler> {
        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                match self.create_handler(name, config) {
                    Ok(handler) => Some((name.to_string(), handler)),
                    Err(e) => {
                        log::warn!("Skipping handler '{}': {}", name, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Build every discovered handler outside `exclude_categories`, in
    /// catalog order
    pub fn create_all_handlers<S: AsRef<str>>(
        &self,
        config: &ConfigMap,
        exclude_categories: &[S],
    ) -> HandlerResult<Vec<NamedHandler>> {
        let names: Vec<String> = self
            .discovery
            .discover(false)?
            .iter()
            .filter(|entry| {
                !exclude_categories
                    .iter()
                    .any(|c| c.as_ref() == entry.metadata.category)
            })
            .map(|entry| entry.metadata.name.clone())
            .collect();
        Ok(self.create_handlers(&names, config))
    }

    pub fn handler_config_schema(&self, name: &str) -> HandlerResult<ConfigSchema> {
        let entry = self.lookup(name)?;
        Ok(self.build(&entry)?.configuration_schema())
    }

    /// Validation of `config` as `name` would see it. Lookup or
    /// construction problems are reported, not raised.
    pub fn validate_handler_config(&self, name: &str, config: &ConfigMap) -> ValidationReport {
        match self.create_handler(name, config) {
            Ok(handler) => handler.validate_configuration(),
            Err(e) => ValidationReport::failed(e.to_string()),
        }
    }

    /// Status of every catalog entry under the global configuration
    pub fn handler_statuses(&self) -> HandlerResult<Vec<HandlerStatus>> {
        self.handler_statuses_with(&ConfigMap::new())
    }

    pub fn handler_statuses_with(&self, config: &ConfigMap) -> HandlerResult<Vec<HandlerStatus>> {
        let catalog = self.discovery.discover(false)?;
        Ok(catalog
            .iter()
            .map(|entry| {
                let metadata = &entry.metadata;
                let mut status = HandlerStatus {
                    name: metadata.name.clone(),
                    title: metadata.title.clone(),
                    category: metadata.category.clone(),
                    priority: metadata.priority,
                    requires_config: metadata.requires_config,
                    status: String::new(),
                    configured: false,
                    error: None,
                };
                match self.create_handler(&metadata.name, config) {
                    Ok(handler) => {
                        status.configured = handler.validate_configuration().valid;
                        status.status = handler.status();
                    }
                    Err(e) => status.error = Some(e.to_string()),
                }
                status
            })
            .collect())
    }
}
