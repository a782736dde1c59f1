//! Source locations handlers are discovered from

use super::error::DiscoveryResult;
use crate::handler::registry::registrations_under;
use crate::handler::HandlerDescriptor;

/// A location that yields candidate handler types
pub trait HandlerSource: Send + Sync {
    /// Identifier recorded on every entry discovered here
    fn location(&self) -> String;

    /// One descriptor per candidate type. An `Err` drops this location's
    /// contribution without stopping discovery of the others.
    fn candidates(&self) -> DiscoveryResult<Vec<HandlerDescriptor>>;
}

/// Handlers registered with `output_handler!` in a module subtree
#[derive(Debug, Clone)]
pub struct RegistrySource {
    module_path: String,
}

impl RegistrySource {
    pub fn new(module_path: &str) -> Self {
        Self {
            module_path: module_path.to_string(),
        }
    }
}

impl HandlerSource for RegistrySource {
    fn location(&self) -> String {
        self.module_path.clone()
    }

    fn candidates(&self) -> DiscoveryResult<Vec<HandlerDescriptor>> {
        let descriptors: Vec<HandlerDescriptor> = registrations_under(&self.module_path)
            .into_iter()
            .map(|entry| (entry.descriptor)())
            .collect();
        if descriptors.is_empty() {
            log::debug!("No handlers registered under '{}'", self.module_path);
        }
        Ok(descriptors)
    }
}

/// Explicitly registered handler types
#[derive(Debug, Clone)]
pub struct StaticSource {
    location: String,
    descriptors: Vec<HandlerDescriptor>,
}

impl StaticSource {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            descriptors: Vec::new(),
        }
    }

    pub fn with(mut self, descriptor: HandlerDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }
}

impl HandlerSource for StaticSource {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn candidates(&self) -> DiscoveryResult<Vec<HandlerDescriptor>> {
        Ok(self.descriptors.clone())
    }
}
