use crate::handler::{HandlerDescriptor, HandlerMetadata};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Catalog entry: metadata plus discovery bookkeeping
#[derive(Debug, Clone)]
pub struct DiscoveredHandler {
    pub metadata: HandlerMetadata,
    /// Fully qualified type identity the factory builds
    pub type_name: String,
    /// Source location the candidate came from
    pub source: String,
    pub discovered_at: DateTime<Utc>,
    pub api_version: u32,
    pub descriptor: HandlerDescriptor,
}

impl DiscoveredHandler {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

impl PartialEq for DiscoveredHandler {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.type_name == other.type_name
            && self.source == other.source
            && self.api_version == other.api_version
    }
}

/// Priority-ordered discovery result shared by every reader of the cache
pub type Catalog = Arc<Vec<DiscoveredHandler>>;
