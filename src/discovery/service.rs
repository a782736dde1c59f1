//! Discovery service
//!
//! Walks every source location, keeps the concrete, available, contract
//! conforming candidates with complete metadata, and orders them by
//! priority then title.

use super::cache::DiscoveryCache;
use super::error::{DiscoveryError, DiscoveryResult};
use super::source::{HandlerSource, RegistrySource};
use super::types::{Catalog, DiscoveredHandler};
use crate::core::time::{Clock, SystemClock};
use crate::core::version::{get_api_version, is_api_compatible};
use crate::handler::HandlerDescriptor;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Module path the built-in exporters register under
pub const BUILTIN_LOCATION: &str = "catexport::exporters";

static NAME_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid slug regex"));

pub struct DiscoveryService {
    sources: RwLock<Vec<Arc<dyn HandlerSource>>>,
    cache: DiscoveryCache,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DiscoveryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryService")
            .field("locations", &self.locations())
            .field("cached", &self.cache.is_populated())
            .finish()
    }
}

impl Default for DiscoveryService {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DiscoveryService {
    pub fn new(sources: Vec<Arc<dyn HandlerSource>>) -> Self {
        Self {
            sources: RwLock::new(sources),
            cache: DiscoveryCache::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Service over the built-in exporter registrations
    pub fn builtin() -> Self {
        Self::new(vec![Arc::new(RegistrySource::new(BUILTIN_LOCATION))])
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Add a source location; the cached catalog is dropped
    pub fn add_source(&self, source: Arc<dyn HandlerSource>) {
        match self.sources.write() {
            Ok(mut sources) => sources.push(source),
            Err(poisoned) => poisoned.into_inner().push(source),
        }
        self.cache.invalidate();
    }

    pub fn locations(&self) -> Vec<String> {
        match self.sources.read() {
            Ok(sources) => sources.iter().map(|s| s.location()).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn invalidate(&self) {
        log::debug!("Discovery cache invalidated");
        self.cache.invalidate();
    }

    /// Priority-ordered catalog. Served from the cache unless
    /// `force_refresh` is set or nothing is cached yet.
    pub fn discover(&self, force_refresh: bool) -> DiscoveryResult<Catalog> {
        if !force_refresh {
            if let Some(catalog) = self.cache.get()? {
                return Ok(catalog);
            }
        }

        let generation = self.cache.generation()?;
        let now = self.clock.now();
        let catalog: Catalog = Arc::new(self.scan(now)?);
        if !self.cache.store(catalog.clone(), now, generation)? {
            log::debug!("Sources changed during the scan; catalog not cached");
        }
        log::info!("Discovered {} output handler(s)", catalog.len());
        Ok(catalog)
    }

    pub fn find_by_name(&self, name: &str) -> DiscoveryResult<Option<DiscoveredHandler>> {
        Ok(self
            .discover(false)?
            .iter()
            .find(|entry| entry.metadata.name == name)
            .cloned())
    }

    /// Entries in `category`, catalog order preserved
    pub fn find_by_category(&self, category: &str) -> DiscoveryResult<Vec<DiscoveredHandler>> {
        Ok(self
            .discover(false)?
            .iter()
            .filter(|entry| entry.metadata.category == category)
            .cloned()
            .collect())
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> DiscoveryResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .discover(false)?
            .iter()
            .map(|entry| entry.metadata.category.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// Handler names in catalog order
    pub fn names(&self) -> DiscoveryResult<Vec<String>> {
        Ok(self
            .discover(false)?
            .iter()
            .map(|entry| entry.metadata.name.clone())
            .collect())
    }

    fn scan(&self, now: DateTime<Utc>) -> DiscoveryResult<Vec<DiscoveredHandler>> {
        let sources: Vec<Arc<dyn HandlerSource>> = match self.sources.read() {
            Ok(sources) => sources.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        let mut entries: Vec<DiscoveredHandler> = Vec::new();
        let mut seen_types: BTreeSet<&'static str> = BTreeSet::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for source in sources {
            let location = source.location();
            let candidates = match source.candidates() {
                Ok(candidates) => candidates,
                Err(e) => {
                    log::warn!("Skipping handler source '{}': {}", location, e);
                    continue;
                }
            };

            for descriptor in candidates {
                // The same type reachable from two overlapping locations is one handler
                if !seen_types.insert(descriptor.type_name) {
                    continue;
                }
                let Some(entry) = Self::admit(&descriptor, &location, now) else {
                    continue;
                };
                if let Some(first) = owners.get(&entry.metadata.name) {
                    return Err(DiscoveryError::DuplicateName {
                        name: entry.metadata.name.clone(),
                        first: first.clone(),
                        second: entry.type_name.clone(),
                    });
                }
                owners.insert(entry.metadata.name.clone(), entry.type_name.clone());
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| {
            a.metadata
                .priority
                .cmp(&b.metadata.priority)
                .then_with(|| a.metadata.title.cmp(&b.metadata.title))
        });
        Ok(entries)
    }

    /// Catalog entry for an admissible candidate, `None` if it is filtered out
    fn admit(
        descriptor: &HandlerDescriptor,
        location: &str,
        now: DateTime<Utc>,
    ) -> Option<DiscoveredHandler> {
        if !descriptor.is_concrete() {
            log::debug!("Skipping non-instantiable candidate {}", descriptor.type_name);
            return None;
        }
        if !is_api_compatible(descriptor.api_version) {
            log::warn!(
                "Skipping {}: handler API {} is incompatible with {}",
                descriptor.type_name,
                descriptor.api_version,
                get_api_version()
            );
            return None;
        }
        if !(descriptor.is_available)() {
            log::debug!("Skipping {}: not available in this environment", descriptor.type_name);
            return None;
        }

        let mut metadata = (descriptor.metadata)();
        let missing = metadata.missing_required_fields();
        if !missing.is_empty() {
            log::warn!(
                "Skipping {}: metadata missing {}",
                descriptor.type_name,
                missing.join(", ")
            );
            return None;
        }
        if !NAME_SLUG.is_match(&metadata.name) {
            log::warn!(
                "Skipping {}: handler name '{}' is not a lowercase identifier",
                descriptor.type_name,
                metadata.name
            );
            return None;
        }

        metadata.priority = (descriptor.priority)();
        Some(DiscoveredHandler {
            metadata: metadata.with_defaults(),
            type_name: descriptor.type_name.to_string(),
            source: location.to_string(),
            discovered_at: now,
            api_version: descriptor.api_version,
            descriptor: *descriptor,
        })
    }
}
