//! Handler Discovery
//!
//! Finds every concrete, available handler type reachable from the
//! configured source locations and returns them as a priority-ordered
//! catalog. Source locations are [`HandlerSource`]s: module paths in the
//! compile-time registry ([`RegistrySource`]) or explicit lists
//! ([`StaticSource`]).
//!
//! The catalog is cached in an owned [`DiscoveryCache`] until a forced
//! refresh, an explicit invalidation or a new source location.

mod cache;
mod error;
mod service;
mod source;
mod types;

pub use cache::DiscoveryCache;
pub use error::{DiscoveryError, DiscoveryResult};
pub use service::{DiscoveryService, BUILTIN_LOCATION};
pub use source::{HandlerSource, RegistrySource, StaticSource};
pub use types::{Catalog, DiscoveredHandler};

#[cfg(test)]
mod tests;
