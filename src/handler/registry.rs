//! Compile-time handler registry
//!
//! Handler modules register themselves with the [`output_handler!`] macro.
//! Each registration records the module path it came from, which is the
//! "source location" discovery filters on.
//!
//! [`output_handler!`]: crate::output_handler

use super::traits::HandlerDescriptor;

/// Entry submitted by [`output_handler!`](crate::output_handler)
pub struct HandlerRegistration {
    /// `module_path!()` at the registration site
    pub location: &'static str,
    pub descriptor: fn() -> HandlerDescriptor,
}

inventory::collect!(HandlerRegistration);

/// Register a [`HandlerType`](crate::handler::HandlerType) for discovery
#[macro_export]
macro_rules! output_handler {
    ($handler_type:ty) => {
        $crate::inventory::submit! {
            $crate::handler::registry::HandlerRegistration {
                location: module_path!(),
                descriptor: || $crate::handler::HandlerDescriptor::of::<$handler_type>(),
            }
        }
    };
}

/// Registrations whose location is `location` or nested below it
pub fn registrations_under(location: &str) -> Vec<&'static HandlerRegistration> {
    inventory::iter::<HandlerRegistration>
        .into_iter()
        .filter(|entry| location_matches(entry.location, location))
        .collect()
}

fn location_matches(entry_location: &str, location: &str) -> bool {
    entry_location == location
        || entry_location
            .strip_prefix(location)
            .is_some_and(|rest| rest.starts_with("::"))
}
