//! Handler traits
//!
//! Two halves: [`HandlerType`] holds the static facts discovery needs before
//! anything is constructed; [`OutputHandler`] is the runtime behaviour of a
//! built, configured instance.

use super::error::HandlerResult;
use super::schema::{ConfigSchema, ValidationReport};
use super::types::{ExecutionResult, HandlerMetadata};
use crate::data::DataAccess;
use crate::settings::{ConfigMap, ConfigurationManager};
use std::sync::Arc;

/// Runtime behaviour of a constructed handler
pub trait OutputHandler: Send {
    /// Perform the export.
    ///
    /// Expected failures (missing records, unreadable source, bad settings)
    /// come back as `Ok` with `success == false`. `Err` is reserved for
    /// failures the handler did not anticipate.
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult>;

    /// Configuration keys this handler understands
    fn configuration_schema(&self) -> ConfigSchema;

    /// Apply the keys this handler knows from `config`; unknown keys are ignored
    fn apply_config(&mut self, config: &ConfigMap) -> HandlerResult<()>;

    /// Effective configuration after defaults and `apply_config`
    fn current_config(&self) -> ConfigMap;

    fn validate_configuration(&self) -> ValidationReport {
        ValidationReport::check_required(&self.configuration_schema(), &self.current_config())
    }

    /// Human-readable readiness
    fn status(&self) -> String {
        let report = self.validate_configuration();
        if report.valid {
            "Ready".to_string()
        } else {
            format!("Not configured: {}", report.errors.join("; "))
        }
    }

    /// Setter injection of the shared data-access collaborator.
    /// Handlers that read no records keep the default no-op.
    fn set_data_access(&mut self, _data_access: Arc<dyn DataAccess>) {}
}

/// Construction context handed to [`HandlerType::create`]
#[derive(Clone, Default)]
pub struct HandlerContext {
    /// Logical grouping identifier; handlers read their persisted settings
    /// under `<group>.<handler name>.`
    pub group: String,
    pub settings: Option<Arc<dyn ConfigurationManager>>,
}

impl std::fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("group", &self.group)
            .field("settings", &self.settings.is_some())
            .finish()
    }
}

impl HandlerContext {
    pub fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: Arc<dyn ConfigurationManager>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Persisted settings stored for `handler_name`. A store failure is
    /// logged and yields an empty map.
    pub fn persisted_settings(&self, handler_name: &str) -> ConfigMap {
        let Some(settings) = &self.settings else {
            return ConfigMap::new();
        };
        let prefix = if self.group.is_empty() {
            format!("{}.", handler_name)
        } else {
            format!("{}.{}.", self.group, handler_name)
        };
        match settings.with_prefix(&prefix) {
            Ok(values) => values,
            Err(e) => {
                log::warn!(
                    "Could not read persisted settings for '{}': {}",
                    handler_name,
                    e
                );
                ConfigMap::new()
            }
        }
    }
}

/// Static, construction-free facts about a handler type
pub trait HandlerType: OutputHandler + Sized + 'static {
    fn metadata() -> HandlerMetadata;

    fn priority() -> i32 {
        Self::metadata().priority
    }

    /// Lets a handler opt out in environments where it cannot work
    fn is_available() -> bool {
        true
    }

    /// Handler API version the type was written against
    fn api_version() -> u32 {
        crate::core::version::get_api_version()
    }

    fn create(ctx: &HandlerContext) -> HandlerResult<Self>;
}

pub type HandlerConstructor = fn(&HandlerContext) -> HandlerResult<Box<dyn OutputHandler>>;

/// Whether a registered candidate can be instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Concrete,
    /// Shared base registered for listing or documentation, never built
    Abstract,
}

/// Type-erased handler type: the function pointers of a [`HandlerType`]
#[derive(Clone, Copy)]
pub struct HandlerDescriptor {
    /// Fully qualified type identity
    pub type_name: &'static str,
    pub kind: CandidateKind,
    pub api_version: u32,
    pub metadata: fn() -> HandlerMetadata,
    pub priority: fn() -> i32,
    pub is_available: fn() -> bool,
    pub constructor: Option<HandlerConstructor>,
}

fn construct<T: HandlerType>(ctx: &HandlerContext) -> HandlerResult<Box<dyn OutputHandler>> {
    Ok(Box::new(T::create(ctx)?))
}

fn always_available() -> bool {
    true
}

impl HandlerDescriptor {
    pub fn of<T: HandlerType>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            kind: CandidateKind::Concrete,
            api_version: T::api_version(),
            metadata: T::metadata,
            priority: T::priority,
            is_available: T::is_available,
            constructor: Some(construct::<T>),
        }
    }

    /// Descriptor for a base that is never instantiated
    pub fn abstract_base(
        type_name: &'static str,
        metadata: fn() -> HandlerMetadata,
        priority: fn() -> i32,
    ) -> Self {
        Self {
            type_name,
            kind: CandidateKind::Abstract,
            api_version: crate::core::version::get_api_version(),
            metadata,
            priority,
            is_available: always_available,
            constructor: None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        self.kind == CandidateKind::Concrete && self.constructor.is_some()
    }
}

impl std::fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("api_version", &self.api_version)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}
