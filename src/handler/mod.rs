//! Output Handler Contract
//!
//! Every export destination is an output handler. A handler type describes
//! itself statically ([`HandlerType`]: metadata, priority, availability,
//! constructor) so it can be listed without being built, and behaves through
//! the object-safe [`OutputHandler`] trait once constructed.
//!
//! Handler types register themselves with the [`output_handler!`] macro;
//! discovery iterates those registrations instead of scanning source files.
//!
//! [`output_handler!`]: crate::output_handler

pub mod error;
pub mod registry;
pub mod schema;
pub mod traits;
pub mod types;

pub use error::{HandlerError, HandlerResult};
pub use registry::HandlerRegistration;
pub use schema::{ConfigSchema, FieldSpec, FieldType, ValidationReport};
pub use traits::{
    CandidateKind, HandlerConstructor, HandlerContext, HandlerDescriptor, HandlerType,
    OutputHandler,
};
pub use types::{ExecutionResult, HandlerMetadata, OutputType};
