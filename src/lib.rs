//! Catalogue export pipeline
//!
//! Output handlers describe themselves, register with
//! [`output_handler!`], are found and ranked by [`discovery`], built and
//! configured by [`factory`] and run by the [`orchestrator`].

pub mod app;
pub mod core;
pub mod data;
pub mod discovery;
pub mod exporters;
pub mod factory;
pub mod handler;
pub mod orchestrator;
pub mod settings;

#[doc(hidden)]
pub use inventory;

#[cfg(test)]
mod test_support;
