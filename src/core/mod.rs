//! Core services and infrastructure

pub mod error_handling;
pub mod logging;
pub mod strings;
pub mod time;
pub mod version;
