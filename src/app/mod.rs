//! Application module

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod startup;

#[cfg(test)]
mod tests;
