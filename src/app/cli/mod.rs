//! Command-line interface

pub mod args;

pub use args::{Args, Command, RunArgs};

#[cfg(test)]
mod tests;
