//! Command-line argument definitions

use crate::handler::OutputType;
use crate::settings::{ConfigMap, ConfigValue};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "catexport")]
#[command(about = "Export catalogue records to POS, e-commerce and label printer files")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Output root directory (overrides export.output_dir)
    #[arg(long = "output-dir", value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// JSON data file with the tables to export
    #[arg(long = "data-file", value_name = "FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Verbose output (can be used multiple times for more verbosity)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (can be used multiple times for less verbosity)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Force colored output (overrides TTY detection)
    #[arg(long = "color", action = ArgAction::SetTrue, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"], global = true)]
    pub log_format: Option<String>,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"], global = true)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List discovered output handlers in run order
    List {
        /// Only handlers in this category
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,

        /// Only handlers producing this output type (csv, pdf, direct)
        #[arg(long = "output-type", value_name = "TYPE", value_parser = parse_output_type)]
        output_type: Option<OutputType>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run output handlers
    Run(RunArgs),

    /// Show readiness of every handler
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration of one handler, or of every enabled output
    Validate {
        name: Option<String>,
    },

    /// Show the configuration keys a handler understands
    Schema {
        name: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Handlers to run (comma lists accepted); defaults to enabled outputs,
    /// then every handler
    #[arg(value_name = "NAMES")]
    pub names: Vec<String>,

    /// Run every discovered handler
    #[arg(long, conflicts_with = "names")]
    pub all: bool,

    /// Skip handlers in this category (with --all; repeatable)
    #[arg(long = "exclude-category", value_name = "CATEGORY", requires = "all")]
    pub exclude_category: Vec<String>,

    /// Stop after the first handler that fails
    #[arg(long = "stop-on-error")]
    pub stop_on_error: bool,

    /// Configuration override applied to every handler in this run
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, ConfigValue)>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigMap {
        self.set.iter().cloned().collect()
    }
}

fn parse_output_type(raw: &str) -> Result<OutputType, String> {
    Ok(OutputType::from_name(raw))
}

fn parse_assignment(raw: &str) -> Result<(String, ConfigValue), String> {
    ConfigMap::parse_assignment(raw).ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}

impl Args {
    /// Net verbosity: `-v` raises, `-q` lowers
    pub fn verbosity(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    /// Log level from the verbosity flags, if any were given
    pub fn verbosity_level(&self) -> Option<&'static str> {
        match self.verbosity() {
            0 => None,
            v if v >= 2 => Some("trace"),
            1 => Some("debug"),
            -1 => Some("warn"),
            _ => Some("error"),
        }
    }

    pub fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        self.color || std::io::IsTerminal::is_terminal(&std::io::stdout())
    }
}
