//! Binary startup: configuration, logging, wiring and command dispatch

use super::cli::Args;
use super::commands;
use super::config::FileConfig;
use super::error::{AppError, AppResult};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::data::{DataAccess, MemoryDataAccess};
use crate::discovery::DiscoveryService;
use crate::factory::HandlerFactory;
use crate::orchestrator::ExportOrchestrator;
use crate::settings::{ConfigurationManager, MemoryConfigStore, TomlConfigStore};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

/// Parse arguments, run the command and map the outcome to an exit code
pub fn startup() -> ExitCode {
    let args = Args::parse();

    let config = match FileConfig::load(args.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let use_color = args.use_color();
    let level = args
        .verbosity_level()
        .map(str::to_string)
        .or_else(|| args.log_level.clone())
        .or_else(|| config.logging.level.clone());
    let format = args.log_format.clone().or_else(|| config.logging.format.clone());
    let file = args
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .map(|p| p.to_string_lossy().into_owned());
    if let Err(e) = init_logging(level.as_deref(), format.as_deref(), file.as_deref(), use_color) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    log::debug!(
        "catexport {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        crate::core::version::git_hash(),
        crate::core::version::build_time()
    );
    if let Some(source) = &config.source {
        log::debug!("Loaded configuration from {}", source.display());
    }

    match run(&args, &config, use_color) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log_error_with_context(&e, "catexport could not complete the command");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &FileConfig, use_color: bool) -> AppResult<bool> {
    let mut orchestrator = build_orchestrator(args, config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&args.command, &mut orchestrator, &mut out, use_color)
}

/// Wire discovery, data access, settings store, factory and orchestrator
/// from the parsed configuration
pub fn build_orchestrator(args: &Args, config: &FileConfig) -> AppResult<ExportOrchestrator> {
    let data = MemoryDataAccess::new(&config.data.table_prefix);
    if let Some(path) = args.data_file.as_ref().or(config.data.file.as_ref()) {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Argument(format!("cannot read data file {}: {}", path.display(), e))
        })?;
        let rows = data.load_json(&contents)?;
        log::info!("Loaded {} record(s) from {}", rows, path.display());
    }
    let data: Arc<dyn DataAccess> = Arc::new(data);

    let settings: Arc<dyn ConfigurationManager> = match &config.settings.path {
        Some(path) => Arc::new(TomlConfigStore::open(path)?),
        None => Arc::new(MemoryConfigStore::new()),
    };

    let group = config.settings.group.as_str();
    let factory = HandlerFactory::new(Arc::new(DiscoveryService::builtin()))
        .with_group(group)
        .with_data_access(data)
        .with_settings(settings);

    let mut orchestrator = ExportOrchestrator::new(factory);
    orchestrator.load_config_from_store(&format!("{}.export.", group));
    orchestrator.set_configs(&config.export);
    if let Some(dir) = &args.output_dir {
        orchestrator.set_config(
            crate::exporters::output::OUTPUT_DIR_KEY,
            dir.display().to_string(),
        );
    }
    Ok(orchestrator)
}
