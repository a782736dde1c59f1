//! Export Orchestrator
//!
//! Top-level API for running exports. Holds three configuration layers
//! (persisted defaults, global, per-call extras; later wins), resolves
//! which handlers to run, runs them one at a time and keeps the latest
//! result per handler.

mod results;

pub use results::{BatchResults, ResultsSummary};

use crate::factory::{HandlerFactory, HandlerStatus};
use crate::handler::{ExecutionResult, HandlerResult, ValidationReport};
use crate::settings::{ConfigMap, ConfigValue};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Configuration key naming the handlers run when none are requested
pub const ENABLED_OUTPUTS_KEY: &str = "enabled_outputs";

#[derive(Debug)]
pub struct ExportOrchestrator {
    factory: HandlerFactory,
    config: ConfigMap,
    persisted: ConfigMap,
    results: BTreeMap<String, ExecutionResult>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl ExportOrchestrator {
    pub fn new(factory: HandlerFactory) -> Self {
        Self {
            factory,
            config: ConfigMap::new(),
            persisted: ConfigMap::new(),
            results: BTreeMap::new(),
        }
    }

    pub fn factory(&self) -> &HandlerFactory {
        &self.factory
    }

    pub fn set_config(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.config.insert(key, value);
    }

    /// Merge `config` into the global layer; its keys win
    pub fn set_configs(&mut self, config: &ConfigMap) {
        self.config.merge(config);
    }

    pub fn get_config(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.effective_config()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Persisted defaults overlaid by the global layer
    pub fn effective_config(&self) -> ConfigMap {
        self.persisted.merged(&self.config)
    }

    /// Merge every store entry under `prefix` (prefix removed) into the
    /// persisted layer; keys already loaded stay unless the store has them. Returns the number of keys loaded; on a store
    /// failure the current configuration is kept and 0 is returned.
    pub fn load_config_from_store(&mut self, prefix: &str) -> usize {
        let Some(settings) = self.factory.settings() else {
            log::debug!("No configuration store attached; nothing loaded");
            return 0;
        };
        match settings.with_prefix(prefix) {
            Ok(values) => {
                let count = values.len();
                log::debug!("Loaded {} persisted setting(s) under '{}'", count, prefix);
                self.persisted.merge(&values);
                count
            }
            Err(e) => {
                log::warn!("Could not load persisted settings under '{}': {}", prefix, e);
                0
            }
        }
    }

    pub fn enabled_outputs(&self) -> Vec<String> {
        self.effective_config().get_list(ENABLED_OUTPUTS_KEY)
    }

    pub fn set_enabled_outputs<S: AsRef<str>>(&mut self, names: &[S]) {
        let names = crate::core::strings::split_comma_list(names);
        self.config.insert(
            ENABLED_OUTPUTS_KEY,
            ConfigValue::Array(names.into_iter().map(ConfigValue::String).collect()),
        );
    }

    /// Run one handler with the effective configuration plus `extra`.
    /// Never fails: any error or panic becomes an unsuccessful result.
    pub fn generate_output(&mut self, name: &str, extra: &ConfigMap) -> ExecutionResult {
        let config = self.effective_config().merged(extra);
        let started = Instant::now();
        log::info!("Running output handler '{}'", name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> HandlerResult<ExecutionResult> {
            let mut handler = self.factory.create_handler(name, &config)?;
            handler.generate_output()
        }));
        let elapsed = started.elapsed().as_secs_f64();

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                log::error!("Output handler '{}' failed: {}", name, e);
                ExecutionResult::failure(e.to_string())
            }
            Err(payload) => {
                let message = format!("Handler '{}' panicked: {}", name, panic_message(payload.as_ref()));
                log::error!("{}", message);
                ExecutionResult::failure(message)
            }
        }
        .stamped(name, elapsed);

        if result.success {
            log::info!(
                "Output handler '{}' finished: {} row(s), {} file(s) in {:.3}s",
                name,
                result.rows_processed,
                result.files_produced.len(),
                elapsed
            );
        } else {
            log::warn!("Output handler '{}' did not succeed: {}", name, result.message);
        }

        self.results.insert(name.to_string(), result.clone());
        result
    }

    /// Names to run when a caller supplies none: enabled outputs, else every
    /// discovered handler in catalog order
    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> HandlerResult<Vec<String>> {
        let requested = crate::core::strings::split_comma_list(names);
        if !requested.is_empty() {
            return Ok(requested);
        }
        let enabled = self.enabled_outputs();
        if !enabled.is_empty() {
            return Ok(enabled);
        }
        Ok(self.factory.discovery().names()?)
    }

    /// Run handlers sequentially. With `stop_on_error` the batch ends after
    /// the first unsuccessful result; output of handlers already run stays.
    pub fn generate_outputs<S: AsRef<str>>(
        &mut self,
        names: &[S],
        stop_on_error: bool,
    ) -> HandlerResult<BatchResults> {
        let names = self.resolve_names(names)?;
        Ok(self.run_batch(&names, stop_on_error))
    }

    /// Run every discovered handler outside `exclude_categories`
    pub fn generate_all_outputs<S: AsRef<str>>(
        &mut self,
        exclude_categories: &[S],
        stop_on_error: bool,
    ) -> HandlerResult<BatchResults> {
        let names: Vec<String> = self
            .factory
            .discovery()
            .discover(false)?
            .iter()
            .filter(|entry| {
                !exclude_categories
                    .iter()
                    .any(|c| c.as_ref() == entry.metadata.category)
            })
            .map(|entry| entry.metadata.name.clone())
            .collect();
        Ok(self.run_batch(&names, stop_on_error))
    }

    fn run_batch(&mut self, names: &[String], stop_on_error: bool) -> BatchResults {
        let mut batch = BatchResults::new();
        for name in names {
            let result = self.generate_output(name, &ConfigMap::new());
            let failed = !result.success;
            batch.push(name, result);
            if failed && stop_on_error {
                log::warn!("Stopping batch after failure of '{}'", name);
                break;
            }
        }
        batch
    }

    /// Latest result for `name`
    pub fn results(&self, name: &str) -> Option<&ExecutionResult> {
        self.results.get(name)
    }

    pub fn all_results(&self) -> &BTreeMap<String, ExecutionResult> {
        &self.results
    }

    pub fn results_summary(&self) -> ResultsSummary {
        ResultsSummary::from_results(self.results.values())
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    pub fn handler_statuses(&self) -> HandlerResult<Vec<HandlerStatus>> {
        self.factory.handler_statuses_with(&self.effective_config())
    }

    pub fn validate_handler_config(&self, name: &str) -> ValidationReport {
        self.factory
            .validate_handler_config(name, &self.effective_config())
    }

    /// Validation report for each enabled output
    pub fn validate_all_enabled_configs(&self) -> BTreeMap<String, ValidationReport> {
        self.enabled_outputs()
            .into_iter()
            .map(|name| {
                let report = self.validate_handler_config(&name);
                (name, report)
            })
            .collect()
    }
}
