//! Shared fixtures for the integration tests
//!
//! Provides a stock table, a wired orchestrator over the built-in exporters
//! and an external handler registered through `output_handler!` the way a
//! downstream crate would.

#![allow(dead_code)]

use catexport::data::{MemoryDataAccess, Row};
use catexport::discovery::DiscoveryService;
use catexport::exporters::stock::STOCK_TABLE;
use catexport::factory::HandlerFactory;
use catexport::handler::{
    ConfigSchema, ExecutionResult, FieldSpec, HandlerContext, HandlerMetadata, HandlerResult,
    HandlerType, OutputHandler,
};
use catexport::orchestrator::ExportOrchestrator;
use catexport::settings::ConfigMap;
use std::path::Path;
use std::sync::Arc;

pub const PREFIX: &str = "0_";

pub fn stock_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("sku", "A-100")
            .with("description", "Wood screw 8g x 30mm")
            .with("category", "Fasteners")
            .with("barcode", "9300000000015")
            .with("retail_price", 0.25)
            .with("quantity", 400i64)
            .with("active", true),
        Row::new()
            .with("sku", "B-200")
            .with("description", "Brass hinge, 75mm")
            .with("category", "Hardware")
            .with("barcode", "9300000000022")
            .with("retail_price", 4.5)
            .with("quantity", 12i64)
            .with("active", true),
        Row::new()
            .with("sku", "C-300")
            .with("description", "Shelf bracket")
            .with("category", "Hardware")
            .with("retail_price", 2.1)
            .with("quantity", 0i64)
            .with("active", true),
    ]
}

pub fn stock_data() -> Arc<MemoryDataAccess> {
    Arc::new(MemoryDataAccess::new(PREFIX).with_table(STOCK_TABLE, stock_rows()))
}

/// Orchestrator over the built-in exporters writing below `output_dir`
pub fn builtin_orchestrator(output_dir: &Path, data: Arc<MemoryDataAccess>) -> ExportOrchestrator {
    let factory =
        HandlerFactory::new(Arc::new(DiscoveryService::builtin())).with_data_access(data);
    let mut orchestrator = ExportOrchestrator::new(factory);
    orchestrator.set_config("output_dir", output_dir.display().to_string());
    orchestrator
}

/// Externally defined handler; requires an `endpoint`
pub struct WebhookHandler {
    endpoint: Option<String>,
}

impl OutputHandler for WebhookHandler {
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult> {
        match &self.endpoint {
            Some(endpoint) => Ok(ExecutionResult::success(0, vec![], format!("notified {}", endpoint))),
            None => Ok(ExecutionResult::failure("no endpoint configured")),
        }
    }

    fn configuration_schema(&self) -> ConfigSchema {
        let mut schema = ConfigSchema::new();
        schema.insert("endpoint".to_string(), FieldSpec::text("Endpoint URL").required());
        schema
    }

    fn apply_config(&mut self, config: &ConfigMap) -> HandlerResult<()> {
        if let Some(endpoint) = config.get_string("endpoint") {
            self.endpoint = Some(endpoint);
        }
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        match &self.endpoint {
            Some(endpoint) => ConfigMap::new().with("endpoint", endpoint.clone()),
            None => ConfigMap::new(),
        }
    }
}

impl HandlerType for WebhookHandler {
    fn metadata() -> HandlerMetadata {
        HandlerMetadata::new("webhook", "Webhook", "Posts a notification after export")
            .category("notify")
            .priority(5)
    }

    fn create(_ctx: &HandlerContext) -> HandlerResult<Self> {
        Ok(Self { endpoint: None })
    }
}

catexport::output_handler!(WebhookHandler);

/// Module path the fixtures above register under
pub fn fixture_location() -> &'static str {
    module_path!()
}
