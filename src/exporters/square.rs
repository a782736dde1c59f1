//! Square POS item library import

use super::csv::{format_price, CsvTable};
use super::{read_stock, CsvTarget, StockItem};
use crate::data::DataAccess;
use crate::handler::{
    ConfigSchema, ExecutionResult, FieldSpec, HandlerContext, HandlerMetadata, HandlerResult,
    HandlerType, OutputHandler, OutputType,
};
use crate::settings::ConfigMap;
use std::sync::Arc;

pub const NAME: &str = "square";
const DEFAULT_FILE: &str = "square_items.csv";
const DEFAULT_VARIATION: &str = "Regular";

pub struct SquareExporter {
    target: CsvTarget,
    location_id: String,
    variation_name: String,
    data: Option<Arc<dyn DataAccess>>,
}

impl Default for SquareExporter {
    fn default() -> Self {
        Self {
            target: CsvTarget::new(DEFAULT_FILE),
            location_id: String::new(),
            variation_name: DEFAULT_VARIATION.to_string(),
            data: None,
        }
    }
}

impl SquareExporter {
    fn table(&self, items: &[StockItem]) -> CsvTable {
        let location = &self.location_id;
        let headers = [
            "Token".to_string(),
            "Item Name".to_string(),
            "Variation Name".to_string(),
            "SKU".to_string(),
            "Description".to_string(),
            "Categories".to_string(),
            "Price".to_string(),
            format!("Enabled [{}]", location),
            format!("Current Quantity [{}]", location),
        ];
        let mut table = CsvTable::new(&headers);
        for item in items {
            table.push(vec![
                String::new(),
                item.description.clone(),
                self.variation_name.clone(),
                item.sku.clone(),
                item.description.clone(),
                item.category.clone(),
                format_price(item.price),
                if item.active { "Y" } else { "N" }.to_string(),
                item.quantity.max(0).to_string(),
            ]);
        }
        table
    }
}

impl OutputHandler for SquareExporter {
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult> {
        let report = self.validate_configuration();
        if !report.valid {
            return Ok(ExecutionResult::failure(report.errors.join("; ")));
        }
        let items = match read_stock(self.data.as_ref(), self.target.include_inactive) {
            Ok(items) => items,
            Err(failed) => return Ok(failed),
        };
        let table = self.table(&items);
        let message = format!(
            "Exported {} item(s) for location {}",
            table.len(),
            self.location_id
        );
        self.target.write(NAME, &table, message)
    }

    fn configuration_schema(&self) -> ConfigSchema {
        let mut schema = self.target.schema(DEFAULT_FILE);
        schema.insert(
            "location_id".to_string(),
            FieldSpec::text("Location ID")
                .describe("Square location the quantities belong to")
                .required(),
        );
        schema.insert(
            "variation_name".to_string(),
            FieldSpec::text("Variation name").default_value(DEFAULT_VARIATION),
        );
        schema
    }

    fn apply_config(&mut self, config: &ConfigMap) -> HandlerResult<()> {
        self.target.apply(config);
        if let Some(location_id) = config.get_string("location_id") {
            self.location_id = location_id.trim().to_string();
        }
        if let Some(variation) = config
            .get_string("variation_name")
            .filter(|v| !v.trim().is_empty())
        {
            self.variation_name = variation;
        }
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        let mut config = self
            .target
            .to_config()
            .with("variation_name", self.variation_name.clone());
        if !self.location_id.is_empty() {
            config.insert("location_id", self.location_id.clone());
        }
        config
    }

    fn set_data_access(&mut self, data_access: Arc<dyn DataAccess>) {
        self.data = Some(data_access);
    }
}

impl HandlerType for SquareExporter {
    fn metadata() -> HandlerMetadata {
        HandlerMetadata::new(NAME, "Square POS", "Item library import file for Square point of sale")
            .category("pos")
            .output_type(OutputType::Csv)
            .priority(20)
            .requires_config(true)
    }

    fn create(ctx: &HandlerContext) -> HandlerResult<Self> {
        let mut exporter = Self::default();
        exporter.apply_config(&ctx.persisted_settings(NAME))?;
        Ok(exporter)
    }
}

crate::output_handler!(SquareExporter);
