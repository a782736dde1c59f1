//! Price book export for POS terminals

use super::csv::{format_price, CsvTable};
use super::{read_stock, CsvTarget};
use crate::data::DataAccess;
use crate::handler::{
    ConfigSchema, ExecutionResult, FieldSpec, HandlerContext, HandlerMetadata, HandlerResult,
    HandlerType, OutputHandler, OutputType,
};
use crate::settings::ConfigMap;
use std::sync::Arc;

pub const NAME: &str = "pricebook";
const DEFAULT_FILE: &str = "pricebook.csv";

pub struct PricebookExporter {
    target: CsvTarget,
    include_barcode: bool,
    data: Option<Arc<dyn DataAccess>>,
}

impl Default for PricebookExporter {
    fn default() -> Self {
        Self {
            target: CsvTarget::new(DEFAULT_FILE),
            include_barcode: false,
            data: None,
        }
    }
}

impl PricebookExporter {
    fn table(&self, items: &[super::StockItem]) -> CsvTable {
        let mut headers = vec!["SKU", "Description", "Price"];
        if self.include_barcode {
            headers.push("Barcode");
        }
        let mut table = CsvTable::new(&headers);
        for item in items {
            let mut row = vec![
                item.sku.clone(),
                item.description.clone(),
                format_price(item.price),
            ];
            if self.include_barcode {
                row.push(item.barcode.clone());
            }
            table.push(row);
        }
        table
    }
}

impl OutputHandler for PricebookExporter {
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult> {
        let items = match read_stock(self.data.as_ref(), self.target.include_inactive) {
            Ok(items) => items,
            Err(failed) => return Ok(failed),
        };
        let table = self.table(&items);
        let message = format!("Exported {} price(s)", table.len());
        self.target.write(NAME, &table, message)
    }

    fn configuration_schema(&self) -> ConfigSchema {
        let mut schema = self.target.schema(DEFAULT_FILE);
        schema.insert(
            "include_barcode".to_string(),
            FieldSpec::boolean("Include barcode column").default_value(false),
        );
        schema
    }

    fn apply_config(&mut self, config: &ConfigMap) -> HandlerResult<()> {
        self.target.apply(config);
        if let Some(include) = config.get_bool("include_barcode") {
            self.include_barcode = include;
        }
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        self.target
            .to_config()
            .with("include_barcode", self.include_barcode)
    }

    fn set_data_access(&mut self, data_access: Arc<dyn DataAccess>) {
        self.data = Some(data_access);
    }
}

impl HandlerType for PricebookExporter {
    fn metadata() -> HandlerMetadata {
        HandlerMetadata::new(NAME, "Price Book", "SKU, description and price list for POS terminals")
            .category("pos")
            .output_type(OutputType::Csv)
            .priority(10)
    }

    fn create(ctx: &HandlerContext) -> HandlerResult<Self> {
        let mut exporter = Self::default();
        exporter.apply_config(&ctx.persisted_settings(NAME))?;
        Ok(exporter)
    }
}

crate::output_handler!(PricebookExporter);
