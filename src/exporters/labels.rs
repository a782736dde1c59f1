//! Shelf label print file
//!
//! One row per printed label: the label text is cut to the label width and
//! every item is repeated `copies` times.

use super::csv::{format_price, CsvTable};
use super::{read_stock, CsvTarget, StockItem};
use crate::core::strings::truncate_graphemes;
use crate::data::DataAccess;
use crate::handler::{
    ConfigSchema, ExecutionResult, FieldSpec, HandlerContext, HandlerError, HandlerMetadata,
    HandlerResult, HandlerType, OutputHandler, OutputType,
};
use crate::settings::ConfigMap;
use std::sync::Arc;

pub const NAME: &str = "labels";
const DEFAULT_FILE: &str = "labels.csv";
const DEFAULT_WIDTH: usize = 32;
const MAX_WIDTH: i64 = 200;
const MAX_COPIES: i64 = 100;

pub struct LabelsExporter {
    target: CsvTarget,
    label_width: usize,
    copies: usize,
    data: Option<Arc<dyn DataAccess>>,
}

impl Default for LabelsExporter {
    fn default() -> Self {
        Self {
            target: CsvTarget::new(DEFAULT_FILE),
            label_width: DEFAULT_WIDTH,
            copies: 1,
            data: None,
        }
    }
}

fn bounded(config: &ConfigMap, key: &str, max: i64) -> HandlerResult<Option<usize>> {
    if config.get(key).is_none() {
        return Ok(None);
    }
    match config.get_i64(key) {
        Some(value) if (1..=max).contains(&value) => Ok(Some(value as usize)),
        _ => Err(HandlerError::invalid_config(
            key,
            format!("expected a whole number between 1 and {}", max),
        )),
    }
}

impl LabelsExporter {
    fn table(&self, items: &[StockItem]) -> CsvTable {
        let mut table = CsvTable::new(&["SKU", "Barcode", "Label", "Price"]);
        for item in items {
            let barcode = if item.barcode.is_empty() {
                item.sku.clone()
            } else {
                item.barcode.clone()
            };
            let label = truncate_graphemes(&item.description, self.label_width);
            for _ in 0..self.copies {
                table.push(vec![
                    item.sku.clone(),
                    barcode.clone(),
                    label.clone(),
                    format_price(item.price),
                ]);
            }
        }
        table
    }
}

impl OutputHandler for LabelsExporter {
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult> {
        let items = match read_stock(self.data.as_ref(), self.target.include_inactive) {
            Ok(items) => items,
            Err(failed) => return Ok(failed),
        };
        let table = self.table(&items);
        let message = format!("Prepared {} label(s) for {} item(s)", table.len(), items.len());
        self.target.write(NAME, &table, message)
    }

    fn configuration_schema(&self) -> ConfigSchema {
        let mut schema = self.target.schema(DEFAULT_FILE);
        schema.insert(
            "label_width".to_string(),
            FieldSpec::integer("Label width")
                .describe("Characters of description that fit on one label")
                .default_value(DEFAULT_WIDTH as i64),
        );
        schema.insert(
            "copies".to_string(),
            FieldSpec::integer("Copies per item").default_value(1),
        );
        schema
    }

    fn apply_config(&mut self, config: &ConfigMap) -> HandlerResult<()> {
        self.target.apply(config);
        if let Some(width) = bounded(config, "label_width", MAX_WIDTH)? {
            self.label_width = width;
        }
        if let Some(copies) = bounded(config, "copies", MAX_COPIES)? {
            self.copies = copies;
        }
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        self.target
            .to_config()
            .with("label_width", self.label_width as i64)
            .with("copies", self.copies as i64)
    }

    fn set_data_access(&mut self, data_access: Arc<dyn DataAccess>) {
        self.data = Some(data_access);
    }
}

impl HandlerType for LabelsExporter {
    fn metadata() -> HandlerMetadata {
        HandlerMetadata::new(NAME, "Shelf Labels", "Label printer file with one row per label")
            .category("printing")
            .output_type(OutputType::Csv)
            .priority(50)
    }

    fn create(ctx: &HandlerContext) -> HandlerResult<Self> {
        let mut exporter = Self::default();
        exporter.apply_config(&ctx.persisted_settings(NAME))?;
        Ok(exporter)
    }
}

crate::output_handler!(LabelsExporter);
