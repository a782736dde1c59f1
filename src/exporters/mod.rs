//! Built-in exporters
//!
//! Each exporter reads the stock master through the injected
//! [`DataAccess`], renders one CSV file and writes it below its own
//! directory of the output root. They self-register with
//! [`output_handler!`](crate::output_handler) and are discovered under
//! [`BUILTIN_LOCATION`](crate::discovery::BUILTIN_LOCATION).

pub mod csv;
pub mod labels;
pub mod output;
pub mod pricebook;
pub mod square;
pub mod stock;
pub mod woocommerce;

pub use csv::CsvTable;
pub use labels::LabelsExporter;
pub use output::OutputDirectory;
pub use pricebook::PricebookExporter;
pub use square::SquareExporter;
pub use stock::{load_stock, StockItem};
pub use woocommerce::WooCommerceExporter;

use crate::data::DataAccess;
use crate::handler::{ConfigSchema, ExecutionResult, FieldSpec, HandlerResult};
use crate::settings::ConfigMap;
use output::{DEFAULT_OUTPUT_DIR, OUTPUT_DIR_KEY};
use std::path::PathBuf;
use std::sync::Arc;

/// Settings every CSV exporter shares
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CsvTarget {
    pub output: OutputDirectory,
    pub file_name: String,
    pub include_inactive: bool,
}

impl CsvTarget {
    pub fn new(file_name: &str) -> Self {
        Self {
            output: OutputDirectory::default(),
            file_name: file_name.to_string(),
            include_inactive: false,
        }
    }

    pub fn apply(&mut self, config: &ConfigMap) {
        if let Some(dir) = config.get_string(OUTPUT_DIR_KEY).filter(|d| !d.trim().is_empty()) {
            self.output = OutputDirectory::new(PathBuf::from(dir));
        }
        if let Some(file_name) = config.get_string("file_name").filter(|f| !f.trim().is_empty()) {
            self.file_name = file_name;
        }
        if let Some(include) = config.get_bool("include_inactive") {
            self.include_inactive = include;
        }
    }

    pub fn to_config(&self) -> ConfigMap {
        ConfigMap::new()
            .with(OUTPUT_DIR_KEY, self.output.root().display().to_string())
            .with("file_name", self.file_name.clone())
            .with("include_inactive", self.include_inactive)
    }

    pub fn schema(&self, default_file: &str) -> ConfigSchema {
        let mut schema = ConfigSchema::new();
        schema.insert(
            OUTPUT_DIR_KEY.to_string(),
            FieldSpec::path("Output directory")
                .describe("Root directory; files go in a sub-directory per handler")
                .default_value(DEFAULT_OUTPUT_DIR),
        );
        schema.insert(
            "file_name".to_string(),
            FieldSpec::text("File name").default_value(default_file),
        );
        schema.insert(
            "include_inactive".to_string(),
            FieldSpec::boolean("Include inactive items").default_value(false),
        );
        schema
    }

    /// Write `table` for `handler` and build the success result
    pub fn write(&self, handler: &str, table: &CsvTable, message: String) -> HandlerResult<ExecutionResult> {
        let path = self.output.write(handler, &self.file_name, &table.render())?;
        Ok(ExecutionResult::success(
            table.len() as u64,
            vec![path.display().to_string()],
            message,
        ))
    }
}

/// Stock records for an export, or the failed result explaining why there
/// are none
pub(crate) fn read_stock(
    data: Option<&Arc<dyn DataAccess>>,
    include_inactive: bool,
) -> Result<Vec<StockItem>, ExecutionResult> {
    let Some(data) = data else {
        return Err(ExecutionResult::failure("No data access configured"));
    };
    load_stock(data.as_ref(), include_inactive).map_err(|e| {
        log::warn!("Stock records unavailable: {}", e);
        ExecutionResult::failure(format!("Could not read stock records: {}", e))
    })
}
