//! WooCommerce product CSV import

use super::csv::{format_price, CsvTable};
use super::{read_stock, CsvTarget, StockItem};
use crate::data::DataAccess;
use crate::handler::{
    ConfigSchema, ExecutionResult, FieldSpec, HandlerContext, HandlerMetadata, HandlerResult,
    HandlerType, OutputHandler, OutputType,
};
use crate::settings::ConfigMap;
use std::sync::Arc;

pub const NAME: &str = "woocommerce";
const DEFAULT_FILE: &str = "products.csv";

const HEADERS: [&str; 8] = [
    "Type",
    "SKU",
    "Name",
    "Published",
    "In stock?",
    "Stock",
    "Regular price",
    "Categories",
];

pub struct WooCommerceExporter {
    target: CsvTarget,
    publish: bool,
    manage_stock: bool,
    data: Option<Arc<dyn DataAccess>>,
}

impl Default for WooCommerceExporter {
    fn default() -> Self {
        Self {
            target: CsvTarget::new(DEFAULT_FILE),
            publish: true,
            manage_stock: true,
            data: None,
        }
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

impl WooCommerceExporter {
    fn table(&self, items: &[StockItem]) -> CsvTable {
        let mut table = CsvTable::new(&HEADERS);
        for item in items {
            let stock = if self.manage_stock {
                item.quantity.max(0).to_string()
            } else {
                String::new()
            };
            table.push(vec![
                "simple".to_string(),
                item.sku.clone(),
                item.description.clone(),
                flag(self.publish && item.active),
                flag(item.quantity > 0),
                stock,
                format_price(item.price),
                item.category.clone(),
            ]);
        }
        table
    }
}

impl OutputHandler for WooCommerceExporter {
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult> {
        let items = match read_stock(self.data.as_ref(), self.target.include_inactive) {
            Ok(items) => items,
            Err(failed) => return Ok(failed),
        };
        let table = self.table(&items);
        let message = format!("Exported {} product(s)", table.len());
        self.target.write(NAME, &table, message)
    }

    fn configuration_schema(&self) -> ConfigSchema {
        let mut schema = self.target.schema(DEFAULT_FILE);
        schema.insert(
            "publish".to_string(),
            FieldSpec::boolean("Publish products").default_value(true),
        );
        schema.insert(
            "manage_stock".to_string(),
            FieldSpec::boolean("Export stock levels").default_value(true),
        );
        schema
    }

    fn apply_config(&mut self, config: &ConfigMap) -> HandlerResult<()> {
        self.target.apply(config);
        if let Some(publish) = config.get_bool("publish") {
            self.publish = publish;
        }
        if let Some(manage_stock) = config.get_bool("manage_stock") {
            self.manage_stock = manage_stock;
        }
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        self.target
            .to_config()
            .with("publish", self.publish)
            .with("manage_stock", self.manage_stock)
    }

    fn set_data_access(&mut self, data_access: Arc<dyn DataAccess>) {
        self.data = Some(data_access);
    }
}

impl HandlerType for WooCommerceExporter {
    fn metadata() -> HandlerMetadata {
        HandlerMetadata::new(NAME, "WooCommerce", "Product import file for WooCommerce stores")
            .category("ecommerce")
            .output_type(OutputType::Csv)
            .priority(30)
    }

    fn create(ctx: &HandlerContext) -> HandlerResult<Self> {
        let mut exporter = Self::default();
        exporter.apply_config(&ctx.persisted_settings(NAME))?;
        Ok(exporter)
    }
}

crate::output_handler!(WooCommerceExporter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryDataAccess;
    use crate::exporters::fixtures::stock_data;
    use crate::exporters::stock::STOCK_TABLE;
    use tempfile::TempDir;

    fn run(config: ConfigMap, data: Arc<dyn DataAccess>) -> (ExecutionResult, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut exporter = WooCommerceExporter::default();
        exporter.set_data_access(data);
        exporter
            .apply_config(&config.with("output_dir", temp.path().display().to_string()))
            .unwrap();
        (exporter.generate_output().unwrap(), temp)
    }

    #[test]
    fn test_product_rows() {
        let (result, temp) = run(ConfigMap::new().with("include_inactive", true), stock_data());
        assert!(result.success);
        assert_eq!(result.rows_processed, 3);

        let csv = std::fs::read_to_string(temp.path().join("woocommerce/products.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Type,SKU,Name,Published,In stock?,Stock,Regular price,Categories"
        );
        assert_eq!(
            lines[2],
            "simple,B-200,\"Brass hinge, 75mm\",1,1,12,4.50,Hardware"
        );
        assert_eq!(
            lines[3],
            "simple,C-300,Discontinued bracket,0,0,0,2.10,Hardware"
        );
    }

    #[test]
    fn test_unpublished_without_stock_levels() {
        let config = ConfigMap::new()
            .with("publish", false)
            .with("manage_stock", "no");
        let (result, temp) = run(config, stock_data());
        assert!(result.success);

        let csv = std::fs::read_to_string(temp.path().join("woocommerce/products.csv")).unwrap();
        assert!(csv.contains("simple,A-100,\"6\"\" wood screw\",0,1,,0.25,Fasteners\n"));
    }

    #[test]
    fn test_unreadable_stock_is_a_failed_result() {
        let data = MemoryDataAccess::new("0_");
        data.fail_table(STOCK_TABLE);

        let (result, temp) = run(ConfigMap::new(), Arc::new(data));
        assert!(!result.success);
        assert!(result.message.starts_with("Could not read stock records"));
        assert!(!temp.path().join("woocommerce").exists());
    }
}
