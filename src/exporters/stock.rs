//! Stock records read by the built-in exporters

use crate::data::{DataAccess, DataResult, Row, Value};

/// Unprefixed table holding the product master
pub const STOCK_TABLE: &str = "stock_master";

#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    pub sku: String,
    pub description: String,
    pub category: String,
    pub barcode: String,
    pub price: f64,
    pub quantity: i64,
    pub active: bool,
}

impl StockItem {
    pub fn from_row(row: &Row) -> Self {
        Self {
            sku: row.text("sku").trim().to_string(),
            description: row.text("description").trim().to_string(),
            category: row.text("category").trim().to_string(),
            barcode: row.text("barcode").trim().to_string(),
            price: row.number("retail_price").unwrap_or(0.0),
            quantity: row.integer("quantity").unwrap_or(0),
            active: row.get("active").and_then(Value::as_bool).unwrap_or(true),
        }
    }
}

/// Every stock record with a SKU, in SKU order. Inactive items are dropped
/// unless `include_inactive` is set.
pub fn load_stock(data: &dyn DataAccess, include_inactive: bool) -> DataResult<Vec<StockItem>> {
    let statement = format!(
        "SELECT sku, description, category, barcode, retail_price, quantity, active FROM {}{} ORDER BY sku",
        data.table_prefix(),
        STOCK_TABLE
    );
    let mut items: Vec<StockItem> = data
        .fetch_all(&statement, &[])?
        .iter()
        .map(StockItem::from_row)
        .filter(|item| !item.sku.is_empty())
        .filter(|item| include_inactive || item.active)
        .collect();
    items.sort_by(|a, b| a.sku.cmp(&b.sku));
    Ok(items)
}

#[cfg(test)]
pub(crate) fn sample_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("sku", "B-200")
            .with("description", "Brass hinge, 75mm")
            .with("category", "Hardware")
            .with("barcode", "9300000000022")
            .with("retail_price", 4.5)
            .with("quantity", 12i64)
            .with("active", true),
        Row::new()
            .with("sku", "A-100")
            .with("description", "6\" wood screw")
            .with("category", "Fasteners")
            .with("barcode", "9300000000015")
            .with("retail_price", 0.25)
            .with("quantity", 400i64)
            .with("active", 1i64),
        Row::new()
            .with("sku", "C-300")
            .with("description", "Discontinued bracket")
            .with("category", "Hardware")
            .with("retail_price", "2.10")
            .with("quantity", 0i64)
            .with("active", false),
        Row::new().with("description", "Row without a SKU"),
    ]
}
