//! CSV writing shared by the built-in exporters

use crate::data::Value;

/// In-memory CSV document: a header line plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    delimiter: char,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            delimiter: ',',
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Tab-separated variant
    pub fn new_tsv<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            delimiter: '\t',
            ..Self::new(headers)
        }
    }

    /// Append a row; missing trailing cells are written empty
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Escape CSV value if needed
    pub fn escape_value(&self, value: &str) -> String {
        if value.contains(self.delimiter)
            || value.contains('"')
            || value.contains('\n')
            || value.contains('\r')
        {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn render_line(&self, cells: &[String], out: &mut String) {
        let line: Vec<String> = (0..self.headers.len().max(cells.len()))
            .map(|i| {
                cells
                    .get(i)
                    .map(|cell| self.escape_value(cell))
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&line.join(&self.delimiter.to_string()));
        out.push('\n');
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_line(&self.headers, &mut out);
        for row in &self.rows {
            self.render_line(row, &mut out);
        }
        out
    }
}

/// Format a record value for a CSV cell
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Float(f) => format_price(*f),
        other => other.to_string(),
    }
}

/// Two-decimal money amount
pub fn format_price(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting_rules() {
        let table = CsvTable::new(&["a"]);
        assert_eq!(table.escape_value("plain"), "plain");
        assert_eq!(table.escape_value("a,b"), "\"a,b\"");
        assert_eq!(table.escape_value("6\" nail"), "\"6\"\" nail\"");
        assert_eq!(table.escape_value("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_render_pads_short_rows() {
        let mut table = CsvTable::new(&["SKU", "Name", "Price"]);
        table.push(vec!["A-1".into(), "Widget, large".into(), "4.50".into()]);
        table.push(vec!["A-2".into()]);

        assert_eq!(
            table.render(),
            "SKU,Name,Price\nA-1,\"Widget, large\",4.50\nA-2,,\n"
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_tsv_only_quotes_tabs() {
        let mut table = CsvTable::new_tsv(&["a", "b"]);
        table.push(vec!["x,y".into(), "p\tq".into()]);
        assert_eq!(table.render(), "a\tb\nx,y\t\"p\tq\"\n");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(&Value::Float(3.0)), "3.00");
        assert_eq!(format_value(&Value::Integer(3)), "3");
        assert_eq!(format_value(&Value::Null), "");
    }
}
