//! In-memory data access
//!
//! Tables are plain row lists. A statement is routed to the table named after
//! its `FROM` keyword (with the table prefix stripped). Used by the CLI demo
//! data set and by tests.

use super::error::{DataError, DataResult};
use super::traits::{DataAccess, QueryResult};
use super::value::{Row, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::RwLock;

/// Most recent statements kept by [`MemoryDataAccess::executed_statements`]
pub const STATEMENT_LOG_LIMIT: usize = 256;

static FROM_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bFROM\s+([A-Za-z0-9_]+)").expect("valid FROM regex"));

#[derive(Debug, Default)]
pub struct MemoryDataAccess {
    prefix: String,
    tables: RwLock<BTreeMap<String, Vec<Row>>>,
    failing: RwLock<BTreeSet<String>>,
    statements: RwLock<VecDeque<String>>,
}

impl MemoryDataAccess {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            ..Self::default()
        }
    }

    /// Replace the rows of `table` (unprefixed name)
    pub fn insert_table(&self, table: &str, rows: Vec<Row>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(table.to_string(), rows);
        }
    }

    pub fn with_table(self, table: &str, rows: Vec<Row>) -> Self {
        self.insert_table(table, rows);
        self
    }

    /// Make every query against `table` fail
    pub fn fail_table(&self, table: &str) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(table.to_string());
        }
    }

    /// Up to [`STATEMENT_LOG_LIMIT`] most recent statements, oldest first
    pub fn executed_statements(&self) -> Vec<String> {
        self.statements
            .read()
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Load tables from a JSON document of the form
    /// `{"table": [{"column": value, ...}, ...], ...}`. Returns the number of
    /// rows loaded.
    pub fn load_json(&self, json: &str) -> DataResult<usize> {
        let document: BTreeMap<String, Vec<serde_json::Map<String, serde_json::Value>>> =
            serde_json::from_str(json).map_err(|e| DataError::Unavailable(format!("invalid data file: {}", e)))?;

        let mut loaded = 0;
        for (table, records) in document {
            let rows: Vec<Row> = records
                .into_iter()
                .map(|record| {
                    record
                        .into_iter()
                        .fold(Row::new(), |row, (column, value)| row.with(&column, json_value(value)))
                })
                .collect();
            loaded += rows.len();
            self.insert_table(&table, rows);
        }
        Ok(loaded)
    }

    fn resolve_table(&self, statement: &str) -> DataResult<String> {
        let captured = FROM_CLAUSE
            .captures(statement)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| DataError::Query {
                statement: statement.to_string(),
                cause: "no FROM clause".to_string(),
            })?;
        Ok(captured
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(captured)
            .to_string())
    }
}

fn json_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        other => Value::String(other.to_string()),
    }
}

impl DataAccess for MemoryDataAccess {
    fn query(&self, statement: &str, _params: &[Value]) -> DataResult<QueryResult> {
        if let Ok(mut statements) = self.statements.write() {
            if statements.len() == STATEMENT_LOG_LIMIT {
                statements.pop_front();
            }
            statements.push_back(statement.to_string());
        }

        let table = self.resolve_table(statement)?;

        let failing = self
            .failing
            .read()
            .map_err(|_| DataError::Unavailable("lock poisoned".to_string()))?;
        if failing.contains(&table) {
            return Err(DataError::Query {
                statement: statement.to_string(),
                cause: format!("table '{}' is unreadable", table),
            });
        }

        let tables = self
            .tables
            .read()
            .map_err(|_| DataError::Unavailable("lock poisoned".to_string()))?;
        tables
            .get(&table)
            .map(|rows| QueryResult::new(rows.clone()))
            .ok_or(DataError::UnknownTable { table })
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }
}
