use super::error::DataResult;
use super::value::{Row, Value};
use std::collections::VecDeque;

/// Cursor over the rows produced by one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    rows: VecDeque<Row>,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }

    /// Rows not yet fetched
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn next_row(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }
}

/// Data-access collaborator shared across all handlers of one process.
///
/// Implementations must be safe to share; handlers never get exclusive
/// ownership of it.
pub trait DataAccess: Send + Sync {
    /// Run a statement with positional parameters
    fn query(&self, statement: &str, params: &[Value]) -> DataResult<QueryResult>;

    /// Next row of a result, `None` once exhausted
    fn fetch(&self, result: &mut QueryResult) -> Option<Row> {
        result.next_row()
    }

    /// Escape a value for inclusion in a statement
    fn escape(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Prefix prepended to every table name
    fn table_prefix(&self) -> &str;

    /// Run a statement and drain every row
    fn fetch_all(&self, statement: &str, params: &[Value]) -> DataResult<Vec<Row>> {
        let mut result = self.query(statement, params)?;
        let mut rows = Vec::with_capacity(result.remaining());
        while let Some(row) = self.fetch(&mut result) {
            rows.push(row);
        }
        Ok(rows)
    }
}
