//! Run results bookkeeping

use crate::handler::ExecutionResult;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Results of one batch run, in execution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResults {
    entries: Vec<(String, ExecutionResult)>,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str, result: ExecutionResult) {
        self.entries.push((name.to_string(), result));
    }

    pub fn get(&self, name: &str) -> Option<&ExecutionResult> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, result)| result)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExecutionResult)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|(_, result)| result.success)
    }

    pub fn failed(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, result)| !result.success)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary::from_results(self.entries.iter().map(|(_, result)| result))
    }
}

impl Serialize for BatchResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// Totals derived from a set of results
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_rows: u64,
    pub total_files: usize,
    pub total_time: f64,
}

impl ResultsSummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ExecutionResult>) -> Self {
        results
            .into_iter()
            .fold(ResultsSummary::default(), |mut summary, result| {
                summary.total += 1;
                if result.success {
                    summary.successful += 1;
                } else {
                    summary.failed += 1;
                }
                summary.total_rows += result.rows_processed;
                summary.total_files += result.files_produced.len();
                summary.total_time += result.execution_time_seconds;
                summary
            })
    }
}
