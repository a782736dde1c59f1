//! Handler metadata and execution results

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

pub const DEFAULT_CATEGORY: &str = "uncategorized";
pub const DEFAULT_PRIORITY: i32 = 100;
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Format of the files a handler produces
#[derive(EnumIter, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Csv,
    Pdf,
    /// Pushed straight to a remote system, no file
    Direct,
    #[default]
    Unknown,
}

impl OutputType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Direct => "direct",
            Self::Unknown => "unknown",
        }
    }

    /// Look up by tag, falling back to `Unknown`
    pub fn from_name(name: &str) -> Self {
        use strum::IntoEnumIterator;

        OutputType::iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static self-description of a handler type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerMetadata {
    /// Unique slug, e.g. "square"
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub output_type: OutputType,
    /// Lower runs and displays first
    pub priority: i32,
    pub requires_config: bool,
    pub version: String,
    pub author: String,
}

impl HandlerMetadata {
    pub fn new(name: &str, title: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            output_type: OutputType::Unknown,
            priority: DEFAULT_PRIORITY,
            requires_config: false,
            version: DEFAULT_VERSION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn requires_config(mut self, requires_config: bool) -> Self {
        self.requires_config = requires_config;
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    /// Names of required fields (`name`, `title`, `description`) that are blank
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("title", &self.title),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Fill blank optional fields with their defaults
    pub fn with_defaults(mut self) -> Self {
        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_string();
        }
        if self.version.trim().is_empty() {
            self.version = DEFAULT_VERSION.to_string();
        }
        if self.author.trim().is_empty() {
            self.author = DEFAULT_AUTHOR.to_string();
        }
        self
    }
}

/// Outcome of one handler run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Stamped by the orchestrator
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub handler: String,
    pub success: bool,
    pub rows_processed: u64,
    pub files_produced: Vec<String>,
    pub message: String,
    pub execution_time_seconds: f64,
}

impl ExecutionResult {
    pub fn success(rows_processed: u64, files_produced: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            rows_processed,
            files_produced,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn stamped(mut self, handler: &str, execution_time_seconds: f64) -> Self {
        self.handler = handler.to_string();
        self.execution_time_seconds = execution_time_seconds;
        self
    }
}
