//! Configuration schema declared by handlers, and required-key validation

use crate::settings::{ConfigMap, ConfigValue};
use serde::Serialize;
use std::collections::BTreeMap;

pub type ConfigSchema = BTreeMap<String, FieldSpec>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
    Select,
    Path,
    Date,
}

/// One configuration key a handler understands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub label: String,
    pub field_type: FieldType,
    pub description: String,
    pub required: bool,
    pub default: Option<ConfigValue>,
    /// Allowed values for `Select` fields
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn new(label: &str, field_type: FieldType) -> Self {
        Self {
            label: label.to_string(),
            field_type,
            description: String::new(),
            required: false,
            default: None,
            options: Vec::new(),
        }
    }

    pub fn text(label: &str) -> Self {
        Self::new(label, FieldType::Text)
    }

    pub fn integer(label: &str) -> Self {
        Self::new(label, FieldType::Integer)
    }

    pub fn boolean(label: &str) -> Self {
        Self::new(label, FieldType::Boolean)
    }

    pub fn path(label: &str) -> Self {
        Self::new(label, FieldType::Path)
    }

    pub fn select(label: &str, options: &[&str]) -> Self {
        let mut spec = Self::new(label, FieldType::Select);
        spec.options = options.iter().map(|o| o.to_string()).collect();
        spec
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Result of a configuration check. Validation is a query: problems are
/// collected here, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::from_errors(vec![message.into()])
    }

    /// Every key marked required in `schema` must have a non-empty value in
    /// `config`. Each missing key is reported once, in schema order.
    pub fn check_required(schema: &ConfigSchema, config: &ConfigMap) -> Self {
        let errors = schema
            .iter()
            .filter(|(key, spec)| spec.required && config.is_blank(key))
            .map(|(key, _)| format!("Required configuration missing: {}", key))
            .collect();
        Self::from_errors(errors)
    }
}
