//! Opaque configuration map
//!
//! Keys are plain strings that only handlers interpret. Values are TOML
//! scalars or arrays so the same map can be read straight from a
//! configuration file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ConfigValue = toml::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a TOML table, flattening nested tables into dotted keys
    pub fn from_toml(table: &toml::Table) -> Self {
        let mut map = Self::new();
        map.flatten_into("", table);
        map
    }

    fn flatten_into(&mut self, prefix: &str, table: &toml::Table) {
        for (key, value) in table {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                toml::Value::Table(nested) => self.flatten_into(&full_key, nested),
                other => {
                    self.values.insert(full_key, other.clone());
                }
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.values.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// Merge `other` into this map; keys in `other` win
    pub fn merge(&mut self, other: &ConfigMap) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Copy of this map with `overrides` merged on top
    pub fn merged(&self, overrides: &ConfigMap) -> ConfigMap {
        let mut result = self.clone();
        result.merge(overrides);
        result
    }

    /// Entries whose key starts with `prefix`, with the prefix removed
    pub fn strip_prefix(&self, prefix: &str) -> ConfigMap {
        let values = self
            .values
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect();
        ConfigMap { values }
    }

    /// Scalar rendered as a string. Arrays and tables yield `None`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            toml::Value::Datetime(d) => Some(d.to_string()),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            toml::Value::Boolean(b) => Some(*b),
            toml::Value::Integer(i) => Some(*i != 0),
            toml::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            toml::Value::Integer(i) => Some(*i),
            toml::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Sequence value; accepts an array or a comma-joined string
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.values.get(key) {
            Some(toml::Value::Array(items)) => {
                let strings: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect();
                crate::core::strings::split_comma_list(&strings)
            }
            Some(toml::Value::String(s)) => crate::core::strings::split_comma_list(&[s]),
            _ => Vec::new(),
        }
    }

    /// Missing, empty string or empty array
    pub fn is_blank(&self, key: &str) -> bool {
        match self.values.get(key) {
            None => true,
            Some(toml::Value::String(s)) => s.trim().is_empty(),
            Some(toml::Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        }
    }

    /// Parse a `key=value` assignment. Values that parse as TOML keep their
    /// type (`copies=2`, `dry_run=true`), anything else is a string.
    pub fn parse_assignment(assignment: &str) -> Option<(String, ConfigValue)> {
        let (key, raw) = assignment.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let raw = raw.trim();
        let value = format!("v = {}", raw)
            .parse::<toml::Table>()
            .ok()
            .and_then(|mut table| table.remove("v"))
            .unwrap_or_else(|| toml::Value::String(raw.to_string()));
        Some((key.to_string(), value))
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        ConfigMap {
            values: iter.into_iter().collect(),
        }
    }
}
