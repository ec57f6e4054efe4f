//! Platform settings: a flat key/value document merged over defaults.

mod defaults;
mod diff;
mod normalize;

pub use defaults::{default_settings, SettingsSection};
pub use diff::{SettingChange, SettingsDiff};
pub use normalize::normalize_settings;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const MAINTENANCE_MODE: &str = "maintenance_mode";
pub const MAINTENANCE_MESSAGE: &str = "maintenance_message";

/// Settings as the console sees them: server values layered over defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSettings {
    values: BTreeMap<String, Value>,
}

impl PlatformSettings {
    /// Merge a normalized server map over the defaults.
    pub fn from_server(server: Map<String, Value>) -> Self {
        let mut values = default_settings();
        values.extend(server);
        Self { values }
    }

    /// Settings from a raw response body in either supported shape.
    pub fn from_response(body: &Value) -> Self {
        Self::from_server(normalize_settings(body))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Boolean value; `"true"` / `"false"` strings are accepted.
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Numeric value; numeric strings are accepted.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn maintenance_mode(&self) -> bool {
        self.bool(MAINTENANCE_MODE).unwrap_or(false)
    }

    pub fn maintenance_message(&self) -> Option<&str> {
        self.text(MAINTENANCE_MESSAGE)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Values belonging to one section, as sent in a bulk update.
    pub fn section_values(&self, section: SettingsSection) -> Map<String, Value> {
        section
            .keys()
            .iter()
            .filter_map(|k| self.values.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect()
    }
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            values: default_settings(),
        }
    }
}

/// Parse a console-typed value: booleans and numbers become JSON scalars,
/// everything else stays a string.
pub fn parse_setting_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => trimmed
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| trimmed.parse::<f64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}
