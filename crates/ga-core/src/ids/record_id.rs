use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Server-assigned identifier of a resource record.
///
/// The backend issues ids as strings (UUIDs) for most resources, but some
/// endpoints return numeric ids; both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Read an id out of a JSON value. Empty strings are not ids.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_id_from_json_accepts_strings_and_numbers() {
        assert_eq!(
            RecordId::from_json(&json!("job-1")),
            Some(RecordId::from("job-1"))
        );
        assert_eq!(RecordId::from_json(&json!(42)), Some(RecordId::from("42")));
    }

    #[test]
    fn test_record_id_from_json_rejects_blank_and_other_types() {
        assert_eq!(RecordId::from_json(&json!("  ")), None);
        assert_eq!(RecordId::from_json(&json!(null)), None);
        assert_eq!(RecordId::from_json(&json!({"id": "x"})), None);
    }
}
