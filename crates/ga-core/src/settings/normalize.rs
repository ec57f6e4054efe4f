use serde_json::{Map, Value};

use crate::normalize::normalize_object;

const ENVELOPE_KEYS: [&str; 3] = ["success", "message", "data"];

/// Flatten a settings response to `key → value`.
///
/// Accepts `{settings: [{key, value}, ..]}` and a flat object, each optionally
/// wrapped in `data` envelopes. Array entries without a string `key` are
/// skipped. Anything else yields an empty map.
pub fn normalize_settings(value: &Value) -> Map<String, Value> {
    let inner = normalize_object(value);

    match inner.get("settings") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let key = entry.get("key")?.as_str()?;
                let value = entry.get("value").cloned().unwrap_or(Value::Null);
                Some((key.to_string(), value))
            })
            .collect(),
        Some(Value::Object(flat)) => flat.clone(),
        _ => inner
            .into_iter()
            .filter(|(k, _)| !ENVELOPE_KEYS.iter().any(|e| e == k))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_of_pairs() {
        let map = normalize_settings(&json!({
            "data": {"settings": [
                {"key": "maintenance_mode", "value": true, "updatedAt": "2024-03-12"},
                {"value": "orphan"},
                {"key": 5, "value": 1}
            ]}
        }));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("maintenance_mode"), Some(&json!(true)));
    }

    #[test]
    fn test_flat_object_drops_envelope_flags() {
        let map = normalize_settings(&json!({"success": true, "job_expiry_days": 14}));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("job_expiry_days"), Some(&json!(14)));
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(normalize_settings(&json!([1, 2, 3])).is_empty());
        assert!(normalize_settings(&json!(null)).is_empty());
    }
}
