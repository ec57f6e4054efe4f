use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceType;
use crate::ids::RecordId;

/// Opaque server entity. Only `id` and `status` are interpreted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: RecordId,
    pub status: Option<String>,
    pub fields: Map<String, Value>,
}

impl ResourceRecord {
    /// Build a record from a JSON object. Returns `None` when the value is not
    /// an object or has no usable `id`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id").and_then(RecordId::from_json)?;
        let status = obj
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Self {
            id,
            status,
            fields: obj.clone(),
        })
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String field, or a nested one with a dotted path such as `job.title`.
    pub fn text(&self, path: &str) -> Option<&str> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.fields.get(first)?;
        for part in parts {
            current = current.get(part)?;
        }
        current.as_str().filter(|s| !s.is_empty())
    }

    pub fn number(&self, path: &str) -> Option<f64> {
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        match current {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Human label for list rows and confirmations.
    pub fn display_label(&self, resource: ResourceType) -> String {
        let label = match resource {
            ResourceType::Users => self.person_name("").or_else(|| self.owned("email")),
            ResourceType::Jobs => self.owned("title"),
            ResourceType::Applications => {
                let applicant = self
                    .person_name("applicant.")
                    .or_else(|| self.person_name("worker."));
                let job = self.owned("job.title");
                match (applicant, job) {
                    (Some(a), Some(j)) => Some(format!("{} - {}", a, j)),
                    (a, j) => a.or(j),
                }
            }
            ResourceType::Categories | ResourceType::Skills => self.owned("name"),
            ResourceType::Reports => self.owned("reason"),
            ResourceType::Settings => None,
        };
        label.unwrap_or_else(|| self.id.to_string())
    }

    fn owned(&self, path: &str) -> Option<String> {
        self.text(path).map(str::to_string)
    }

    fn person_name(&self, prefix: &str) -> Option<String> {
        let first = self.text(&format!("{}firstName", prefix));
        let last = self.text(&format!("{}lastName", prefix));
        match (first, last) {
            (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
            (Some(n), None) | (None, Some(n)) => Some(n.to_string()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_id() {
        assert!(ResourceRecord::from_value(&json!({"title": "no id"})).is_none());
        assert!(ResourceRecord::from_value(&json!("x")).is_none());

        let record = ResourceRecord::from_value(&json!({"id": 7, "status": "pending"})).unwrap();
        assert_eq!(record.id.as_str(), "7");
        assert_eq!(record.status.as_deref(), Some("pending"));
    }

    #[test]
    fn test_display_labels() {
        let user = ResourceRecord::from_value(
            &json!({"id": "u1", "firstName": "Ada", "lastName": "Lovelace"}),
        )
        .unwrap();
        assert_eq!(user.display_label(ResourceType::Users), "Ada Lovelace");

        let app = ResourceRecord::from_value(&json!({
            "id": "a1",
            "applicant": {"firstName": "Sam"},
            "job": {"title": "Barista"}
        }))
        .unwrap();
        assert_eq!(app.display_label(ResourceType::Applications), "Sam - Barista");

        let bare = ResourceRecord::from_value(&json!({"id": "r9"})).unwrap();
        assert_eq!(bare.display_label(ResourceType::Reports), "r9");
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let job = ResourceRecord::from_value(&json!({"id": "j", "payAmount": "12.5"})).unwrap();
        assert_eq!(job.number("payAmount"), Some(12.5));
    }
}
