use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Roles allowed to hold an admin session.
pub const ADMIN_ROLES: [&str; 2] = ["admin", "super_admin"];

/// The signed-in account, as returned by login and `me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
}

impl AdminUser {
    /// Parse a user object. Numeric ids are accepted.
    pub fn from_value(value: &Value) -> Option<Self> {
        let mut obj = value.as_object()?.clone();
        if let Some(Value::Number(n)) = obj.get("id") {
            let id = n.to_string();
            obj.insert("id".to_string(), Value::String(id));
        }
        serde_json::from_value(Value::Object(obj)).ok()
    }

    pub fn is_admin(&self) -> bool {
        ADMIN_ROLES.iter().any(|r| *r == self.role)
    }

    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Tokens plus the admin they were issued to. This is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub admin: AdminUser,
}
