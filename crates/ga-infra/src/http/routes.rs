//! Route table: which method, path, query and body each port call maps to.
//!
//! Pure functions, no I/O. Paths are relative to the API base URL.

use reqwest::Method;
use serde_json::{json, Map, Value};

use ga_core::mutation::{IntentError, MutationOperation};
use ga_core::{CacheScope, MutationIntent, QueryParams, RecordId, ResourceType};

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl Route {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    fn with_query(mut self, query: &QueryParams) -> Self {
        self.query = query.clone();
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

fn collection(resource: ResourceType) -> String {
    format!("/admin/{}", resource.path_segment())
}

fn item(resource: ResourceType, id: &RecordId) -> String {
    format!("/admin/{}/{}", resource.path_segment(), id)
}

pub fn login(email: &str, password: &str) -> Route {
    Route::new(Method::POST, "/auth/login").with_body(json!({"email": email, "password": password}))
}

pub fn logout(refresh_token: &str) -> Route {
    Route::new(Method::POST, "/auth/logout").with_body(json!({"refreshToken": refresh_token}))
}

pub fn me() -> Route {
    Route::new(Method::GET, "/auth/me")
}

pub fn list(resource: ResourceType, params: &QueryParams) -> Route {
    Route::new(Method::GET, collection(resource)).with_query(params)
}

pub fn get(resource: ResourceType, id: &RecordId) -> Route {
    Route::new(Method::GET, item(resource, id))
}

pub fn view(scope: CacheScope, params: &QueryParams) -> Route {
    let path = match scope {
        CacheScope::Resource(resource) => collection(resource),
        CacheScope::Dashboard(view) => format!("/admin/{}", view.path()),
        CacheScope::Monitoring(panel) => format!("/admin/monitoring/{}", panel.path()),
    };
    Route::new(Method::GET, path).with_query(params)
}

/// Map a mutation to its endpoint. Action endpoints are used whenever the
/// backend offers one, since it attaches side effects to them.
pub fn mutation(intent: &MutationIntent) -> Result<Route, IntentError> {
    intent.validate()?;
    let resource = intent.resource;
    let target = || target_of(intent);

    let route = match &intent.operation {
        MutationOperation::UpdateStatus { status, reason } => {
            let id = target()?;
            match resource {
                ResourceType::Users => user_status(id, status, reason.as_deref()),
                _ => Route::new(Method::PATCH, format!("{}/status", item(resource, id)))
                    .with_body(json!({"status": status})),
            }
        }
        MutationOperation::Delete => Route::new(Method::DELETE, item(resource, target()?)),
        MutationOperation::Create { payload } => {
            Route::new(Method::POST, collection(resource)).with_body(payload.clone())
        }
        MutationOperation::Update { payload } => {
            Route::new(Method::PUT, item(resource, target()?)).with_body(payload.clone())
        }
        MutationOperation::Resolve { resolution, action } => {
            Route::new(Method::POST, format!("{}/action", item(resource, target()?)))
                .with_body(json!({"resolution": resolution, "action": action}))
        }
        MutationOperation::Approve => {
            Route::new(Method::POST, format!("{}/approve", item(resource, target()?)))
        }
        MutationOperation::Reject { reason } => {
            Route::new(Method::POST, format!("{}/reject", item(resource, target()?)))
                .with_body(json!({"reason": reason}))
        }
        MutationOperation::Suspend { reason } => {
            Route::new(Method::POST, format!("{}/suspend", item(resource, target()?)))
                .with_body(json!({"reason": reason}))
        }
        MutationOperation::Unsuspend => {
            Route::new(Method::POST, format!("{}/unsuspend", item(resource, target()?)))
        }
        MutationOperation::Ban { reason } => {
            Route::new(Method::POST, format!("{}/ban", item(resource, target()?)))
                .with_body(json!({"reason": reason}))
        }
        MutationOperation::Reorder { order } => {
            let categories: Vec<Value> = order
                .iter()
                .map(|(id, position)| json!({"id": id.as_str(), "order": position}))
                .collect();
            Route::new(Method::POST, format!("{}/reorder", collection(resource)))
                .with_body(json!({"categories": categories}))
        }
        MutationOperation::UpdateSettings { values } => {
            Route::new(Method::PUT, collection(resource)).with_body(Value::Object(values.clone()))
        }
        MutationOperation::ToggleMaintenance { enabled, message } => {
            let mut body = Map::new();
            body.insert("enabled".to_string(), json!(enabled));
            if let Some(message) = message {
                body.insert("message".to_string(), json!(message));
            }
            Route::new(Method::POST, format!("{}/maintenance", collection(resource)))
                .with_body(Value::Object(body))
        }
    };
    Ok(route)
}

fn target_of(intent: &MutationIntent) -> Result<&RecordId, IntentError> {
    intent.target.as_ref().ok_or(IntentError::MissingTarget {
        resource: intent.resource,
        operation: intent.kind(),
    })
}

/// Status changes on users go through the matching action endpoint when one exists.
fn user_status(id: &RecordId, status: &str, reason: Option<&str>) -> Route {
    let base = item(ResourceType::Users, id);
    let reason = reason.unwrap_or_default();
    match status {
        "suspended" => Route::new(Method::POST, format!("{base}/suspend"))
            .with_body(json!({"reason": reason})),
        "active" => Route::new(Method::POST, format!("{base}/unsuspend")),
        "banned" => {
            Route::new(Method::POST, format!("{base}/ban")).with_body(json!({"reason": reason}))
        }
        other => Route::new(Method::PATCH, base).with_body(json!({"status": other})),
    }
}
