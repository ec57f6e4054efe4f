//! Error taxonomy for calls against the admin backend.

use serde_json::Value;

/// How the console should react to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Page-level "request failed", retryable by the user.
    Network,
    /// Forces a global logout.
    Authorization,
    /// Shown inline next to the control that triggered it.
    Validation,
    /// Response could not be interpreted.
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("session expired or invalid")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("{message}")]
    Validation { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("access denied: {0}")]
    AccessDenied(String),
}

impl ApiError {
    /// Map a non-success HTTP status and its body.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = error_message(body).unwrap_or_else(|| default_message(status).to_string());
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            400 | 409 | 422 => ApiError::Validation { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Transport(_) | ApiError::Server { .. } => ErrorClass::Network,
            ApiError::Unauthorized | ApiError::Forbidden(_) | ApiError::AccessDenied(_) => {
                ErrorClass::Authorization
            }
            ApiError::Validation { .. } | ApiError::NotFound(_) => ErrorClass::Validation,
            ApiError::Decode(_) => ErrorClass::Parse,
        }
    }

    /// 401 and 403 from the backend invalidate the session.
    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The backend's own message: `message`, `error`, `error.message` or `data.message`.
pub fn error_message(body: &Value) -> Option<String> {
    let candidates = [
        body.get("message"),
        body.get("error").filter(|e| e.is_string()),
        body.get("error").and_then(|e| e.get("message")),
        body.get("data").and_then(|d| d.get("message")),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        403 => "forbidden",
        404 => "not found",
        409 => "conflict",
        422 => "validation failed",
        500..=599 => "internal server error",
        _ => "request failed",
    }
}
