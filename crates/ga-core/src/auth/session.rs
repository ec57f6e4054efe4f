use serde::{Deserialize, Serialize};

use super::{AdminUser, Credential};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} while {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub event: &'static str,
}

/// Session lifecycle: `Anonymous → Authenticating → Authenticated → Anonymous`.
///
/// A stored credential may also be restored directly from `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthSession {
    #[default]
    Anonymous,
    Authenticating {
        email: String,
    },
    Authenticated {
        credential: Credential,
    },
}

impl AuthSession {
    pub fn state_name(&self) -> &'static str {
        match self {
            AuthSession::Anonymous => "anonymous",
            AuthSession::Authenticating { .. } => "authenticating",
            AuthSession::Authenticated { .. } => "authenticated",
        }
    }

    pub fn begin(&mut self, email: impl Into<String>) -> Result<(), InvalidTransition> {
        if let AuthSession::Authenticating { .. } = self {
            return Err(self.invalid("begin login"));
        }
        *self = AuthSession::Authenticating {
            email: email.into(),
        };
        Ok(())
    }

    pub fn complete(&mut self, credential: Credential) -> Result<(), InvalidTransition> {
        match self {
            AuthSession::Authenticating { .. } => {
                *self = AuthSession::Authenticated { credential };
                Ok(())
            }
            _ => Err(self.invalid("complete login")),
        }
    }

    /// A failed login attempt returns to `Anonymous`.
    pub fn fail(&mut self) {
        if let AuthSession::Authenticating { .. } = self {
            *self = AuthSession::Anonymous;
        }
    }

    pub fn restore(&mut self, credential: Credential) -> Result<(), InvalidTransition> {
        match self {
            AuthSession::Anonymous => {
                *self = AuthSession::Authenticated { credential };
                Ok(())
            }
            _ => Err(self.invalid("restore session")),
        }
    }

    /// Drop to `Anonymous`, returning the credential that was held, if any.
    pub fn revoke(&mut self) -> Option<Credential> {
        match std::mem::take(self) {
            AuthSession::Authenticated { credential } => Some(credential),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthSession::Authenticated { .. })
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            AuthSession::Authenticated { credential } => Some(credential),
            _ => None,
        }
    }

    pub fn admin(&self) -> Option<&AdminUser> {
        self.credential().map(|c| &c.admin)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.credential().map(|c| c.access_token.as_str())
    }

    fn invalid(&self, event: &'static str) -> InvalidTransition {
        InvalidTransition {
            from: self.state_name(),
            event,
        }
    }
}
