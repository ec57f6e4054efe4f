use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ga_core::auth::InvalidTransition;
use ga_core::ports::TokenSourcePort;
use ga_core::{AdminUser, AuthSession, Credential};

/// Process-wide handle to the [`AuthSession`], injected wherever the session
/// is read or changed. Cloning shares the same session.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<AuthSession>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> AuthSession {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn admin(&self) -> Option<AdminUser> {
        self.read().admin().cloned()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.read().credential().cloned()
    }

    pub fn begin(&self, email: &str) -> Result<(), InvalidTransition> {
        self.write().begin(email)
    }

    pub fn complete(&self, credential: Credential) -> Result<(), InvalidTransition> {
        self.write().complete(credential)
    }

    pub fn fail(&self) {
        self.write().fail()
    }

    pub fn restore(&self, credential: Credential) -> Result<(), InvalidTransition> {
        self.write().restore(credential)
    }

    pub fn revoke(&self) -> Option<Credential> {
        self.write().revoke()
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthSession> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthSession> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenSourcePort for SessionHandle {
    fn bearer_token(&self) -> Option<String> {
        self.read().bearer_token().map(str::to_string)
    }
}
