use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::SessionHandle;
use crate::cache::FetchCache;
use ga_core::ports::{AdminApiPort, CredentialStorePort};
use ga_core::{
    AdminUser, ApiError, CacheScope, Credential, MutationIntent, QueryParams, RecordId,
    ResourceType,
};

/// Decorator that turns any 401/403 from the backend into a global logout:
/// the session is revoked, the stored credential removed and the cache
/// cleared. The error is still returned to the caller.
///
/// `login` passes through untouched; a wrong password is not a revoked session.
pub struct AuthorizedApi {
    inner: Arc<dyn AdminApiPort>,
    session: SessionHandle,
    credentials: Arc<dyn CredentialStorePort>,
    cache: Arc<FetchCache>,
}

impl AuthorizedApi {
    pub fn new(
        inner: Arc<dyn AdminApiPort>,
        session: SessionHandle,
        credentials: Arc<dyn CredentialStorePort>,
        cache: Arc<FetchCache>,
    ) -> Self {
        Self {
            inner,
            session,
            credentials,
            cache,
        }
    }

    async fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            if err.is_authorization() {
                self.force_logout(err).await;
            }
        }
        result
    }

    async fn force_logout(&self, cause: &ApiError) {
        let had_session = self.session.revoke().is_some();
        warn!(error = %cause, had_session, "authorization rejected, signing out");
        if let Err(err) = self.credentials.clear().await {
            warn!(error = %err, "failed to clear stored credential");
        }
        self.cache.clear();
    }
}

#[async_trait]
impl AdminApiPort for AuthorizedApi {
    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        self.inner.login(email, password).await
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        self.inner.logout(refresh_token).await
    }

    async fn current_admin(&self) -> Result<AdminUser, ApiError> {
        let result = self.inner.current_admin().await;
        self.guard(result).await
    }

    async fn list(&self, resource: ResourceType, params: &QueryParams) -> Result<Value, ApiError> {
        let result = self.inner.list(resource, params).await;
        self.guard(result).await
    }

    async fn get(&self, resource: ResourceType, id: &RecordId) -> Result<Value, ApiError> {
        let result = self.inner.get(resource, id).await;
        self.guard(result).await
    }

    async fn view(&self, scope: CacheScope, params: &QueryParams) -> Result<Value, ApiError> {
        let result = self.inner.view(scope, params).await;
        self.guard(result).await
    }

    async fn mutate(&self, intent: &MutationIntent) -> Result<Value, ApiError> {
        let result = self.inner.mutate(intent).await;
        self.guard(result).await
    }
}
