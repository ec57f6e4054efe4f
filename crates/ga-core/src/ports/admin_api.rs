use async_trait::async_trait;
use serde_json::Value;

use crate::auth::{AdminUser, Credential};
use crate::error::ApiError;
use crate::ids::RecordId;
use crate::mutation::MutationIntent;
use crate::query::QueryParams;
use crate::resource::{CacheScope, ResourceType};

/// The admin REST backend.
///
/// Read operations return the raw response body; callers pass it through the
/// normalizer. Shapes vary by endpoint, so the port does not pretend otherwise.
#[async_trait]
pub trait AdminApiPort: Send + Sync {
    /// Exchange email and password for tokens. Role checks are the caller's job.
    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError>;

    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError>;

    /// The admin the current bearer token belongs to.
    async fn current_admin(&self) -> Result<AdminUser, ApiError>;

    async fn list(&self, resource: ResourceType, params: &QueryParams) -> Result<Value, ApiError>;

    async fn get(&self, resource: ResourceType, id: &RecordId) -> Result<Value, ApiError>;

    /// Singleton documents: dashboard views, monitoring panels and settings.
    async fn view(&self, scope: CacheScope, params: &QueryParams) -> Result<Value, ApiError>;

    async fn mutate(&self, intent: &MutationIntent) -> Result<Value, ApiError>;
}
