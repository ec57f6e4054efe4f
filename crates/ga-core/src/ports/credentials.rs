use async_trait::async_trait;

use crate::auth::Credential;

/// Persistence for the signed-in admin's tokens.
#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<Credential>>;
    async fn save(&self, credential: &Credential) -> anyhow::Result<()>;
    /// Remove any stored credential. Succeeds when nothing is stored.
    async fn clear(&self) -> anyhow::Result<()>;
}
