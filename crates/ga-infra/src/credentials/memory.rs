use std::sync::Mutex;

use async_trait::async_trait;

use ga_core::auth::Credential;
use ga_core::ports::CredentialStorePort;

/// Credential store that forgets everything on exit. Used with `--no-persist`.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<Option<Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStorePort for InMemoryCredentialStore {
    async fn load(&self) -> anyhow::Result<Option<Credential>> {
        Ok(self.inner.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    async fn save(&self, credential: &Credential) -> anyhow::Result<()> {
        *self.inner.lock().unwrap_or_else(|p| p.into_inner()) = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.inner.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}
