use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use ga_core::auth::Credential;
use ga_core::ports::CredentialStorePort;

/// Stores the signed-in admin's tokens as a JSON file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create credentials dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write to a sibling temp file, then rename over the target, so a crash
    /// never leaves a half-written credential behind.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp credentials failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp credentials to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read credentials failed: {}", self.path.display()))
            }
        };

        let credential: Credential = serde_json::from_str(&content)
            .with_context(|| format!("parse credentials failed: {}", self.path.display()))?;
        Ok(Some(credential))
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let content =
            serde_json::to_string_pretty(credential).context("serialize credentials failed")?;
        self.atomic_write(&content).await?;
        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "credentials removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("remove credentials failed: {}", self.path.display())),
        }
    }
}
