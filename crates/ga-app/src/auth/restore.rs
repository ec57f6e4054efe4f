use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use super::{AuthError, SessionHandle};
use ga_core::ports::{AdminApiPort, CredentialStorePort};
use ga_core::AdminUser;

/// Use case for resuming a stored session at startup.
///
/// ## Behavior
/// - No stored credential: stays anonymous
/// - Stored credential: validated with `me`; any failure or a non-admin role
///   discards it
pub struct RestoreSession {
    api: Arc<dyn AdminApiPort>,
    credentials: Arc<dyn CredentialStorePort>,
    session: SessionHandle,
}

impl RestoreSession {
    pub fn new(
        api: Arc<dyn AdminApiPort>,
        credentials: Arc<dyn CredentialStorePort>,
        session: SessionHandle,
    ) -> Self {
        Self {
            api,
            credentials,
            session,
        }
    }

    pub async fn execute(&self) -> Result<Option<AdminUser>, AuthError> {
        let span = info_span!("usecase.restore_session.execute");

        async {
            if self.session.is_authenticated() {
                return Ok(self.session.admin());
            }

            let Some(credential) = self.credentials.load().await.map_err(AuthError::Storage)? else {
                info!("no stored credential");
                return Ok(None);
            };

            self.session.restore(credential)?;

            match self.api.current_admin().await {
                Ok(admin) if admin.is_admin() => {
                    info!(admin_id = %admin.id, "session restored");
                    Ok(Some(admin))
                }
                Ok(admin) => {
                    warn!(role = %admin.role, "stored session is not an admin, discarding");
                    self.discard().await;
                    Ok(None)
                }
                Err(err) => {
                    warn!(error = %err, "stored session rejected, discarding");
                    self.discard().await;
                    Ok(None)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn discard(&self) {
        self.session.revoke();
        if let Err(err) = self.credentials.clear().await {
            warn!(error = %err, "failed to remove stored credential");
        }
    }
}
