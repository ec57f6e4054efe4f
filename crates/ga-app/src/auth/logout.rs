use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use super::SessionHandle;
use crate::cache::FetchCache;
use ga_core::ports::{AdminApiPort, CredentialStorePort};

/// Use case for signing out.
///
/// Local state is always cleared, even when the backend call fails.
pub struct Logout {
    api: Arc<dyn AdminApiPort>,
    credentials: Arc<dyn CredentialStorePort>,
    session: SessionHandle,
    cache: Arc<FetchCache>,
}

impl Logout {
    pub fn new(
        api: Arc<dyn AdminApiPort>,
        credentials: Arc<dyn CredentialStorePort>,
        session: SessionHandle,
        cache: Arc<FetchCache>,
    ) -> Self {
        Self {
            api,
            credentials,
            session,
            cache,
        }
    }

    /// Returns whether a session was active.
    pub async fn execute(&self) -> bool {
        let span = info_span!("usecase.logout.execute");

        async {
            // Tell the backend first, while the bearer token is still attached.
            let refresh_token = self
                .session
                .credential()
                .and_then(|c| c.refresh_token);
            if let Some(token) = refresh_token {
                if let Err(err) = self.api.logout(&token).await {
                    warn!(error = %err, "backend logout failed, clearing local session anyway");
                }
            }

            let was_signed_in = self.session.revoke().is_some();
            if let Err(err) = self.credentials.clear().await {
                warn!(error = %err, "failed to remove stored credential");
            }
            self.cache.clear();

            info!(was_signed_in, "signed out");
            was_signed_in
        }
        .instrument(span)
        .await
    }
}
