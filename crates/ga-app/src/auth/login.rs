use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use super::{AuthError, SessionHandle};
use crate::cache::FetchCache;
use ga_core::ports::{AdminApiPort, CredentialStorePort};
use ga_core::AdminUser;

/// Use case for signing an admin in.
///
/// ## Behavior
/// - Moves the session to `Authenticating`
/// - Exchanges email and password for tokens
/// - Refuses accounts whose role is not `admin` or `super_admin`; nothing is stored
/// - Persists the credential, then completes the session and clears any
///   data cached under a previous identity
pub struct Login {
    api: Arc<dyn AdminApiPort>,
    credentials: Arc<dyn CredentialStorePort>,
    session: SessionHandle,
    cache: Arc<FetchCache>,
}

impl Login {
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

    pub async fn execute(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let span = info_span!("usecase.login.execute", email = %email);

        async {
            self.session.begin(email)?;

            let credential = match self.api.login(email, password).await {
                Ok(credential) => credential,
                Err(err) => {
                    warn!(error = %err, "login rejected by backend");
                    self.session.fail();
                    return Err(AuthError::Api(err));
                }
            };

            if !credential.admin.is_admin() {
                warn!(role = %credential.admin.role, "login refused for non-admin role");
                self.session.fail();
                return Err(AuthError::AccessDenied);
            }

            if let Err(err) = self.credentials.save(&credential).await {
                self.session.fail();
                return Err(AuthError::Storage(err));
            }

            let admin = credential.admin.clone();
            self.session.complete(credential)?;
            self.cache.clear();

            info!(admin_id = %admin.id, role = %admin.role, "admin signed in");
            Ok(admin)
        }
        .instrument(span)
        .await
    }
}
