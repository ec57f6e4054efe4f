//! Authentication: the shared session handle, the authorization guard, and
//! the login / logout / restore use cases.

mod guard;
mod login;
mod logout;
mod restore;
mod session;

pub use guard::AuthorizedApi;
pub use login::Login;
pub use logout::Logout;
pub use restore::RestoreSession;
pub use session::SessionHandle;

use ga_core::auth::InvalidTransition;
use ga_core::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Access denied. Admin privileges required.")]
    AccessDenied,

    #[error("session state error: {0}")]
    Session(#[from] InvalidTransition),

    #[error("credential storage failed: {0}")]
    Storage(#[source] anyhow::Error),
}
