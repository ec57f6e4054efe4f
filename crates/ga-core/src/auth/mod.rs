//! Admin identity and the explicit auth session state machine.

mod session;
mod user;

pub use session::{AuthSession, InvalidTransition};
pub use user::{AdminUser, Credential, ADMIN_ROLES};
