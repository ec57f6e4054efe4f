//! # Application Dependencies
//!
//! Dependency grouping for runtime construction. Not a builder: no build
//! steps, no defaults, no hidden logic.

use std::sync::Arc;

use ga_core::ports::{AdminApiPort, ClockPort, CredentialStorePort};

/// All ports the runtime needs. Every field is required.
///
/// `api` is expected to already be wrapped in [`crate::AuthorizedApi`].
pub struct AppDeps {
    pub api: Arc<dyn AdminApiPort>,
    pub credentials: Arc<dyn CredentialStorePort>,
    pub clock: Arc<dyn ClockPort>,
}
