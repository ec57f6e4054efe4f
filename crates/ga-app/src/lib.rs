//! gigadmin application layer
//!
//! Use cases and orchestration on top of the core ports: the shared fetch
//! cache, the mutation executor, the resource browser, and the auth flow.

pub mod auth;
pub mod browser;
pub mod cache;
pub mod deps;
pub mod mutation;
pub mod runtime;
pub mod usecases;

pub use auth::{AuthError, AuthorizedApi, SessionHandle};
pub use browser::{BrowserError, BrowserState, BrowserView, Control, ResourceBrowser};
pub use cache::{CacheEvent, EntrySnapshot, EntryStatus, FetchCache, QueryData};
pub use deps::AppDeps;
pub use mutation::{MutationError, MutationExecutor, MutationOutcome, MutationRecord};
pub use runtime::AdminRuntime;
