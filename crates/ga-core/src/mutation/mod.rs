//! Mutation intents, their lifecycle and the invalidation policy.

mod intent;
mod operation;
mod policy;

pub use intent::{IntentError, MutationIntent, MutationStatus};
pub use operation::{MutationOperation, OperationKind, REPORT_ACTIONS};
pub use policy::affected_scopes;
