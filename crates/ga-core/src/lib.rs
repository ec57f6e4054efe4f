//! # ga-core
//!
//! Core domain models and contracts for the gigadmin console.
//!
//! This crate contains pure client-side logic without any infrastructure dependencies:
//! resource and query models, the response normalizer, mutation intents with their
//! invalidation policy, the auth session state machine, and the port traits that the
//! application layer depends on.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod monitoring;
pub mod mutation;
pub mod normalize;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod resource;
pub mod settings;

// Re-export commonly used types at the crate root
pub use auth::{AdminUser, AuthSession, Credential};
pub use config::AppConfig;
pub use error::ApiError;
pub use ids::{MutationId, RecordId};
pub use mutation::{MutationIntent, MutationOperation, MutationStatus};
pub use pagination::PaginatedResult;
pub use query::{CacheKey, QueryDescriptor, QueryKey, QueryParams, QueryState};
pub use resource::{CacheScope, DashboardView, MonitoringPanel, ResourceRecord, ResourceType};
pub use settings::PlatformSettings;
