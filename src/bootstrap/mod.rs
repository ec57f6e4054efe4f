//! Startup: configuration, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::resolve_config;
pub use tracing::init_tracing_subscriber;
pub use wiring::{wire_dependencies, WiringError, WiringResult};
