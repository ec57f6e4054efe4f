//! Ports the application layer depends on.

pub mod admin_api;
pub mod clock;
pub mod credentials;
pub mod token_source;

pub use admin_api::AdminApiPort;
pub use clock::ClockPort;
pub use credentials::CredentialStorePort;
pub use token_source::TokenSourcePort;
