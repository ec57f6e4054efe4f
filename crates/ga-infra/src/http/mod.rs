//! HTTP adapter for the admin REST backend.

mod client;
pub mod routes;

pub use client::HttpAdminApi;
pub use routes::Route;
