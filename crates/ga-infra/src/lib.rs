pub mod config;
pub mod credentials;
pub mod fs;
pub mod http;
pub mod time;

pub use config::load_config;
pub use credentials::{FileCredentialStore, InMemoryCredentialStore};
pub use http::HttpAdminApi;
pub use time::SystemClock;
