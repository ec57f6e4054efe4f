mod file_store;
mod memory;

pub use file_store::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
