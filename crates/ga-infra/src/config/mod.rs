mod loader;

pub use loader::{apply_env_overrides, load_config, load_config_file, ENV_API_URL, ENV_CREDENTIALS, ENV_PAGE_SIZE};
