//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read the TOML configuration file / 读取 TOML 配置文件
//! - Apply `GIGADMIN_*` environment overrides / 应用环境变量覆盖
//! - Report I/O and parsing errors with context / 报告带上下文的错误
//!
//! ## Prohibited / 禁止事项
//!
//! No validation logic. `AppConfig::validate` runs after loading.
//! 禁止验证逻辑。

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::fs::default_config_path;
use ga_core::config::AppConfig;

pub const ENV_API_URL: &str = "GIGADMIN_API_URL";
pub const ENV_PAGE_SIZE: &str = "GIGADMIN_PAGE_SIZE";
pub const ENV_CREDENTIALS: &str = "GIGADMIN_CREDENTIALS";

/// Load configuration from a TOML file.
/// 从 TOML 文件加载配置
///
/// Keys missing from the file keep their defaults. Nothing is validated.
pub fn load_config_file(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    AppConfig::from_toml(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, the per-user config file is read
/// when present, otherwise defaults are used. Environment overrides apply last.
pub fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_file(&path)?,
        None => match default_config_path() {
            Ok(path) if path.exists() => load_config_file(&path)?,
            Ok(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                AppConfig::default()
            }
            Err(err) => {
                warn!(error = %err, "cannot locate config dir, using defaults");
                AppConfig::default()
            }
        },
    };
    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Overlay `GIGADMIN_*` variables. Unparseable numbers are ignored with a warning.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if let Some(url) = lookup(ENV_API_URL) {
        config.api_base_url = url;
    }
    if let Some(raw) = lookup(ENV_PAGE_SIZE) {
        match raw.trim().parse::<u32>() {
            Ok(size) => config.page_size = size,
            Err(_) => warn!(value = %raw, "ignoring {}: not a number", ENV_PAGE_SIZE),
        }
    }
    if let Some(path) = lookup(ENV_CREDENTIALS) {
        config.credentials_path = Some(PathBuf::from(path));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            api_base_url = "https://api.gighub.test/api/v1"
            page_size = 25
            request_timeout_ms = 5000

            [monitoring]
            logs_secs = 5
            "#,
        );

        let config = load_config_file(file.path()).unwrap();

        assert_eq!(config.api_base_url, "https://api.gighub.test/api/v1");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout(), Duration::from_millis(5000));
        assert_eq!(config.monitoring.logs_secs, Some(5));
        assert_eq!(config.stale_after_ms, AppConfig::default().stale_after_ms);
    }

    #[test]
    fn test_load_config_does_not_validate() {
        let file = write_config("api_base_url = \"\"\npage_size = 0\n");

        let config = load_config_file(file.path()).unwrap();

        assert_eq!(config.api_base_url, "");
        assert_eq!(config.page_size, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let file = write_config("page_size = \"ten\"");
        let err = load_config_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config(Some(PathBuf::from("/this/path/does/not/exist/config.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://staging:3000/api/v1"),
            (ENV_PAGE_SIZE, "50"),
            (ENV_CREDENTIALS, "/tmp/creds.json"),
        ]);

        let config = apply_env_overrides(AppConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });

        assert_eq!(config.api_base_url, "http://staging:3000/api/v1");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.credentials_path, Some(PathBuf::from("/tmp/creds.json")));
    }

    #[test]
    fn test_bad_page_size_override_is_ignored() {
        let config = apply_env_overrides(AppConfig::default(), |k| {
            (k == ENV_PAGE_SIZE).then(|| "lots".to_string())
        });
        assert_eq!(config.page_size, AppConfig::default().page_size);
    }
}
