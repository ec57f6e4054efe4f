//! # Configuration Resolution / 配置解析
//!
//! Loading lives in `ga_infra::config`; this module adds the one decision the
//! binary owns: refuse to start with a configuration that cannot work.
//! 加载逻辑在 `ga_infra::config`，此处仅负责启动前的校验。

use std::path::PathBuf;

use anyhow::Context;
use ga_core::AppConfig;

/// Load the effective configuration and validate it.
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = ga_infra::load_config(explicit)?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
