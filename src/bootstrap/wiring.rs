//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - Create infra implementations (HTTP client, credential store, clock) / 创建 infra 层具体实现
//! - Wrap the API port in the authorization guard / 为 API 端口包装授权守卫
//! - Assemble the [`AdminRuntime`] / 组装运行时
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Does not restore sessions or decide what a failed request means
//! - 不恢复会话，不判断请求失败的含义
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Config is validated in `bootstrap::config`
//! - 配置已在 config.rs 校验
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on ga-infra + ga-app simultaneously.**
//! > **这是唯一允许同时依赖 ga-infra 和 ga-app 的地方。**

use std::path::PathBuf;
use std::sync::Arc;

use ga_app::{AdminRuntime, AppDeps, AuthorizedApi, FetchCache, SessionHandle};
use ga_core::ports::{AdminApiPort, ClockPort, CredentialStorePort};
use ga_core::AppConfig;
use ga_infra::fs::default_credentials_path;
use ga_infra::{FileCredentialStore, HttpAdminApi, InMemoryCredentialStore, SystemClock};
use tracing::debug;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),

    #[error("Credential store initialization failed: {0}")]
    CredentialStore(String),
}

/// Where credentials are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStorage {
    File(PathBuf),
    Memory,
}

impl CredentialStorage {
    /// The configured path, else the per-user data dir. `persist = false`
    /// keeps everything in memory.
    pub fn resolve(config: &AppConfig, persist: bool) -> WiringResult<Self> {
        if !persist {
            return Ok(CredentialStorage::Memory);
        }
        match &config.credentials_path {
            Some(path) => Ok(CredentialStorage::File(path.clone())),
            None => default_credentials_path()
                .map(CredentialStorage::File)
                .map_err(|e| WiringError::CredentialStore(e.to_string())),
        }
    }

    fn build(self) -> Arc<dyn CredentialStorePort> {
        match self {
            CredentialStorage::File(path) => {
                debug!(path = %path.display(), "using file credential store");
                Arc::new(FileCredentialStore::new(path))
            }
            CredentialStorage::Memory => Arc::new(InMemoryCredentialStore::new()),
        }
    }
}

/// Assemble the runtime from a validated configuration.
/// 根据已校验的配置组装运行时
pub fn wire_dependencies(config: &AppConfig, persist: bool) -> WiringResult<AdminRuntime> {
    let session = SessionHandle::new();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let cache = Arc::new(FetchCache::new(clock.clone(), config.stale_after()));
    let credentials = CredentialStorage::resolve(config, persist)?.build();

    let http = HttpAdminApi::new(
        config.api_base_url.clone(),
        config.request_timeout(),
        Arc::new(session.clone()),
    )
    .map_err(|e| WiringError::HttpClient(format!("{:#}", e)))?;

    let api: Arc<dyn AdminApiPort> = Arc::new(AuthorizedApi::new(
        Arc::new(http),
        session.clone(),
        credentials.clone(),
        cache.clone(),
    ));

    let deps = AppDeps {
        api,
        credentials,
        clock,
    };
    Ok(AdminRuntime::new(deps, session, cache, config.clone()))
}
