//! Runtime: shared state plus factories for use cases and browsers.

use std::sync::Arc;

use crate::auth::{Login, Logout, RestoreSession, SessionHandle};
use crate::browser::{BrowserError, ResourceBrowser};
use crate::cache::FetchCache;
use crate::deps::AppDeps;
use crate::mutation::MutationExecutor;
use crate::usecases::{
    GetRecord, GetSettings, LoadDashboard, LoadMonitoringPanel, MonitoringPoller,
    ToggleMaintenance, UpdateSettings,
};
use ga_core::{AppConfig, ResourceType};

/// Everything a running console shares: the ports, the session, the cache
/// and the mutation executor. Use cases are created on demand.
pub struct AdminRuntime {
    deps: AppDeps,
    session: SessionHandle,
    cache: Arc<FetchCache>,
    executor: Arc<MutationExecutor>,
    config: AppConfig,
}

impl AdminRuntime {
    pub fn new(deps: AppDeps, session: SessionHandle, cache: Arc<FetchCache>, config: AppConfig) -> Self {
        let executor = Arc::new(MutationExecutor::new(deps.api.clone(), cache.clone()));
        Self {
            deps,
            session,
            cache,
            executor,
            config,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn cache(&self) -> &Arc<FetchCache> {
        &self.cache
    }

    pub fn executor(&self) -> &Arc<MutationExecutor> {
        &self.executor
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn browser(&self, resource: ResourceType) -> Result<ResourceBrowser, BrowserError> {
        ResourceBrowser::new(
            resource,
            self.config.page_size,
            self.deps.api.clone(),
            self.cache.clone(),
            self.executor.clone(),
        )
    }

    pub fn login(&self) -> Login {
        Login::new(
            self.deps.api.clone(),
            self.deps.credentials.clone(),
            self.session.clone(),
            self.cache.clone(),
        )
    }

    pub fn logout(&self) -> Logout {
        Logout::new(
            self.deps.api.clone(),
            self.deps.credentials.clone(),
            self.session.clone(),
            self.cache.clone(),
        )
    }

    pub fn restore_session(&self) -> RestoreSession {
        RestoreSession::new(
            self.deps.api.clone(),
            self.deps.credentials.clone(),
            self.session.clone(),
        )
    }

    pub fn get_record(&self) -> GetRecord {
        GetRecord::new(self.deps.api.clone(), self.cache.clone())
    }

    pub fn load_dashboard(&self) -> LoadDashboard {
        LoadDashboard::new(self.deps.api.clone(), self.cache.clone())
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.deps.api.clone(), self.cache.clone())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.deps.api.clone(), self.cache.clone(), self.executor.clone())
    }

    pub fn toggle_maintenance(&self) -> ToggleMaintenance {
        ToggleMaintenance::new(self.executor.clone())
    }

    pub fn load_monitoring_panel(&self) -> LoadMonitoringPanel {
        LoadMonitoringPanel::new(self.deps.api.clone(), self.cache.clone())
    }

    pub fn monitoring_poller(&self) -> MonitoringPoller {
        MonitoringPoller::new(
            Arc::new(self.load_monitoring_panel()),
            self.cache.clone(),
            self.config.monitoring.clone(),
        )
    }
}
