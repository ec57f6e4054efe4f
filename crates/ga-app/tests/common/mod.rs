//! In-memory backend and stores shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use ga_app::{AppDeps, AdminRuntime, FetchCache, SessionHandle};
use ga_core::ports::{AdminApiPort, ClockPort, CredentialStorePort};
use ga_core::{
    AdminUser, ApiError, AppConfig, CacheScope, Credential, DashboardView, MonitoringPanel,
    MutationIntent, MutationOperation, QueryParams, RecordId, ResourceType,
};

pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: AtomicI64::new(1_700_000_000_000),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct MemoryCredentials {
    stored: Mutex<Option<Credential>>,
}

impl MemoryCredentials {
    pub fn with(credential: Credential) -> Self {
        Self {
            stored: Mutex::new(Some(credential)),
        }
    }

    pub fn current(&self) -> Option<Credential> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStorePort for MemoryCredentials {
    async fn load(&self) -> anyhow::Result<Option<Credential>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, credential: &Credential) -> anyhow::Result<()> {
        *self.stored.lock().unwrap() = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

pub fn admin(role: &str) -> AdminUser {
    AdminUser {
        id: "admin-1".to_string(),
        email: "ops@gighub.test".to_string(),
        first_name: "Dana".to_string(),
        last_name: "Okafor".to_string(),
        role: role.to_string(),
    }
}

pub fn credential(role: &str) -> Credential {
    Credential {
        access_token: "access-1".to_string(),
        refresh_token: Some("refresh-1".to_string()),
        admin: admin(role),
    }
}

/// Backend double holding jobs, users, reports and settings in memory.
///
/// List responses use the `{success, data: {<resource>: [..], pagination}}`
/// envelope; the stats view counts live rows so mutations show up in it.
pub struct FakeBackend {
    jobs: Mutex<Vec<Value>>,
    users: Mutex<Vec<Value>>,
    reports: Mutex<Vec<Value>>,
    settings: Mutex<Map<String, Value>>,
    pub list_calls: AtomicUsize,
    pub view_calls: AtomicUsize,
    pub mutate_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub fail_mutations: AtomicBool,
    pub fail_logout: AtomicBool,
    /// Every read and write answers 401 while set.
    pub unauthorized: AtomicBool,
    pub login_role: Mutex<String>,
    pub me: Mutex<Result<AdminUser, ApiError>>,
    /// Artificial latency for list and mutate calls.
    pub delay: Mutex<Duration>,
    /// Extra latency for list calls whose search term matches.
    pub slow_search: Mutex<Option<(String, Duration)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            reports: Mutex::new(Vec::new()),
            settings: Mutex::new(Map::new()),
            list_calls: AtomicUsize::new(0),
            view_calls: AtomicUsize::new(0),
            mutate_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            fail_mutations: AtomicBool::new(false),
            fail_logout: AtomicBool::new(false),
            unauthorized: AtomicBool::new(false),
            login_role: Mutex::new("admin".to_string()),
            me: Mutex::new(Ok(admin("admin"))),
            delay: Mutex::new(Duration::ZERO),
            slow_search: Mutex::new(None),
        }
    }

    pub fn with_jobs(self, jobs: &[(&str, &str, &str)]) -> Self {
        *self.jobs.lock().unwrap() = jobs
            .iter()
            .map(|(id, title, status)| json!({"id": id, "title": title, "status": status}))
            .collect();
        self
    }

    pub fn with_users(self, users: &[(&str, &str)]) -> Self {
        *self.users.lock().unwrap() = users
            .iter()
            .map(|(id, status)| json!({"id": id, "firstName": "User", "lastName": id, "status": status}))
            .collect();
        self
    }

    pub fn with_reports(self, reports: &[(&str, &str)]) -> Self {
        *self.reports.lock().unwrap() = reports
            .iter()
            .map(|(id, reported)| json!({"id": id, "reportedUserId": reported, "status": "pending"}))
            .collect();
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = delay;
        self
    }

    pub fn job_status(&self, id: &str) -> Option<String> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j["id"] == id)
            .and_then(|j| j["status"].as_str().map(str::to_string))
    }

    pub fn user_status(&self, id: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u["id"] == id)
            .and_then(|u| u["status"].as_str().map(str::to_string))
    }

    fn check_auth(&self) -> Result<(), ApiError> {
        if self.unauthorized.load(Ordering::SeqCst) {
            Err(ApiError::Unauthorized)
        } else {
            Ok(())
        }
    }

    async fn pause(&self, search: Option<&str>) {
        let mut delay = *self.delay.lock().unwrap();
        if let (Some(term), Some((slow, extra))) = (search, self.slow_search.lock().unwrap().clone()) {
            if term == slow {
                delay += extra;
            }
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn rows(&self, resource: ResourceType) -> Vec<Value> {
        match resource {
            ResourceType::Jobs => self.jobs.lock().unwrap().clone(),
            ResourceType::Users => self.users.lock().unwrap().clone(),
            ResourceType::Reports => self.reports.lock().unwrap().clone(),
            _ => Vec::new(),
        }
    }

    fn set_status(rows: &Mutex<Vec<Value>>, id: &RecordId, status: &str) -> Result<(), ApiError> {
        let mut rows = rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r["id"] == id.as_str())
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        row["status"] = json!(status);
        Ok(())
    }
}

fn target(intent: &MutationIntent) -> Result<&RecordId, ApiError> {
    intent.target.as_ref().ok_or(ApiError::Validation {
        status: 400,
        message: "missing id".to_string(),
    })
}

#[async_trait]
impl AdminApiPort for FakeBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<Credential, ApiError> {
        let role = self.login_role.lock().unwrap().clone();
        let mut credential = credential(&role);
        credential.admin.email = email.to_string();
        Ok(credential)
    }

    async fn logout(&self, _refresh_token: &str) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(())
    }

    async fn current_admin(&self) -> Result<AdminUser, ApiError> {
        self.check_auth()?;
        self.me.lock().unwrap().clone()
    }

    async fn list(&self, resource: ResourceType, params: &QueryParams) -> Result<Value, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(params.get("search").map(String::as_str)).await;
        self.check_auth()?;

        let status = params.get("status");
        let search = params.get("search").map(|s| s.to_lowercase());
        let matching: Vec<Value> = self
            .rows(resource)
            .into_iter()
            .filter(|r| status.map_or(true, |s| r["status"] == s.as_str()))
            .filter(|r| {
                search.as_ref().map_or(true, |term| {
                    r["title"]
                        .as_str()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(term)
                })
            })
            .collect();

        let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
        let total = matching.len();
        let items: Vec<Value> = matching.into_iter().skip((page - 1) * limit).take(limit).collect();

        let mut data = Map::new();
        data.insert(resource.collection_key().to_string(), Value::Array(items));
        data.insert(
            "pagination".to_string(),
            json!({"page": page, "limit": limit, "total": total, "totalPages": total.div_ceil(limit)}),
        );
        Ok(json!({"success": true, "data": data}))
    }

    async fn get(&self, resource: ResourceType, id: &RecordId) -> Result<Value, ApiError> {
        self.check_auth()?;
        let row = self
            .rows(resource)
            .into_iter()
            .find(|r| r["id"] == id.as_str())
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        Ok(json!({"success": true, "data": {resource.singular(): row}}))
    }

    async fn view(&self, scope: CacheScope, _params: &QueryParams) -> Result<Value, ApiError> {
        self.view_calls.fetch_add(1, Ordering::SeqCst);
        self.check_auth()?;
        match scope {
            CacheScope::Dashboard(DashboardView::Stats) => {
                let jobs = self.jobs.lock().unwrap();
                let users = self.users.lock().unwrap();
                let active_jobs = jobs.iter().filter(|j| j["status"] == "active").count();
                let active_users = users.iter().filter(|u| u["status"] == "active").count();
                Ok(json!({"success": true, "data": {
                    "totalUsers": users.len(),
                    "activeUsers": active_users,
                    "totalJobs": jobs.len(),
                    "activeJobs": active_jobs,
                }}))
            }
            CacheScope::Dashboard(DashboardView::Chart) => Ok(json!({"success": true, "data": [
                {"date": "2024-03-01", "users": 3, "jobs": 2, "applications": 5}
            ]})),
            CacheScope::Dashboard(_) => Ok(json!({"success": true, "data": []})),
            CacheScope::Resource(ResourceType::Settings) => {
                let settings: Vec<Value> = self
                    .settings
                    .lock()
                    .unwrap()
                    .iter()
                    .map(|(k, v)| json!({"key": k, "value": v}))
                    .collect();
                Ok(json!({"success": true, "data": {"settings": settings}}))
            }
            CacheScope::Monitoring(MonitoringPanel::System) => Ok(json!({"success": true, "data": {
                "cpu": {"usage": 12.5, "cores": 4},
                "memory": {"used": 256, "total": 1024, "percentage": 25},
            }})),
            other => Err(ApiError::NotFound(other.to_string())),
        }
    }

    async fn mutate(&self, intent: &MutationIntent) -> Result<Value, ApiError> {
        self.mutate_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(None).await;
        self.check_auth()?;
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Server {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }

        match (&intent.resource, &intent.operation) {
            (ResourceType::Jobs, MutationOperation::Approve) => {
                Self::set_status(&self.jobs, target(intent)?, "active")?
            }
            (ResourceType::Jobs, MutationOperation::Reject { .. }) => {
                Self::set_status(&self.jobs, target(intent)?, "rejected")?
            }
            (ResourceType::Users, MutationOperation::Ban { .. }) => {
                Self::set_status(&self.users, target(intent)?, "banned")?
            }
            (ResourceType::Reports, MutationOperation::Resolve { action, .. }) => {
                let id = target(intent)?;
                Self::set_status(&self.reports, id, "resolved")?;
                if action == "ban" {
                    let reported = self
                        .reports
                        .lock()
                        .unwrap()
                        .iter()
                        .find(|r| r["id"] == id.as_str())
                        .and_then(|r| r["reportedUserId"].as_str().map(str::to_string));
                    if let Some(user) = reported {
                        Self::set_status(&self.users, &RecordId::new(user), "banned")?;
                    }
                }
            }
            (ResourceType::Settings, MutationOperation::UpdateSettings { values }) => {
                let mut settings = self.settings.lock().unwrap();
                for (k, v) in values {
                    settings.insert(k.clone(), v.clone());
                }
            }
            (ResourceType::Settings, MutationOperation::ToggleMaintenance { enabled, message }) => {
                let mut settings = self.settings.lock().unwrap();
                settings.insert("maintenance_mode".to_string(), json!(enabled));
                if let Some(message) = message {
                    settings.insert("maintenance_message".to_string(), json!(message));
                }
            }
            _ => {}
        }
        Ok(json!({"success": true, "message": "ok"}))
    }
}

pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub credentials: Arc<MemoryCredentials>,
    pub clock: Arc<ManualClock>,
    pub runtime: AdminRuntime,
}

impl Harness {
    /// Runtime wired like production: the backend behind the authorization guard.
    pub fn new(backend: FakeBackend, credentials: MemoryCredentials) -> Self {
        let backend = Arc::new(backend);
        let credentials = Arc::new(credentials);
        let clock = Arc::new(ManualClock::new());
        let config = AppConfig::default();
        let cache = Arc::new(FetchCache::new(clock.clone(), config.stale_after()));
        let session = SessionHandle::new();
        let api = Arc::new(ga_app::AuthorizedApi::new(
            backend.clone(),
            session.clone(),
            credentials.clone(),
            cache.clone(),
        ));
        let deps = AppDeps {
            api,
            credentials: credentials.clone(),
            clock: clock.clone(),
        };
        let runtime = AdminRuntime::new(deps, session, cache, config);
        Self {
            backend,
            credentials,
            clock,
            runtime,
        }
    }

    pub fn signed_in(backend: FakeBackend) -> Self {
        let harness = Self::new(backend, MemoryCredentials::with(credential("admin")));
        harness
            .runtime
            .session()
            .restore(credential("admin"))
            .unwrap();
        harness
    }

    pub fn list_calls(&self) -> usize {
        self.backend.list_calls.load(Ordering::SeqCst)
    }

    pub fn view_calls(&self) -> usize {
        self.backend.view_calls.load(Ordering::SeqCst)
    }
}

pub fn twelve_jobs() -> FakeBackend {
    let jobs: Vec<(String, String, &str)> = (1..=12)
        .map(|i| (format!("job-{i:02}"), format!("Job {i}"), "active"))
        .collect();
    let refs: Vec<(&str, &str, &str)> = jobs
        .iter()
        .map(|(id, title, status)| (id.as_str(), title.as_str(), *status))
        .collect();
    FakeBackend::new().with_jobs(&refs)
}
