use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::ResourceType;

/// Dashboard endpoints, each cached independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    Stats,
    Chart,
    Activity,
    TopEmployers,
}

impl DashboardView {
    pub const ALL: [DashboardView; 4] = [
        DashboardView::Stats,
        DashboardView::Chart,
        DashboardView::Activity,
        DashboardView::TopEmployers,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            DashboardView::Stats => "dashboard",
            DashboardView::Chart => "chart",
            DashboardView::Activity => "activity",
            DashboardView::TopEmployers => "top-employers",
        }
    }
}

/// Monitoring panels with their own refresh cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringPanel {
    System,
    ApiMetrics,
    Endpoints,
    Errors,
    Queries,
    Logs,
}

impl MonitoringPanel {
    pub const ALL: [MonitoringPanel; 6] = [
        MonitoringPanel::System,
        MonitoringPanel::ApiMetrics,
        MonitoringPanel::Endpoints,
        MonitoringPanel::Errors,
        MonitoringPanel::Queries,
        MonitoringPanel::Logs,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            MonitoringPanel::System => "system",
            MonitoringPanel::ApiMetrics => "api-metrics",
            MonitoringPanel::Endpoints => "endpoints",
            MonitoringPanel::Errors => "errors",
            MonitoringPanel::Queries => "queries",
            MonitoringPanel::Logs => "logs",
        }
    }

    /// Default polling interval for the panel.
    pub fn default_refresh(&self) -> Duration {
        let secs = match self {
            MonitoringPanel::ApiMetrics => 15,
            MonitoringPanel::System | MonitoringPanel::Endpoints | MonitoringPanel::Errors => 30,
            MonitoringPanel::Queries => 60,
            MonitoringPanel::Logs => 10,
        };
        Duration::from_secs(secs)
    }
}

/// Invalidation channel a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CacheScope {
    Resource(ResourceType),
    Dashboard(DashboardView),
    Monitoring(MonitoringPanel),
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheScope::Resource(r) => write!(f, "resource:{}", r),
            CacheScope::Dashboard(v) => write!(f, "dashboard:{}", v.path()),
            CacheScope::Monitoring(p) => write!(f, "monitoring:{}", p.path()),
        }
    }
}

impl From<ResourceType> for CacheScope {
    fn from(resource: ResourceType) -> Self {
        CacheScope::Resource(resource)
    }
}
