//! Monitoring panel models and severity thresholds.

mod models;
mod severity;

pub use models::{
    ApiMetrics, EndpointMetric, ErrorEntry, LogEntry, LogLevel, MonitoringData, QueryAnalytics,
    QueryStat, SystemOverview, DEFAULT_LOG_LEVELS,
};
pub use severity::{
    error_rate_severity, p95_severity, query_duration_severity, response_time_severity,
    usage_severity, Severity,
};

use crate::query::QueryParams;
use crate::resource::MonitoringPanel;

/// Request parameters each panel is fetched with.
pub fn default_params(panel: MonitoringPanel) -> QueryParams {
    let pairs: &[(&str, &str)] = match panel {
        MonitoringPanel::System | MonitoringPanel::ApiMetrics => &[],
        MonitoringPanel::Endpoints => &[("limit", "10"), ("sort", "count")],
        MonitoringPanel::Errors => &[("limit", "20")],
        MonitoringPanel::Queries => &[("limit", "20")],
        MonitoringPanel::Logs => &[("level", DEFAULT_LOG_LEVELS), ("limit", "100")],
    };
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
