use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::normalize::{normalize_list, normalize_object, numeric};
use crate::resource::MonitoringPanel;

/// Levels shown by default in the log panel.
pub const DEFAULT_LOG_LEVELS: &str = "INFO,WARN,ERROR";

fn num(v: &Value, path: &str) -> f64 {
    let mut current = v;
    for part in path.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return 0.0,
        }
    }
    numeric(current).filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn count(v: &Value, path: &str) -> u64 {
    num(v, path).max(0.0) as u64
}

fn text(v: &Value, path: &str) -> String {
    let mut current = v;
    for part in path.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }
    match current {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn opt_text(v: &Value, path: &str) -> Option<String> {
    Some(text(v, path)).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemOverview {
    pub cpu_usage: f64,
    pub cpu_cores: u64,
    pub memory_used: u64,
    pub memory_total: u64,
    pub memory_percentage: f64,
    pub disk_percentage: Option<f64>,
    pub database_status: String,
    pub database_response_ms: f64,
    pub redis_status: String,
    pub redis_memory: String,
    pub uptime: String,
    pub active_connections: u64,
}

impl SystemOverview {
    pub fn from_response(body: &Value) -> Self {
        let v = Value::Object(normalize_object(body));
        Self {
            cpu_usage: num(&v, "cpu.usage"),
            cpu_cores: count(&v, "cpu.cores"),
            memory_used: count(&v, "memory.used"),
            memory_total: count(&v, "memory.total"),
            memory_percentage: num(&v, "memory.percentage"),
            disk_percentage: v.get("disk").map(|_| num(&v, "disk.percentage")),
            database_status: text(&v, "database.status"),
            database_response_ms: num(&v, "database.responseTime"),
            redis_status: text(&v, "redis.status"),
            redis_memory: text(&v, "redis.memoryUsage"),
            uptime: text(&v, "uptimeFormatted"),
            active_connections: count(&v, "activeConnections"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMetrics {
    pub requests_today: u64,
    pub requests_this_hour: u64,
    pub avg_response_time_ms: f64,
    pub p95_response_time_ms: f64,
    pub error_count: u64,
    pub error_rate: f64,
}

impl ApiMetrics {
    pub fn from_response(body: &Value) -> Self {
        let v = Value::Object(normalize_object(body));
        Self {
            requests_today: count(&v, "requestsToday"),
            requests_this_hour: count(&v, "requestsThisHour"),
            avg_response_time_ms: num(&v, "avgResponseTime"),
            p95_response_time_ms: num(&v, "p95ResponseTime"),
            error_count: count(&v, "errorCount"),
            error_rate: num(&v, "errorRate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointMetric {
    pub method: String,
    pub endpoint: String,
    pub count: u64,
    pub avg_response_time_ms: f64,
    pub error_count: u64,
}

impl EndpointMetric {
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        normalize_list(body, Some("endpoints"))
            .iter()
            .filter(|v| v.is_object())
            .map(|v| Self {
                method: text(v, "method"),
                endpoint: text(v, "endpoint"),
                count: count(v, "count"),
                avg_response_time_ms: num(v, "avgResponseTime"),
                error_count: count(v, "errorCount"),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub id: String,
    pub status_code: u16,
    pub message: String,
    pub method: String,
    pub endpoint: String,
    pub kind: String,
    pub code: Option<String>,
    pub request_id: Option<String>,
    pub stack: Option<String>,
    pub timestamp: String,
}

impl ErrorEntry {
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        normalize_list(body, Some("errors"))
            .iter()
            .filter(|v| v.is_object())
            .map(|v| Self {
                id: text(v, "id"),
                status_code: num(v, "statusCode").clamp(0.0, u16::MAX as f64) as u16,
                message: text(v, "message"),
                method: text(v, "method"),
                endpoint: text(v, "endpoint"),
                kind: text(v, "type"),
                code: opt_text(v, "code"),
                request_id: opt_text(v, "requestId"),
                stack: opt_text(v, "stack"),
                timestamp: text(v, "timestamp"),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStat {
    pub model: String,
    pub operation: String,
    pub count: u64,
    pub avg_duration_ms: f64,
    pub max_duration_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalytics {
    pub slow: Vec<QueryStat>,
    pub frequent: Vec<QueryStat>,
}

impl QueryAnalytics {
    pub fn from_response(body: &Value) -> Self {
        let inner = Value::Object(normalize_object(body));
        let stats = |key: &str| -> Vec<QueryStat> {
            inner
                .get(key)
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter(|v| v.is_object())
                        .map(|v| QueryStat {
                            model: text(v, "model"),
                            operation: text(v, "operation"),
                            count: count(v, "count"),
                            avg_duration_ms: num(v, "avgDuration"),
                            max_duration_ms: num(v, "maxDuration"),
                        })
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            slow: stats("slowQueries"),
            frequent: stats("frequentQueries"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub level: LogLevel,
    pub message: String,
    pub source: Option<String>,
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl LogEntry {
    /// Unknown levels are shown as INFO.
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        normalize_list(body, Some("logs"))
            .iter()
            .filter(|v| v.is_object())
            .map(|v| Self {
                id: text(v, "id"),
                level: text(v, "level").parse().unwrap_or(LogLevel::Info),
                message: text(v, "message"),
                source: opt_text(v, "source"),
                request_id: opt_text(v, "requestId"),
                timestamp: text(v, "timestamp"),
            })
            .collect()
    }
}

/// A decoded monitoring panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MonitoringData {
    System(SystemOverview),
    Api(ApiMetrics),
    Endpoints(Vec<EndpointMetric>),
    Errors(Vec<ErrorEntry>),
    Queries(QueryAnalytics),
    Logs(Vec<LogEntry>),
}

impl MonitoringData {
    pub fn from_response(panel: MonitoringPanel, body: &Value) -> Self {
        match panel {
            MonitoringPanel::System => MonitoringData::System(SystemOverview::from_response(body)),
            MonitoringPanel::ApiMetrics => MonitoringData::Api(ApiMetrics::from_response(body)),
            MonitoringPanel::Endpoints => {
                MonitoringData::Endpoints(EndpointMetric::list_from_response(body))
            }
            MonitoringPanel::Errors => MonitoringData::Errors(ErrorEntry::list_from_response(body)),
            MonitoringPanel::Queries => MonitoringData::Queries(QueryAnalytics::from_response(body)),
            MonitoringPanel::Logs => MonitoringData::Logs(LogEntry::list_from_response(body)),
        }
    }
}
