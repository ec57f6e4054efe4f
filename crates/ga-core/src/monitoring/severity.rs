use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "ok",
            Severity::Warning => "warn",
            Severity::Critical => "crit",
        }
    }
}

fn above(value: f64, warning: f64, critical: f64) -> Severity {
    if value > critical {
        Severity::Critical
    } else if value > warning {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// CPU / memory / disk percentage.
pub fn usage_severity(percent: f64) -> Severity {
    above(percent, 70.0, 90.0)
}

/// Average endpoint response time in milliseconds.
pub fn response_time_severity(ms: f64) -> Severity {
    above(ms, 200.0, 500.0)
}

pub fn p95_severity(ms: f64) -> Severity {
    above(ms, 500.0, 1000.0)
}

/// Database query duration in milliseconds.
pub fn query_duration_severity(ms: f64) -> Severity {
    above(ms, 50.0, 100.0)
}

/// Error rate in percent.
pub fn error_rate_severity(percent: f64) -> Severity {
    above(percent, 1.0, 5.0)
}
