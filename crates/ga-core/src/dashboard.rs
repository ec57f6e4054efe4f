//! Dashboard aggregates.
//!
//! The stats endpoint has shipped both a flat shape (`totalUsers`,
//! `activeJobs`, ...) and a nested one (`users.total`, `jobs.active`, ...).
//! Both are read; anything missing is zero.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalize::{normalize_list, normalize_object, numeric};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub new_users_today: u64,
    pub users_growth_rate: Option<f64>,
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub completed_jobs_this_week: u64,
    pub total_applications: u64,
    pub pending_applications: u64,
    pub total_reports: u64,
    pub pending_reports: u64,
    pub average_rating: f64,
}

impl DashboardStats {
    pub fn from_response(body: &Value) -> Self {
        Self::from_map(&normalize_object(body))
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let count = |flat: &str, nested: &str| -> u64 {
            pick(map, flat, nested)
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n as u64)
                .unwrap_or(0)
        };

        Self {
            total_users: count("totalUsers", "users.total"),
            active_users: count("activeUsers", "users.active"),
            new_users_today: count("newUsersToday", "users.today"),
            users_growth_rate: pick(map, "usersGrowthRate", "users.growthRate"),
            total_jobs: count("totalJobs", "jobs.total"),
            active_jobs: count("activeJobs", "jobs.active"),
            completed_jobs_this_week: count("completedJobs", "jobs.completedThisWeek"),
            total_applications: count("totalApplications", "applications.total"),
            pending_applications: count("pendingApplications", "applications.pending"),
            total_reports: count("totalReports", "reports.total"),
            pending_reports: count("pendingReports", "reports.pending"),
            average_rating: pick(map, "averageRating", "reviews.averageRating").unwrap_or(0.0),
        }
    }
}

fn pick(map: &Map<String, Value>, flat: &str, nested: &str) -> Option<f64> {
    if let Some(n) = map.get(flat).and_then(numeric) {
        return Some(n);
    }
    let (group, field) = nested.split_once('.')?;
    map.get(group)?.get(field).and_then(numeric)
}

fn count_field(obj: &Value, name: &str) -> u64 {
    obj.get(name)
        .and_then(numeric)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64)
        .unwrap_or(0)
}

fn text_field(obj: &Value, name: &str) -> String {
    match obj.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// One day of platform growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub users: u64,
    pub jobs: u64,
    pub applications: u64,
}

impl ChartPoint {
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        normalize_list(body, Some("chart"))
            .iter()
            .filter(|v| v.is_object())
            .map(|v| Self {
                date: text_field(v, "date"),
                users: count_field(v, "users"),
                jobs: count_field(v, "jobs"),
                applications: count_field(v, "applications"),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: String,
    pub message: String,
    pub timestamp: String,
}

impl ActivityEntry {
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        normalize_list(body, Some("activity"))
            .iter()
            .filter(|v| v.is_object())
            .map(|v| {
                let timestamp = Some(text_field(v, "timestamp"))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| text_field(v, "createdAt"));
                let message = Some(text_field(v, "message"))
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| text_field(v, "action"));
                Self {
                    kind: text_field(v, "type"),
                    message,
                    timestamp,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEmployer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub jobs_count: u64,
}

impl TopEmployer {
    pub fn list_from_response(body: &Value) -> Vec<Self> {
        normalize_list(body, Some("employers"))
            .iter()
            .filter(|v| v.is_object())
            .map(|v| Self {
                id: text_field(v, "id"),
                name: text_field(v, "name"),
                email: text_field(v, "email"),
                jobs_count: count_field(v, "jobsCount"),
            })
            .collect()
    }
}
