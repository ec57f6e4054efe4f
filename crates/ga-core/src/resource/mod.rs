//! Resource types, cache scopes and the opaque record model.

mod record;
mod scope;

pub use record::ResourceRecord;
pub use scope::{CacheScope, DashboardView, MonitoringPanel};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-managed resource collections reachable under `/admin/{resource}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Users,
    Jobs,
    Applications,
    Categories,
    Skills,
    Reports,
    Settings,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Users,
        ResourceType::Jobs,
        ResourceType::Applications,
        ResourceType::Categories,
        ResourceType::Skills,
        ResourceType::Reports,
        ResourceType::Settings,
    ];

    /// Path segment under `/admin`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceType::Users => "users",
            ResourceType::Jobs => "jobs",
            ResourceType::Applications => "applications",
            ResourceType::Categories => "categories",
            ResourceType::Skills => "skills",
            ResourceType::Reports => "reports",
            ResourceType::Settings => "settings",
        }
    }

    /// Key the backend may nest the collection array under, e.g. `data.users`.
    pub fn collection_key(&self) -> &'static str {
        self.path_segment()
    }

    /// Whether list responses carry page metadata.
    ///
    /// Categories and skills come back as a full list and are shown as one page.
    pub fn is_paginated(&self) -> bool {
        matches!(
            self,
            ResourceType::Users
                | ResourceType::Jobs
                | ResourceType::Applications
                | ResourceType::Reports
        )
    }

    /// Settings is a singleton document, not a collection.
    pub fn is_listable(&self) -> bool {
        !matches!(self, ResourceType::Settings)
    }

    /// Singular noun used in log lines and console output.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceType::Users => "user",
            ResourceType::Jobs => "job",
            ResourceType::Applications => "application",
            ResourceType::Categories => "category",
            ResourceType::Skills => "skill",
            ResourceType::Reports => "report",
            ResourceType::Settings => "settings",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type: {0}")]
pub struct UnknownResourceType(pub String);

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ResourceType::ALL
            .iter()
            .copied()
            .find(|r| r.path_segment() == normalized || r.singular() == normalized)
            .ok_or_else(|| UnknownResourceType(s.to_string()))
    }
}
