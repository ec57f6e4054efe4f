use ga_core::dashboard::{ActivityEntry, ChartPoint, DashboardStats, TopEmployer};
use ga_core::monitoring::MonitoringData;
use ga_core::{PaginatedResult, PlatformSettings, ResourceRecord};

/// Normalized payload held by a cache entry.
///
/// Everything stored here has already crossed the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Page(PaginatedResult<ResourceRecord>),
    Record(Option<ResourceRecord>),
    Stats(DashboardStats),
    Chart(Vec<ChartPoint>),
    Activity(Vec<ActivityEntry>),
    TopEmployers(Vec<TopEmployer>),
    Settings(PlatformSettings),
    Monitoring(MonitoringData),
}

impl QueryData {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryData::Page(_) => "page",
            QueryData::Record(_) => "record",
            QueryData::Stats(_) => "stats",
            QueryData::Chart(_) => "chart",
            QueryData::Activity(_) => "activity",
            QueryData::TopEmployers(_) => "top_employers",
            QueryData::Settings(_) => "settings",
            QueryData::Monitoring(_) => "monitoring",
        }
    }

    pub fn into_page(self) -> Option<PaginatedResult<ResourceRecord>> {
        match self {
            QueryData::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_page(&self) -> Option<&PaginatedResult<ResourceRecord>> {
        match self {
            QueryData::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&DashboardStats> {
        match self {
            QueryData::Stats(stats) => Some(stats),
            _ => None,
        }
    }
}
