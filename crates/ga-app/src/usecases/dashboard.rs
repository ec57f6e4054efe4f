//! Dashboard loading.

use std::sync::Arc;

use tracing::{info_span, warn, Instrument};

use crate::cache::{FetchCache, QueryData};
use ga_core::dashboard::{ActivityEntry, ChartPoint, DashboardStats, TopEmployer};
use ga_core::ports::AdminApiPort;
use ga_core::{ApiError, CacheKey, CacheScope, DashboardView, QueryParams};

pub const DEFAULT_CHART_DAYS: u32 = 365;
pub const DEFAULT_TOP_EMPLOYERS: u32 = 5;

/// Everything the dashboard page shows. Each panel loads independently; a
/// failing panel is reported in `errors` and the rest still render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: Option<DashboardStats>,
    pub chart: Vec<ChartPoint>,
    pub activity: Vec<ActivityEntry>,
    pub top_employers: Vec<TopEmployer>,
    pub errors: Vec<(DashboardView, ApiError)>,
}

impl DashboardSnapshot {
    /// The first authorization failure, if any panel hit one.
    pub fn authorization_error(&self) -> Option<&ApiError> {
        self.errors
            .iter()
            .map(|(_, e)| e)
            .find(|e| e.is_authorization())
    }
}

/// Use case for loading the dashboard.
pub struct LoadDashboard {
    api: Arc<dyn AdminApiPort>,
    cache: Arc<FetchCache>,
}

impl LoadDashboard {
    pub fn new(api: Arc<dyn AdminApiPort>, cache: Arc<FetchCache>) -> Self {
        Self { api, cache }
    }

    pub async fn execute(&self, chart_days: u32, top_employers: u32) -> DashboardSnapshot {
        let span = info_span!("usecase.load_dashboard.execute", chart_days, top_employers);

        async {
            let (stats, chart, activity, employers) = tokio::join!(
                self.view(DashboardView::Stats, QueryParams::new()),
                self.view(DashboardView::Chart, param("days", chart_days)),
                self.view(DashboardView::Activity, QueryParams::new()),
                self.view(DashboardView::TopEmployers, param("limit", top_employers)),
            );

            let mut snapshot = DashboardSnapshot::default();
            for (view, result) in [
                (DashboardView::Stats, stats),
                (DashboardView::Chart, chart),
                (DashboardView::Activity, activity),
                (DashboardView::TopEmployers, employers),
            ] {
                match result {
                    Ok(QueryData::Stats(s)) => snapshot.stats = Some(s),
                    Ok(QueryData::Chart(c)) => snapshot.chart = c,
                    Ok(QueryData::Activity(a)) => snapshot.activity = a,
                    Ok(QueryData::TopEmployers(t)) => snapshot.top_employers = t,
                    Ok(other) => warn!(view = ?view, kind = other.kind(), "unexpected cached data"),
                    Err(err) => {
                        warn!(view = ?view, error = %err, "dashboard panel failed");
                        snapshot.errors.push((view, err));
                    }
                }
            }
            snapshot
        }
        .instrument(span)
        .await
    }

    /// Only the stats card, as cached. Used after mutations to show counters.
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        match self.view(DashboardView::Stats, QueryParams::new()).await? {
            QueryData::Stats(stats) => Ok(stats),
            _ => Ok(DashboardStats::default()),
        }
    }

    async fn view(&self, view: DashboardView, params: QueryParams) -> Result<QueryData, ApiError> {
        let scope = CacheScope::Dashboard(view);
        let key = CacheKey::view(scope, params.clone());
        let api = self.api.clone();
        self.cache
            .get(&key, move || {
                let api = api.clone();
                let params = params.clone();
                async move {
                    let body = api.view(scope, &params).await?;
                    Ok(match view {
                        DashboardView::Stats => QueryData::Stats(DashboardStats::from_response(&body)),
                        DashboardView::Chart => QueryData::Chart(ChartPoint::list_from_response(&body)),
                        DashboardView::Activity => {
                            QueryData::Activity(ActivityEntry::list_from_response(&body))
                        }
                        DashboardView::TopEmployers => {
                            QueryData::TopEmployers(TopEmployer::list_from_response(&body))
                        }
                    })
                }
            })
            .await
    }
}

fn param(name: &str, value: u32) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(name.to_string(), value.to_string());
    params
}
