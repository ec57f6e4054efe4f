//! Monitoring panels and their background poller.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

use crate::cache::{FetchCache, QueryData};
use ga_core::config::MonitoringConfig;
use ga_core::monitoring::MonitoringData;
use ga_core::ports::AdminApiPort;
use ga_core::{ApiError, CacheKey, CacheScope, MonitoringPanel, QueryParams};

/// Use case for loading one monitoring panel through the cache.
pub struct LoadMonitoringPanel {
    api: Arc<dyn AdminApiPort>,
    cache: Arc<FetchCache>,
}

impl LoadMonitoringPanel {
    pub fn new(api: Arc<dyn AdminApiPort>, cache: Arc<FetchCache>) -> Self {
        Self { api, cache }
    }

    pub async fn execute(
        &self,
        panel: MonitoringPanel,
        params: QueryParams,
    ) -> Result<MonitoringData, ApiError> {
        let scope = CacheScope::Monitoring(panel);
        let key = CacheKey::view(scope, params.clone());
        let api = self.api.clone();
        let data = self
            .cache
            .get(&key, move || {
                let api = api.clone();
                let params = params.clone();
                async move {
                    let body = api.view(scope, &params).await?;
                    Ok(QueryData::Monitoring(MonitoringData::from_response(panel, &body)))
                }
            })
            .await?;

        match data {
            QueryData::Monitoring(data) => Ok(data),
            other => Err(ApiError::Decode(format!(
                "expected monitoring data, cache held {}",
                other.kind()
            ))),
        }
    }
}

/// One refresh of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelUpdate {
    pub panel: MonitoringPanel,
    pub result: Result<MonitoringData, ApiError>,
}

/// Refreshes panels on their own intervals until cancelled.
pub struct MonitoringPoller {
    loader: Arc<LoadMonitoringPanel>,
    cache: Arc<FetchCache>,
    intervals: MonitoringConfig,
}

impl MonitoringPoller {
    pub fn new(
        loader: Arc<LoadMonitoringPanel>,
        cache: Arc<FetchCache>,
        intervals: MonitoringConfig,
    ) -> Self {
        Self {
            loader,
            cache,
            intervals,
        }
    }

    /// Spawn one task per panel. Updates arrive on the returned channel; tasks
    /// stop when `token` is cancelled or the receiver is dropped.
    pub fn start(
        &self,
        panels: Vec<(MonitoringPanel, QueryParams)>,
        token: CancellationToken,
    ) -> (mpsc::Receiver<PanelUpdate>, Vec<JoinHandle<()>>) {
        let (tx, rx) = mpsc::channel(panels.len().max(1) * 4);
        let mut handles = Vec::with_capacity(panels.len());

        for (panel, params) in panels {
            let period = self.intervals.interval(panel);
            let loader = self.loader.clone();
            let cache = self.cache.clone();
            let tx = tx.clone();
            let token = token.clone();
            let span = info_span!("monitoring.poll", panel = panel.path());

            handles.push(tokio::spawn(
                async move {
                    info!(period_secs = period.as_secs(), "polling started");
                    let mut ticker = tokio::time::interval(period);
                    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                    let mut first = true;
                    loop {
                        tokio::select! {
                            _ = token.cancelled() => break,
                            _ = ticker.tick() => {}
                        }
                        if !first {
                            cache.invalidate(CacheScope::Monitoring(panel));
                        }
                        first = false;

                        let result = loader.execute(panel, params.clone()).await;
                        debug!(ok = result.is_ok(), "panel refreshed");
                        if tx.send(PanelUpdate { panel, result }).await.is_err() {
                            break;
                        }
                    }
                    info!("polling stopped");
                }
                .instrument(span),
            ));
        }

        (rx, handles)
    }
}
