//! Settings and monitoring use cases against the in-memory backend.

mod common;

use std::sync::Arc;

use serde_json::{json, Map};
use tokio_util::sync::CancellationToken;

use common::{FakeBackend, Harness};
use ga_app::usecases::MonitoringPoller;
use ga_core::config::MonitoringConfig;
use ga_core::monitoring::MonitoringData;
use ga_core::{CacheScope, MonitoringPanel, QueryParams, RecordId, ResourceType};

#[tokio::test]
async fn test_settings_fall_back_to_defaults() {
    let harness = Harness::signed_in(FakeBackend::new());

    let settings = harness.runtime.get_settings().execute().await.unwrap();

    assert!(!settings.maintenance_mode());
    assert!(settings.maintenance_message().is_some());
}

#[tokio::test]
async fn test_update_settings_then_read_back() {
    let harness = Harness::signed_in(FakeBackend::new());
    let before = harness.runtime.get_settings().execute().await.unwrap();
    assert_ne!(before.text("maintenance_message"), Some("Back at noon"));

    let mut values = Map::new();
    values.insert("maintenance_message".to_string(), json!("Back at noon"));
    let outcome = harness
        .runtime
        .update_settings()
        .execute(values)
        .await
        .unwrap();
    assert_eq!(
        outcome.invalidated,
        vec![CacheScope::Resource(ResourceType::Settings)]
    );

    let after = harness.runtime.get_settings().execute().await.unwrap();
    assert_eq!(after.text("maintenance_message"), Some("Back at noon"));
}

#[tokio::test]
async fn test_toggle_maintenance() {
    let harness = Harness::signed_in(FakeBackend::new());
    harness.runtime.get_settings().execute().await.unwrap();

    harness
        .runtime
        .toggle_maintenance()
        .execute(true, Some("Upgrading the database".to_string()))
        .await
        .unwrap();

    let settings = harness.runtime.get_settings().execute().await.unwrap();
    assert!(settings.maintenance_mode());
    assert_eq!(settings.maintenance_message(), Some("Upgrading the database"));
}

#[tokio::test]
async fn test_get_record_reads_nested_envelope() {
    let backend = FakeBackend::new().with_jobs(&[("j1", "Plumber", "pending")]);
    let harness = Harness::signed_in(backend);

    let record = harness
        .runtime
        .get_record()
        .execute(ResourceType::Jobs, &RecordId::new("j1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.status.as_deref(), Some("pending"));
    assert_eq!(record.text("title"), Some("Plumber"));
}

#[tokio::test]
async fn test_monitoring_panel_is_cached() {
    let harness = Harness::signed_in(FakeBackend::new());
    let loader = harness.runtime.load_monitoring_panel();

    let first = loader
        .execute(MonitoringPanel::System, QueryParams::new())
        .await
        .unwrap();
    loader
        .execute(MonitoringPanel::System, QueryParams::new())
        .await
        .unwrap();

    match first {
        MonitoringData::System(system) => {
            assert_eq!(system.cpu_usage, 12.5);
            assert_eq!(system.cpu_cores, 4);
        }
        other => panic!("unexpected panel data: {other:?}"),
    }
    assert_eq!(harness.view_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_poller_refreshes_until_cancelled() {
    let harness = Harness::signed_in(FakeBackend::new());
    let intervals = MonitoringConfig {
        system_secs: Some(1),
        ..Default::default()
    };
    let poller = MonitoringPoller::new(
        Arc::new(harness.runtime.load_monitoring_panel()),
        harness.runtime.cache().clone(),
        intervals,
    );
    let token = CancellationToken::new();

    let (mut updates, handles) =
        poller.start(vec![(MonitoringPanel::System, QueryParams::new())], token.clone());

    let first = updates.recv().await.unwrap();
    assert_eq!(first.panel, MonitoringPanel::System);
    assert!(first.result.is_ok());
    assert_eq!(harness.view_calls(), 1);

    // The next tick invalidates the panel, so the backend is asked again.
    let second = updates.recv().await.unwrap();
    assert!(second.result.is_ok());
    assert_eq!(harness.view_calls(), 2);

    token.cancel();
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_poller_stops_when_receiver_is_dropped() {
    let harness = Harness::signed_in(FakeBackend::new());
    let poller = harness.runtime.monitoring_poller();

    let (updates, handles) = poller.start(
        vec![(MonitoringPanel::System, QueryParams::new())],
        CancellationToken::new(),
    );
    drop(updates);

    for handle in handles {
        handle.await.unwrap();
    }
}
