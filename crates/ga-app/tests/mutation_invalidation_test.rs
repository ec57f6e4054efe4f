//! Mutation executor integration tests: scope invalidation across browsers,
//! the dashboard, and the history kept per intent.

mod common;

use common::{FakeBackend, Harness};
use ga_app::{EntryStatus, MutationError};
use ga_core::mutation::IntentError;
use ga_core::{
    CacheKey, CacheScope, DashboardView, MutationIntent, MutationOperation, MutationStatus,
    QueryParams, ResourceType,
};

#[tokio::test]
async fn test_approving_a_job_updates_pending_list_and_dashboard() {
    let backend = FakeBackend::new().with_jobs(&[
        ("j1", "Plumber", "pending"),
        ("j2", "Painter", "pending"),
        ("j3", "Gardener", "active"),
    ]);
    let harness = Harness::signed_in(backend);
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();
    let dashboard = harness.runtime.load_dashboard();

    let view = browser.set_filter("status", "pending").await;
    assert_eq!(view.items().len(), 2);
    assert_eq!(dashboard.stats().await.unwrap().active_jobs, 1);

    let outcome = browser
        .run_action(MutationIntent::on(
            ResourceType::Jobs,
            "j1",
            MutationOperation::Approve,
        ))
        .await
        .unwrap();

    assert!(outcome
        .invalidated
        .contains(&CacheScope::Resource(ResourceType::Jobs)));
    assert!(outcome
        .invalidated
        .contains(&CacheScope::Dashboard(DashboardView::Stats)));

    // The browser reloaded its own scope after the action.
    let view = browser.view();
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].id.as_str(), "j2");

    // The cached stats were invalidated, so this reads the new count.
    let views_before = harness.view_calls();
    assert_eq!(dashboard.stats().await.unwrap().active_jobs, 2);
    assert_eq!(harness.view_calls(), views_before + 1);
}

#[tokio::test]
async fn test_job_approval_refreshes_activity_feed_only() {
    let backend = FakeBackend::new().with_jobs(&[("j1", "Plumber", "pending")]);
    let harness = Harness::signed_in(backend);
    harness.runtime.load_dashboard().execute(30, 5).await;

    let activity_key = CacheKey::view(
        CacheScope::Dashboard(DashboardView::Activity),
        QueryParams::new(),
    );
    let mut limit = QueryParams::new();
    limit.insert("limit".to_string(), "5".to_string());
    let employers_key = CacheKey::view(CacheScope::Dashboard(DashboardView::TopEmployers), limit);
    assert!(!harness.runtime.cache().peek(&activity_key).unwrap().stale);

    harness
        .runtime
        .executor()
        .execute(MutationIntent::on(
            ResourceType::Jobs,
            "j1",
            MutationOperation::Approve,
        ))
        .await
        .unwrap();

    assert!(harness.runtime.cache().peek(&activity_key).unwrap().stale);
    assert!(!harness.runtime.cache().peek(&employers_key).unwrap().stale);
}

#[tokio::test]
async fn test_unrelated_scopes_stay_cached() {
    let backend = FakeBackend::new()
        .with_jobs(&[("j1", "Plumber", "pending")])
        .with_users(&[("u1", "active")]);
    let harness = Harness::signed_in(backend);
    let jobs = harness.runtime.browser(ResourceType::Jobs).unwrap();
    let users = harness.runtime.browser(ResourceType::Users).unwrap();
    jobs.refresh().await;
    users.refresh().await;

    jobs.run_action(MutationIntent::on(
        ResourceType::Jobs,
        "j1",
        MutationOperation::Approve,
    ))
    .await
    .unwrap();

    let calls = harness.list_calls();
    users.sync().await;
    assert_eq!(harness.list_calls(), calls);
}

#[tokio::test]
async fn test_report_ban_invalidates_users() {
    let backend = FakeBackend::new()
        .with_users(&[("u1", "active"), ("u2", "active")])
        .with_reports(&[("r1", "u2")]);
    let harness = Harness::signed_in(backend);
    let users = harness.runtime.browser(ResourceType::Users).unwrap();
    users.refresh().await;
    let users_key = users.query().cache_key(users.scope());

    let outcome = harness
        .runtime
        .executor()
        .execute(MutationIntent::on(
            ResourceType::Reports,
            "r1",
            MutationOperation::Resolve {
                resolution: "resolved".to_string(),
                action: "ban".to_string(),
            },
        ))
        .await
        .unwrap();

    assert!(outcome
        .invalidated
        .contains(&CacheScope::Resource(ResourceType::Users)));
    assert!(harness.runtime.cache().peek(&users_key).unwrap().stale);

    let calls = harness.list_calls();
    let view = users.sync().await;
    assert_eq!(harness.list_calls(), calls + 1);
    let banned = view
        .items()
        .iter()
        .find(|u| u.id.as_str() == "u2")
        .and_then(|u| u.status.clone());
    assert_eq!(banned.as_deref(), Some("banned"));
}

#[tokio::test]
async fn test_report_dismissal_leaves_users_cached() {
    let backend = FakeBackend::new()
        .with_users(&[("u1", "active")])
        .with_reports(&[("r1", "u1")]);
    let harness = Harness::signed_in(backend);
    let users = harness.runtime.browser(ResourceType::Users).unwrap();
    users.refresh().await;
    let users_key = users.query().cache_key(users.scope());

    let outcome = harness
        .runtime
        .executor()
        .execute(MutationIntent::on(
            ResourceType::Reports,
            "r1",
            MutationOperation::Resolve {
                resolution: "dismissed".to_string(),
                action: "dismiss".to_string(),
            },
        ))
        .await
        .unwrap();

    assert!(!outcome
        .invalidated
        .contains(&CacheScope::Resource(ResourceType::Users)));
    let entry = harness.runtime.cache().peek(&users_key).unwrap();
    assert_eq!(entry.status, EntryStatus::Success);
    assert!(!entry.stale);
}

#[tokio::test]
async fn test_invalid_intent_is_not_sent() {
    let harness = Harness::signed_in(FakeBackend::new());
    let executor = harness.runtime.executor();

    let intent = MutationIntent::on_collection(ResourceType::Jobs, MutationOperation::Approve);
    let id = intent.id.clone();
    let err = executor.execute(intent).await.unwrap_err();

    assert!(matches!(
        err,
        MutationError::Invalid(IntentError::MissingTarget { .. })
    ));
    assert_eq!(
        harness
            .backend
            .mutate_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        0
    );
    assert!(matches!(executor.status_of(&id), Some(MutationStatus::Failed(_))));
}

#[tokio::test]
async fn test_history_lists_most_recent_first() {
    let backend = FakeBackend::new().with_jobs(&[("j1", "Plumber", "pending")]);
    let harness = Harness::signed_in(backend);
    let executor = harness.runtime.executor();

    let approve = MutationIntent::on(ResourceType::Jobs, "j1", MutationOperation::Approve);
    let unsupported = MutationIntent::on(ResourceType::Skills, "s1", MutationOperation::Approve);
    let approve_id = approve.id.clone();
    let unsupported_id = unsupported.id.clone();

    executor.execute(approve).await.unwrap();
    executor.execute(unsupported).await.unwrap_err();

    let history = executor.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, unsupported_id);
    assert_eq!(history[1].id, approve_id);
    assert_eq!(history[1].status, MutationStatus::Succeeded);
}

#[tokio::test]
async fn test_dashboard_loads_every_panel() {
    let backend = FakeBackend::new()
        .with_jobs(&[("j1", "Plumber", "active")])
        .with_users(&[("u1", "active"), ("u2", "suspended")]);
    let harness = Harness::signed_in(backend);

    let snapshot = harness.runtime.load_dashboard().execute(30, 5).await;

    assert!(snapshot.errors.is_empty());
    let stats = snapshot.stats.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.active_users, 1);
    assert_eq!(stats.active_jobs, 1);
    assert_eq!(snapshot.chart.len(), 1);
    assert!(snapshot.activity.is_empty());

    let stats_key = CacheKey::view(CacheScope::Dashboard(DashboardView::Stats), QueryParams::new());
    assert!(harness.runtime.cache().peek(&stats_key).is_some());
}
