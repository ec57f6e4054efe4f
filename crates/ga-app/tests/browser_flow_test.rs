//! Resource browser integration tests: paging, filters, request ordering,
//! de-duplication and row-action controls.

mod common;

use std::time::Duration;

use common::{twelve_jobs, FakeBackend, Harness};
use ga_app::{BrowserError, BrowserState, Control, EntryStatus, MutationError};
use ga_core::mutation::OperationKind;
use ga_core::{
    ApiError, MutationIntent, MutationOperation, MutationStatus, QueryState, RecordId, ResourceType,
};

#[tokio::test]
async fn test_twelve_jobs_paginate_into_two_pages() {
    let harness = Harness::signed_in(twelve_jobs());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();
    let initial = browser.view();
    assert_eq!(initial.state, BrowserState::Loading);
    assert_eq!(initial.query.page, 1);
    assert!(initial.page.is_none());

    let view = browser.refresh().await;
    assert_eq!(view.state, BrowserState::Loaded);
    let page = view.page.as_ref().unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 12);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 2);
    assert!(!page.has_previous());
    assert!(page.has_next());

    let view = browser.set_page(2).await;
    let page = view.page.as_ref().unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page, 2);
    assert_eq!(view.items()[0].id, RecordId::new("job-11"));
    assert_eq!(harness.list_calls(), 2);

    // Page 0 clamps to page 1, which is still cached.
    let view = browser.set_page(0).await;
    assert_eq!(view.query.page, 1);
    assert_eq!(view.items().len(), 10);
    assert_eq!(harness.list_calls(), 2);
}

#[tokio::test]
async fn test_filter_and_search_reset_to_first_page() {
    let backend = FakeBackend::new().with_jobs(&[
        ("j1", "Backend developer", "pending"),
        ("j2", "Frontend developer", "active"),
        ("j3", "Dog walker", "pending"),
    ]);
    let harness = Harness::signed_in(backend);
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    browser.set_page(3).await;
    let view = browser.set_filter("status", "pending").await;
    assert_eq!(view.query.page, 1);
    assert_eq!(view.query.filter("status"), Some("pending"));
    assert_eq!(view.items().len(), 2);

    let view = browser.set_search("developer").await;
    assert_eq!(view.query.page, 1);
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].id, RecordId::new("j1"));

    let view = browser.clear_filters().await;
    assert!(view.query.filters.is_empty());
    assert_eq!(view.query.search, "developer");
    assert_eq!(view.items().len(), 2);
}

#[tokio::test]
async fn test_set_query_loads_once() {
    let harness = Harness::signed_in(twelve_jobs());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    let mut query = browser.query();
    query.set_filter("status", "active");
    query.set_page(2);
    let view = browser.set_query(query).await;

    assert_eq!(view.query.page, 2);
    assert_eq!(view.query.filter("status"), Some("active"));
    assert_eq!(view.items().len(), 2);
    assert_eq!(harness.list_calls(), 1);
}

#[tokio::test]
async fn test_page_size_change_issues_new_request() {
    let harness = Harness::signed_in(twelve_jobs());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    let view = browser.refresh().await;
    assert_eq!(view.items().len(), 10);
    assert_eq!(view.page.as_ref().unwrap().total_pages, 2);

    let view = browser.set_query(QueryState::new(25)).await;
    let page = view.page.as_ref().unwrap();
    assert_eq!(page.items.len(), 12);
    assert_eq!(page.total_pages, 1);
    assert_eq!(harness.list_calls(), 2);
}

#[tokio::test]
async fn test_padded_search_reuses_cached_page() {
    let harness = Harness::signed_in(twelve_jobs());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    let view = browser.set_search("Job 1").await;
    assert_eq!(view.query.search, "Job 1");
    let first = view.items().len();
    assert_eq!(harness.list_calls(), 1);

    let view = browser.set_search("  Job 1 ").await;
    assert_eq!(view.query.search, "Job 1");
    assert_eq!(view.items().len(), first);
    assert_eq!(harness.list_calls(), 1);
}

#[tokio::test]
async fn test_empty_result_is_loaded_not_errored() {
    let harness = Harness::signed_in(FakeBackend::new());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    let view = browser.refresh().await;
    assert_eq!(view.state, BrowserState::Loaded);
    assert!(view.is_empty());
    assert_eq!(view.page.as_ref().unwrap().total_pages, 1);
}

#[tokio::test]
async fn test_settings_are_not_browsable() {
    let harness = Harness::signed_in(FakeBackend::new());
    assert!(matches!(
        harness.runtime.browser(ResourceType::Settings),
        Err(BrowserError::NotBrowsable(ResourceType::Settings))
    ));
}

#[tokio::test]
async fn test_stale_entries_are_refetched() {
    let harness = Harness::signed_in(twelve_jobs());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    browser.refresh().await;
    browser.refresh().await;
    assert_eq!(harness.list_calls(), 1);

    harness.clock.advance(Duration::from_secs(31));
    browser.refresh().await;
    assert_eq!(harness.list_calls(), 2);
}

#[tokio::test]
async fn test_concurrent_identical_queries_share_one_request() {
    let harness = Harness::signed_in(twelve_jobs().with_delay(Duration::from_millis(20)));
    let first = harness.runtime.browser(ResourceType::Jobs).unwrap();
    let second = harness.runtime.browser(ResourceType::Jobs).unwrap();

    let (a, b) = tokio::join!(first.refresh(), second.refresh());

    assert_eq!(harness.list_calls(), 1);
    assert_eq!(a.items().len(), 10);
    assert_eq!(a.page, b.page);
}

#[tokio::test]
async fn test_superseded_response_never_overwrites_newer_query() {
    let backend = FakeBackend::new().with_jobs(&[
        ("j1", "Backend developer", "active"),
        ("j2", "Slow cooker repair", "active"),
    ]);
    *backend.slow_search.lock().unwrap() = Some(("slow".to_string(), Duration::from_millis(50)));
    let harness = Harness::signed_in(backend);
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    tokio::join!(browser.set_search("slow"), browser.set_search("dev"));

    let view = browser.view();
    assert_eq!(view.state, BrowserState::Loaded);
    assert_eq!(view.query.search, "dev");
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].id, RecordId::new("j1"));
    assert_eq!(harness.list_calls(), 2);
}

#[tokio::test]
async fn test_control_is_busy_while_its_action_is_in_flight() {
    let backend = FakeBackend::new()
        .with_jobs(&[("j1", "Plumber", "pending"), ("j2", "Painter", "pending")])
        .with_delay(Duration::from_millis(20));
    let harness = Harness::signed_in(backend);
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();
    browser.refresh().await;

    let approve = |id: &str| MutationIntent::on(ResourceType::Jobs, id, MutationOperation::Approve);
    let (first, second, other) = tokio::join!(
        browser.run_action(approve("j1")),
        browser.run_action(approve("j1")),
        browser.run_action(approve("j2")),
    );

    assert!(first.is_ok());
    assert_eq!(
        second.unwrap_err(),
        BrowserError::ControlBusy(Control {
            operation: OperationKind::Approve,
            target: Some(RecordId::new("j1")),
        })
    );
    assert!(other.is_ok());
    assert_eq!(
        harness.backend.mutate_calls.load(std::sync::atomic::Ordering::SeqCst),
        2
    );
    assert!(browser.view().busy.is_empty());
}

#[tokio::test]
async fn test_failed_mutation_leaves_cache_and_view_unchanged() {
    let backend = FakeBackend::new().with_jobs(&[("j1", "Plumber", "pending")]);
    backend
        .fail_mutations
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let harness = Harness::signed_in(backend);
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();
    let before = browser.refresh().await;
    let calls = harness.list_calls();

    let intent = MutationIntent::on(ResourceType::Jobs, "j1", MutationOperation::Approve);
    let mutation_id = intent.id.clone();
    let err = browser.run_action(intent).await.unwrap_err();

    assert!(matches!(
        err,
        BrowserError::Mutation(MutationError::Api(ApiError::Server { status: 500, .. }))
    ));
    assert_eq!(browser.view().page, before.page);
    assert_eq!(harness.list_calls(), calls);

    let key = browser.query().cache_key(browser.scope());
    let entry = harness.runtime.cache().peek(&key).unwrap();
    assert_eq!(entry.status, EntryStatus::Success);
    assert!(!entry.stale);

    assert_eq!(harness.backend.job_status("j1").as_deref(), Some("pending"));
    assert!(matches!(
        harness.runtime.executor().status_of(&mutation_id),
        Some(MutationStatus::Failed(_))
    ));
}

#[tokio::test]
async fn test_action_for_another_resource_is_refused() {
    let harness = Harness::signed_in(FakeBackend::new());
    let browser = harness.runtime.browser(ResourceType::Jobs).unwrap();

    let intent = MutationIntent::on(
        ResourceType::Users,
        "u1",
        MutationOperation::Ban {
            reason: "spam".to_string(),
        },
    );
    assert_eq!(
        browser.run_action(intent).await.unwrap_err(),
        BrowserError::WrongResource {
            expected: ResourceType::Jobs,
            actual: ResourceType::Users,
        }
    );
}
