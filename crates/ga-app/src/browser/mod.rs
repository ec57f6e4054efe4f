//! Resource browser.
//!
//! One browser backs one list page: it owns the query state, reads through the
//! shared cache, and routes row actions to the mutation executor. State starts
//! at `Loading` and moves to `Loaded | Errored`; a query change goes back to
//! `Loading` while the previous page stays visible.

mod busy;
mod view;

pub use view::{BrowserState, BrowserView, Control};

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info_span, Instrument};

use crate::cache::{CacheEvent, FetchCache, QueryData};
use crate::mutation::{MutationError, MutationExecutor, MutationOutcome};
use busy::BusyGuard;
use ga_core::normalize::{normalize_page, normalize_unpaged};
use ga_core::ports::AdminApiPort;
use ga_core::{
    ApiError, CacheKey, CacheScope, MutationIntent, PaginatedResult, QueryState, ResourceRecord,
    ResourceType,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrowserError {
    #[error("{0} is not a browsable collection")]
    NotBrowsable(ResourceType),

    #[error("{0} is already in progress for this item")]
    ControlBusy(Control),

    #[error("action targets {actual}, but this browser shows {expected}")]
    WrongResource {
        expected: ResourceType,
        actual: ResourceType,
    },

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

struct BrowserInner {
    query: QueryState,
    state: BrowserState,
    displayed: Option<PaginatedResult<ResourceRecord>>,
    error: Option<ApiError>,
    /// Sequence number of the latest issued load. Older results are dropped.
    issued: u64,
}

pub struct ResourceBrowser {
    resource: ResourceType,
    api: Arc<dyn AdminApiPort>,
    cache: Arc<FetchCache>,
    executor: Arc<MutationExecutor>,
    inner: Mutex<BrowserInner>,
    busy: busy::BusySet,
    events: Mutex<broadcast::Receiver<CacheEvent>>,
}

impl ResourceBrowser {
    pub fn new(
        resource: ResourceType,
        page_size: u32,
        api: Arc<dyn AdminApiPort>,
        cache: Arc<FetchCache>,
        executor: Arc<MutationExecutor>,
    ) -> Result<Self, BrowserError> {
        if !resource.is_listable() {
            return Err(BrowserError::NotBrowsable(resource));
        }
        let events = Mutex::new(cache.subscribe());
        Ok(Self {
            resource,
            api,
            cache,
            executor,
            inner: Mutex::new(BrowserInner {
                query: QueryState::new(page_size),
                state: BrowserState::Loading,
                displayed: None,
                error: None,
                issued: 0,
            }),
            busy: busy::BusySet::default(),
            events,
        })
    }

    pub fn resource(&self) -> ResourceType {
        self.resource
    }

    pub fn scope(&self) -> CacheScope {
        CacheScope::Resource(self.resource)
    }

    pub fn query(&self) -> QueryState {
        self.lock().query.clone()
    }

    pub fn view(&self) -> BrowserView {
        let inner = self.lock();
        BrowserView {
            resource: self.resource,
            state: inner.state,
            query: inner.query.descriptor().clone(),
            page: inner.displayed.clone(),
            error: inner.error.clone(),
            busy: self.busy.controls(),
        }
    }

    /// Load the current query, from cache when fresh.
    pub async fn refresh(&self) -> BrowserView {
        let span = info_span!("browser.refresh", resource = %self.resource);

        async {
            self.drain_events();

            let (seq, key, params, page, page_size) = {
                let mut inner = self.lock();
                inner.issued += 1;
                inner.state = BrowserState::Loading;
                (
                    inner.issued,
                    inner.query.cache_key(self.scope()),
                    inner.query.to_request_params(),
                    inner.query.page(),
                    inner.query.page_size(),
                )
            };

            let result = self.load(&key, params, page, page_size).await;

            {
                let mut inner = self.lock();
                if inner.issued != seq {
                    debug!(seq, latest = inner.issued, "discarding superseded result");
                    drop(inner);
                    return self.view();
                }
                match result {
                    Ok(page) => {
                        inner.displayed = Some(page);
                        inner.error = None;
                        inner.state = BrowserState::Loaded;
                    }
                    Err(err) => {
                        debug!(error = %err, "load failed");
                        inner.state = if inner.displayed.is_some() {
                            BrowserState::Loaded
                        } else {
                            BrowserState::Errored
                        };
                        inner.error = Some(err);
                    }
                }
            }
            self.view()
        }
        .instrument(span)
        .await
    }

    async fn load(
        &self,
        key: &CacheKey,
        params: ga_core::QueryParams,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<ResourceRecord>, ApiError> {
        let resource = self.resource;
        let api = self.api.clone();
        let data = self
            .cache
            .get(key, move || {
                let api = api.clone();
                let params = params.clone();
                async move {
                    let body = api.list(resource, &params).await?;
                    let page = if resource.is_paginated() {
                        normalize_page(&body, resource.collection_key(), page, page_size)
                    } else {
                        normalize_unpaged(&body, resource)
                    };
                    Ok(QueryData::Page(page))
                }
            })
            .await?;

        // Keys are per scope, so only pages are ever stored here.
        Ok(data.into_page().unwrap_or_else(|| PaginatedResult::empty(page)))
    }

    pub async fn set_page(&self, page: i64) -> BrowserView {
        self.lock().query.set_page(page);
        self.refresh().await
    }

    pub async fn set_search(&self, term: &str) -> BrowserView {
        self.lock().query.set_search(term);
        self.refresh().await
    }

    pub async fn set_filter(&self, name: &str, value: &str) -> BrowserView {
        self.lock().query.set_filter(name, value);
        self.refresh().await
    }

    pub async fn clear_filters(&self) -> BrowserView {
        self.lock().query.clear_filters();
        self.refresh().await
    }

    /// Replace the whole query and load it once.
    pub async fn set_query(&self, query: QueryState) -> BrowserView {
        self.lock().query = query;
        self.refresh().await
    }

    /// Apply pending cache notifications. Refetches when this browser's scope
    /// was invalidated or the cache was cleared; otherwise returns the current view.
    pub async fn sync(&self) -> BrowserView {
        if self.drain_events() {
            self.refresh().await
        } else {
            self.view()
        }
    }

    /// Submit a row action. The same control cannot be submitted again while
    /// its first submission is in flight. On success the list is reloaded.
    pub async fn run_action(&self, intent: MutationIntent) -> Result<MutationOutcome, BrowserError> {
        if intent.resource != self.resource {
            return Err(BrowserError::WrongResource {
                expected: self.resource,
                actual: intent.resource,
            });
        }

        let control = Control {
            operation: intent.kind(),
            target: intent.target.clone(),
        };
        let outcome = {
            let _guard = BusyGuard::acquire(&self.busy, control.clone())
                .ok_or(BrowserError::ControlBusy(control))?;
            self.executor.execute(intent).await?
        };

        if outcome.invalidated.contains(&self.scope()) {
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Drain the subscription. Returns whether this browser needs a reload.
    fn drain_events(&self) -> bool {
        let scope = self.scope();
        let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
        let mut needs_reload = false;
        loop {
            match events.try_recv() {
                Ok(CacheEvent::Invalidated(s)) if s == scope => needs_reload = true,
                Ok(CacheEvent::Invalidated(_)) => {}
                Ok(CacheEvent::Cleared) => needs_reload = true,
                Err(TryRecvError::Lagged(_)) => needs_reload = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        needs_reload
    }

    fn lock(&self) -> MutexGuard<'_, BrowserInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
