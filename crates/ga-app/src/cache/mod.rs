//! Shared fetch cache.
//!
//! One `Arc<FetchCache>` is shared by every browser and use case. It maps a
//! [`CacheKey`] to the last normalized result, de-duplicates concurrent
//! requests for the same key, and is invalidated per [`CacheScope`].
//!
//! The map sits behind a `std::sync::Mutex` that is never held across an
//! `.await`. In-flight requests are `Shared` futures stored on the entry, so
//! every caller asking for the same key awaits the same request.

mod data;
mod entry;

pub use data::QueryData;
pub use entry::{EntrySnapshot, EntryStatus};

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use entry::{Entry, SharedFetch};
use ga_core::ports::ClockPort;
use ga_core::{ApiError, CacheKey, CacheScope};

/// How many times a caller follows a superseded request before giving up on
/// caching and returning what it got.
const MAX_ATTEMPTS: usize = 3;
const EVENT_CAPACITY: usize = 64;

/// Notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Invalidated(CacheScope),
    Cleared,
}

enum Lookup {
    Fresh(QueryData),
    Wait { generation: u64, fetch: SharedFetch },
}

enum Completion {
    Stored,
    Superseded,
    Dropped,
}

pub struct FetchCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    clock: Arc<dyn ClockPort>,
    stale_after_ms: i64,
    events: broadcast::Sender<CacheEvent>,
}

impl FetchCache {
    pub fn new(clock: Arc<dyn ClockPort>, stale_after: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            stale_after_ms: i64::try_from(stale_after.as_millis()).unwrap_or(i64::MAX),
            events,
        }
    }

    /// Return fresh data for `key`, join the in-flight request for it, or
    /// issue a new one with `fetch`.
    ///
    /// A request that was invalidated while in flight does not land; the
    /// caller follows the request that replaced it instead.
    pub async fn get<F, Fut>(&self, key: &CacheKey, fetch: F) -> Result<QueryData, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<QueryData, ApiError>> + Send + 'static,
    {
        let mut last = None;
        for attempt in 0..MAX_ATTEMPTS {
            let (generation, shared) = match self.lookup(key, &fetch) {
                Lookup::Fresh(data) => {
                    debug!(key = %key, "cache hit");
                    return Ok(data);
                }
                Lookup::Wait { generation, fetch } => (generation, fetch),
            };

            let result = shared.await;
            match self.complete(key, generation, &result) {
                Completion::Stored | Completion::Dropped => return result,
                Completion::Superseded => {
                    debug!(key = %key, attempt, "request superseded, following the current one");
                    last = Some(result);
                }
            }
        }

        warn!(key = %key, "request kept being superseded, returning uncached result");
        last.unwrap_or_else(|| Err(ApiError::Transport("request superseded".to_string())))
    }

    fn lookup<F, Fut>(&self, key: &CacheKey, fetch: &F) -> Lookup
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<QueryData, ApiError>> + Send + 'static,
    {
        let now = self.clock.now_ms();
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);

        if let Some(in_flight) = &entry.in_flight {
            debug!(key = %key, "joining in-flight request");
            return Lookup::Wait {
                generation: entry.generation,
                fetch: in_flight.clone(),
            };
        }

        if entry.is_fresh(now, self.stale_after_ms) {
            if let Some(data) = &entry.data {
                return Lookup::Fresh(data.clone());
            }
        }

        entry.generation += 1;
        entry.status = EntryStatus::Pending;
        let shared = fetch().boxed().shared();
        entry.in_flight = Some(shared.clone());
        debug!(key = %key, generation = entry.generation, "issuing request");

        Lookup::Wait {
            generation: entry.generation,
            fetch: shared,
        }
    }

    fn complete(
        &self,
        key: &CacheKey,
        generation: u64,
        result: &Result<QueryData, ApiError>,
    ) -> Completion {
        let now = self.clock.now_ms();
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            // Cleared while in flight.
            return Completion::Dropped;
        };
        if entry.generation != generation {
            return Completion::Superseded;
        }
        if entry.in_flight.take().is_none() {
            // Another joiner already stored this result.
            return Completion::Stored;
        }

        match result {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.error = None;
                entry.status = EntryStatus::Success;
                entry.fetched_at_ms = Some(now);
                entry.stale = false;
            }
            Err(err) => {
                entry.error = Some(err.clone());
                entry.status = EntryStatus::Error;
            }
        }
        Completion::Stored
    }

    /// Mark every entry of `scope` stale and detach its in-flight requests.
    /// Returns the number of entries touched.
    pub fn invalidate(&self, scope: CacheScope) -> usize {
        let touched = {
            let mut entries = self.lock();
            let mut touched = 0;
            for (key, entry) in entries.iter_mut() {
                if key.scope == scope {
                    entry.stale = true;
                    entry.in_flight = None;
                    entry.generation += 1;
                    touched += 1;
                }
            }
            touched
        };
        debug!(scope = %scope, touched, "invalidated cache scope");
        // No receivers is fine.
        let _ = self.events.send(CacheEvent::Invalidated(scope));
        touched
    }

    pub fn invalidate_all<'a>(&self, scopes: impl IntoIterator<Item = &'a CacheScope>) {
        for scope in scopes {
            self.invalidate(*scope);
        }
    }

    /// Drop every entry. Used on logout.
    pub fn clear(&self) {
        let dropped = {
            let mut entries = self.lock();
            let n = entries.len();
            entries.clear();
            n
        };
        debug!(dropped, "cache cleared");
        let _ = self.events.send(CacheEvent::Cleared);
    }

    pub fn peek(&self, key: &CacheKey) -> Option<EntrySnapshot> {
        self.lock().get(key).map(Entry::snapshot)
    }

    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        // A panic while holding the lock cannot leave an entry half-written
        // in a way later readers care about.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
