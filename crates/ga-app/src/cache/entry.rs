use futures::future::{BoxFuture, Shared};

use super::QueryData;
use ga_core::ApiError;

pub(super) type SharedFetch = Shared<BoxFuture<'static, Result<QueryData, ApiError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Success,
    Error,
}

/// Read-only copy of an entry, for views and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub status: EntryStatus,
    pub data: Option<QueryData>,
    pub error: Option<ApiError>,
    pub fetched_at_ms: Option<i64>,
    pub stale: bool,
    pub in_flight: bool,
}

pub(super) struct Entry {
    pub status: EntryStatus,
    /// Last successful data. Kept through refetches and later errors.
    pub data: Option<QueryData>,
    pub error: Option<ApiError>,
    pub fetched_at_ms: Option<i64>,
    pub stale: bool,
    /// Bumped on every issued request and every invalidation. A completion
    /// only lands if its generation is still current.
    pub generation: u64,
    pub in_flight: Option<SharedFetch>,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            status: EntryStatus::Pending,
            data: None,
            error: None,
            fetched_at_ms: None,
            stale: false,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn is_fresh(&self, now_ms: i64, stale_after_ms: i64) -> bool {
        if self.status != EntryStatus::Success || self.stale || self.data.is_none() {
            return false;
        }
        match self.fetched_at_ms {
            Some(at) => now_ms.saturating_sub(at) < stale_after_ms,
            None => false,
        }
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            fetched_at_ms: self.fetched_at_ms,
            stale: self.stale,
            in_flight: self.in_flight.is_some(),
        }
    }
}
