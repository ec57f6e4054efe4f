use serde::{Deserialize, Serialize};
use std::fmt;

use super::{QueryDescriptor, QueryParams};
use crate::ids::RecordId;
use crate::resource::CacheScope;

/// The request half of a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKey {
    /// A list page. `limit` is part of the request, so it is part of the key.
    List { descriptor: QueryDescriptor, limit: u32 },
    Record(RecordId),
    /// Singleton endpoints (dashboard, settings, monitoring) keyed by their parameters.
    View(QueryParams),
}

/// Full cache key: which scope the entry is invalidated with, and which request it caches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub scope: CacheScope,
    pub query: QueryKey,
}

impl CacheKey {
    pub fn new(scope: CacheScope, query: QueryKey) -> Self {
        Self { scope, query }
    }

    pub fn list(scope: CacheScope, descriptor: QueryDescriptor, limit: u32) -> Self {
        Self::new(scope, QueryKey::List { descriptor, limit })
    }

    pub fn record(scope: CacheScope, id: RecordId) -> Self {
        Self::new(scope, QueryKey::Record(id))
    }

    pub fn view(scope: CacheScope, params: QueryParams) -> Self {
        Self::new(scope, QueryKey::View(params))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            QueryKey::List { descriptor: d, limit } => write!(
                f,
                "{}?page={}&limit={}&search={}&filters={:?}",
                self.scope, d.page, limit, d.search, d.filters
            ),
            QueryKey::Record(id) => write!(f, "{}/{}", self.scope, id),
            QueryKey::View(params) => write!(f, "{}?{:?}", self.scope, params),
        }
    }
}
