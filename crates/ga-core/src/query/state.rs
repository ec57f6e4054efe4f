use serde::{Deserialize, Serialize};

use super::{CacheKey, QueryDescriptor, QueryParams};
use crate::resource::CacheScope;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page, search and filters owned by one resource browser.
///
/// Changing the search term or any filter always returns to page 1. The page
/// is clamped to at least 1 but never to the server's page count, which the
/// state does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    descriptor: QueryDescriptor,
    page_size: u32,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            descriptor: QueryDescriptor::first_page(),
            page_size: page_size.max(1),
        }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn page(&self) -> u32 {
        self.descriptor.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.descriptor.search
    }

    pub fn set_page(&mut self, page: i64) {
        self.descriptor.page = page.clamp(1, u32::MAX as i64) as u32;
    }

    /// Surrounding whitespace is dropped, so `"dev "` and `"dev"` are one query.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.descriptor.search = term.into().trim().to_string();
        self.descriptor.page = 1;
    }

    /// Set a filter. An empty value means "all" and removes the filter.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.descriptor.filters.remove(&name);
        } else {
            self.descriptor.filters.insert(name, value);
        }
        self.descriptor.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.descriptor.filters.clear();
        self.descriptor.page = 1;
    }

    /// Wire parameters: `page`, `limit`, a non-empty `search`, then the filters.
    pub fn to_request_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("page".to_string(), self.descriptor.page.to_string());
        params.insert("limit".to_string(), self.page_size.to_string());
        if !self.descriptor.search.is_empty() {
            params.insert("search".to_string(), self.descriptor.search.clone());
        }
        for (name, value) in &self.descriptor.filters {
            params.insert(name.clone(), value.clone());
        }
        params
    }

    pub fn cache_key(&self, scope: CacheScope) -> CacheKey {
        CacheKey::list(scope, self.descriptor.clone(), self.page_size)
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
