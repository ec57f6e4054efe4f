use serde::{Deserialize, Serialize};

use crate::resource::ResourceRecord;

/// Canonical list page produced by the normalizer.
///
/// `page` and `total_pages` are always at least 1. `page` may exceed
/// `total_pages` when the caller asked for a page past the end; such a page
/// is simply empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T = ResourceRecord> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: page.max(1),
            total_pages: 1,
        }
    }

    /// Present a complete, unpaginated list as one page.
    pub fn single_page(items: Vec<T>) -> Self {
        Self {
            total: items.len() as u64,
            items,
            page: 1,
            total_pages: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl<T> Default for PaginatedResult<T> {
    fn default() -> Self {
        Self::empty(1)
    }
}
