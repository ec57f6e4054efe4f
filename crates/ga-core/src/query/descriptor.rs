use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a list view asks for: page, free-text search and filter values.
///
/// Two descriptors are the same cache key iff they are structurally equal.
/// Filters live in a sorted map, so insertion order never matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub page: u32,
    pub search: String,
    pub filters: BTreeMap<String, String>,
}

impl QueryDescriptor {
    pub fn first_page() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::first_page()
    }
}
