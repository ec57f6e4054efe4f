//! Query descriptors, per-browser query state and cache keys.

mod descriptor;
mod key;
mod state;

pub use descriptor::QueryDescriptor;
pub use key::{CacheKey, QueryKey};
pub use state::{QueryState, DEFAULT_PAGE_SIZE};

use std::collections::BTreeMap;

/// Request parameters, sorted so equal parameter sets compare and hash equal.
pub type QueryParams = BTreeMap<String, String>;
