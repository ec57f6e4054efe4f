use std::fmt;

use ga_core::mutation::OperationKind;
use ga_core::{ApiError, PaginatedResult, QueryDescriptor, RecordId, ResourceRecord, ResourceType};

/// A new browser is `Loading` on page 1 with no data until its first load lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    Loading,
    Loaded,
    Errored,
}

/// A row action button: one operation on one record (or on the collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Control {
    pub operation: OperationKind,
    pub target: Option<RecordId>,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(id) => write!(f, "{} on {}", self.operation, id),
            None => write!(f, "{}", self.operation),
        }
    }
}

/// What a list page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserView {
    pub resource: ResourceType,
    pub state: BrowserState,
    pub query: QueryDescriptor,
    /// Last successfully loaded page, kept while reloading and after errors.
    pub page: Option<PaginatedResult<ResourceRecord>>,
    pub error: Option<ApiError>,
    pub busy: Vec<Control>,
}

impl BrowserView {
    pub fn items(&self) -> &[ResourceRecord] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    pub fn is_busy(&self, control: &Control) -> bool {
        self.busy.contains(control)
    }

    /// Loaded, no error, and nothing to show.
    pub fn is_empty(&self) -> bool {
        self.state == BrowserState::Loaded && self.error.is_none() && self.items().is_empty()
    }
}
