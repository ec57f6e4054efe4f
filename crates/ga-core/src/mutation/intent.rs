use serde::{Deserialize, Serialize};

use super::operation::{MutationOperation, OperationKind};
use super::policy;
use crate::ids::{MutationId, RecordId};
use crate::resource::{CacheScope, ResourceType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: ResourceType,
        operation: OperationKind,
    },

    #[error("{operation} on {resource} requires a target id")]
    MissingTarget {
        resource: ResourceType,
        operation: OperationKind,
    },
}

/// A user-initiated write: which resource, what operation, which record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationIntent {
    pub id: MutationId,
    pub resource: ResourceType,
    pub operation: MutationOperation,
    pub target: Option<RecordId>,
}

impl MutationIntent {
    pub fn new(resource: ResourceType, operation: MutationOperation, target: Option<RecordId>) -> Self {
        Self {
            id: MutationId::new(),
            resource,
            operation,
            target,
        }
    }

    /// Intent against one existing record.
    pub fn on(resource: ResourceType, target: impl Into<RecordId>, operation: MutationOperation) -> Self {
        Self::new(resource, operation, Some(target.into()))
    }

    /// Intent against the collection (create, reorder, settings).
    pub fn on_collection(resource: ResourceType, operation: MutationOperation) -> Self {
        Self::new(resource, operation, None)
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    pub fn validate(&self) -> Result<(), IntentError> {
        let operation = self.kind();
        if !operation.supported_by(self.resource) {
            return Err(IntentError::Unsupported {
                resource: self.resource,
                operation,
            });
        }
        if operation.requires_target() && self.target.is_none() {
            return Err(IntentError::MissingTarget {
                resource: self.resource,
                operation,
            });
        }
        Ok(())
    }

    /// Cache scopes that must be invalidated once this intent succeeds.
    pub fn affected_scopes(&self) -> Vec<CacheScope> {
        policy::affected_scopes(self.resource, &self.operation)
    }
}

/// Lifecycle of a submitted intent. There is no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    Created,
    Submitted,
    Succeeded,
    Failed(String),
}

impl MutationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationStatus::Succeeded | MutationStatus::Failed(_))
    }
}
