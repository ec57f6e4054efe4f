//! Mutation executor.
//!
//! Submits a [`MutationIntent`] and, only when the backend accepts it,
//! invalidates every cache scope the intent affects. A failed mutation leaves
//! the cache untouched. There is no retry and no de-duplication here; the
//! browser disables the triggering control instead.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use crate::cache::FetchCache;
use ga_core::mutation::{IntentError, OperationKind};
use ga_core::ports::AdminApiPort;
use ga_core::{ApiError, CacheScope, MutationId, MutationIntent, MutationStatus, RecordId, ResourceType};

const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    #[error("invalid mutation: {0}")]
    Invalid(#[from] IntentError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl MutationError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            MutationError::Api(err) => Some(err),
            MutationError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub id: MutationId,
    /// Raw acknowledgement body from the backend.
    pub response: Value,
    pub invalidated: Vec<CacheScope>,
}

/// What the executor remembers about a submitted intent.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub id: MutationId,
    pub resource: ResourceType,
    pub operation: OperationKind,
    pub target: Option<RecordId>,
    pub status: MutationStatus,
}

pub struct MutationExecutor {
    api: Arc<dyn AdminApiPort>,
    cache: Arc<FetchCache>,
    history: Mutex<VecDeque<MutationRecord>>,
}

impl MutationExecutor {
    pub fn new(api: Arc<dyn AdminApiPort>, cache: Arc<FetchCache>) -> Self {
        Self {
            api,
            cache,
            history: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn execute(&self, intent: MutationIntent) -> Result<MutationOutcome, MutationError> {
        let span = info_span!(
            "usecase.execute_mutation.execute",
            mutation_id = %intent.id,
            resource = %intent.resource,
            operation = %intent.kind(),
        );

        async {
            self.record(&intent, MutationStatus::Created);

            if let Err(err) = intent.validate() {
                warn!(error = %err, "rejecting invalid mutation");
                self.set_status(&intent.id, MutationStatus::Failed(err.to_string()));
                return Err(MutationError::Invalid(err));
            }

            self.set_status(&intent.id, MutationStatus::Submitted);

            match self.api.mutate(&intent).await {
                Ok(response) => {
                    let scopes = intent.affected_scopes();
                    self.cache.invalidate_all(&scopes);
                    self.set_status(&intent.id, MutationStatus::Succeeded);
                    info!(invalidated = scopes.len(), "mutation succeeded");
                    Ok(MutationOutcome {
                        id: intent.id.clone(),
                        response,
                        invalidated: scopes,
                    })
                }
                Err(err) => {
                    warn!(error = %err, "mutation failed");
                    self.set_status(&intent.id, MutationStatus::Failed(err.to_string()));
                    Err(MutationError::Api(err))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Most recent intents first.
    pub fn history(&self) -> Vec<MutationRecord> {
        self.lock_history().iter().rev().cloned().collect()
    }

    pub fn status_of(&self, id: &MutationId) -> Option<MutationStatus> {
        self.lock_history()
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.status.clone())
    }

    fn record(&self, intent: &MutationIntent, status: MutationStatus) {
        let mut history = self.lock_history();
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(MutationRecord {
            id: intent.id.clone(),
            resource: intent.resource,
            operation: intent.kind(),
            target: intent.target.clone(),
            status,
        });
    }

    fn set_status(&self, id: &MutationId, status: MutationStatus) {
        if let Some(record) = self.lock_history().iter_mut().rev().find(|r| &r.id == id) {
            record.status = status;
        }
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, VecDeque<MutationRecord>> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
