use std::sync::Arc;

use tracing::{info_span, Instrument};

use crate::cache::{FetchCache, QueryData};
use ga_core::normalize::normalize_record;
use ga_core::ports::AdminApiPort;
use ga_core::{ApiError, CacheKey, CacheScope, RecordId, ResourceRecord, ResourceType};

/// Use case for loading one record, e.g. for a detail view.
///
/// Cached under the resource's scope, so any mutation of that resource type
/// makes it stale as well.
pub struct GetRecord {
    api: Arc<dyn AdminApiPort>,
    cache: Arc<FetchCache>,
}

impl GetRecord {
    pub fn new(api: Arc<dyn AdminApiPort>, cache: Arc<FetchCache>) -> Self {
        Self { api, cache }
    }

    /// `Ok(None)` when the response carries no recognisable record.
    pub async fn execute(
        &self,
        resource: ResourceType,
        id: &RecordId,
    ) -> Result<Option<ResourceRecord>, ApiError> {
        let span = info_span!("usecase.get_record.execute", resource = %resource, id = %id);

        async {
            let key = CacheKey::record(CacheScope::Resource(resource), id.clone());
            let api = self.api.clone();
            let target = id.clone();
            let data = self
                .cache
                .get(&key, move || {
                    let api = api.clone();
                    let target = target.clone();
                    async move {
                        let body = api.get(resource, &target).await?;
                        Ok(QueryData::Record(normalize_record(&body, resource)))
                    }
                })
                .await?;

            Ok(match data {
                QueryData::Record(record) => record,
                _ => None,
            })
        }
        .instrument(span)
        .await
    }
}
