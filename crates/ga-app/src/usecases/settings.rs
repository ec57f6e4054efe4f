//! Platform settings use cases.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, info_span, Instrument};

use crate::cache::{FetchCache, QueryData};
use crate::mutation::{MutationError, MutationExecutor, MutationOutcome};
use ga_core::mutation::MutationOperation;
use ga_core::ports::AdminApiPort;
use ga_core::settings::SettingsDiff;
use ga_core::{
    ApiError, CacheKey, CacheScope, MutationIntent, PlatformSettings, QueryParams, ResourceType,
};

const SETTINGS_SCOPE: CacheScope = CacheScope::Resource(ResourceType::Settings);

/// Use case for reading the platform settings, merged over defaults.
pub struct GetSettings {
    api: Arc<dyn AdminApiPort>,
    cache: Arc<FetchCache>,
}

impl GetSettings {
    pub fn new(api: Arc<dyn AdminApiPort>, cache: Arc<FetchCache>) -> Self {
        Self { api, cache }
    }

    pub async fn execute(&self) -> Result<PlatformSettings, ApiError> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let key = CacheKey::view(SETTINGS_SCOPE, QueryParams::new());
            let api = self.api.clone();
            let data = self
                .cache
                .get(&key, move || {
                    let api = api.clone();
                    async move {
                        let body = api.view(SETTINGS_SCOPE, &QueryParams::new()).await?;
                        Ok(QueryData::Settings(PlatformSettings::from_response(&body)))
                    }
                })
                .await?;

            Ok(match data {
                QueryData::Settings(settings) => settings,
                _ => PlatformSettings::default(),
            })
        }
        .instrument(span)
        .await
    }
}

/// Use case for a bulk settings write.
///
/// ## Behavior
/// - Loads current settings for comparison
/// - Logs changed keys with old/new values
/// - Sends only the given keys
pub struct UpdateSettings {
    current: GetSettings,
    executor: Arc<MutationExecutor>,
}

impl UpdateSettings {
    pub fn new(
        api: Arc<dyn AdminApiPort>,
        cache: Arc<FetchCache>,
        executor: Arc<MutationExecutor>,
    ) -> Self {
        Self {
            current: GetSettings::new(api, cache),
            executor,
        }
    }

    pub async fn execute(&self, values: Map<String, Value>) -> Result<MutationOutcome, MutationError> {
        let span = info_span!("usecase.update_settings.execute", keys = values.len());

        async {
            let current = self.current.execute().await?;
            let changes = SettingsDiff::between(&current, &values);
            if changes.is_empty() {
                info!("Updating platform settings (no changes detected)");
            } else {
                info!(changed_fields = %changes.to_log_string(), "Updating platform settings");
            }

            let intent = MutationIntent::on_collection(
                ResourceType::Settings,
                MutationOperation::UpdateSettings { values },
            );
            let outcome = self.executor.execute(intent).await?;

            info!(changed_fields = %changes.to_log_string(), "Platform settings updated");
            Ok(outcome)
        }
        .instrument(span)
        .await
    }
}

/// Use case for switching maintenance mode on or off.
pub struct ToggleMaintenance {
    executor: Arc<MutationExecutor>,
}

impl ToggleMaintenance {
    pub fn new(executor: Arc<MutationExecutor>) -> Self {
        Self { executor }
    }

    pub async fn execute(
        &self,
        enabled: bool,
        message: Option<String>,
    ) -> Result<MutationOutcome, MutationError> {
        let span = info_span!("usecase.toggle_maintenance.execute", enabled);

        async {
            let intent = MutationIntent::on_collection(
                ResourceType::Settings,
                MutationOperation::ToggleMaintenance { enabled, message },
            );
            self.executor.execute(intent).await
        }
        .instrument(span)
        .await
    }
}
