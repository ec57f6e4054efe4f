use serde_json::{Map, Value};
use tracing::{info_span, Instrument};

use super::{api_failure, mutation_failure};
use crate::cli::{SettingsAction, Toggle};
use crate::render::{render_diff, render_settings};
use ga_app::AdminRuntime;
use ga_core::settings::{parse_setting_value, SettingsDiff};

pub fn values_from_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, raw)| {
            let value = parse_setting_value(&raw);
            (key, value)
        })
        .collect()
}

pub async fn run(runtime: &AdminRuntime, action: Option<SettingsAction>) -> anyhow::Result<String> {
    let span = info_span!("command.settings");
    async {
        match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => {
                let settings = runtime.get_settings().execute().await.map_err(api_failure)?;
                Ok(render_settings(&settings))
            }
            SettingsAction::Set { pairs } => {
                let values = values_from_pairs(pairs);
                let current = runtime.get_settings().execute().await.map_err(api_failure)?;
                let diff = SettingsDiff::between(&current, &values);
                if diff.is_empty() {
                    return Ok(render_diff(&diff));
                }
                runtime
                    .update_settings()
                    .execute(values)
                    .await
                    .map_err(mutation_failure)?;
                Ok(format!("{}Settings saved\n", render_diff(&diff)))
            }
            SettingsAction::Maintenance { state, message } => {
                let enabled = state == Toggle::On;
                runtime
                    .toggle_maintenance()
                    .execute(enabled, message)
                    .await
                    .map_err(mutation_failure)?;
                Ok(if enabled {
                    "Maintenance mode enabled\n".to_string()
                } else {
                    "Maintenance mode disabled\n".to_string()
                })
            }
        }
    }
    .instrument(span)
    .await
}
