use tracing::{info_span, Instrument};

use super::api_failure;
use crate::render::render_dashboard;
use ga_app::AdminRuntime;

pub async fn show(runtime: &AdminRuntime, days: u32, top: u32) -> anyhow::Result<String> {
    let snapshot = runtime
        .load_dashboard()
        .execute(days, top)
        .instrument(info_span!("command.dashboard"))
        .await;

    if let Some(err) = snapshot.authorization_error() {
        return Err(api_failure(err.clone()));
    }
    Ok(render_dashboard(&snapshot))
}
