use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::api_failure;
use crate::cli::MonitoringArgs;
use crate::render::render_panel;
use ga_app::AdminRuntime;
use ga_core::monitoring::default_params;
use ga_core::{MonitoringPanel, QueryParams};

/// Panels to show with their request parameters, command-line filters applied.
pub fn panel_requests(args: &MonitoringArgs) -> Vec<(MonitoringPanel, QueryParams)> {
    let panels: Vec<MonitoringPanel> = if args.panels.is_empty() {
        MonitoringPanel::ALL.to_vec()
    } else {
        let mut panels: Vec<MonitoringPanel> = args.panels.iter().copied().map(Into::into).collect();
        panels.sort();
        panels.dedup();
        panels
    };

    panels
        .into_iter()
        .map(|panel| {
            let mut params = default_params(panel);
            match panel {
                MonitoringPanel::Logs => {
                    if let Some(level) = args.level.as_deref().filter(|l| !l.trim().is_empty()) {
                        params.insert("level".to_string(), level.to_ascii_uppercase());
                    }
                    if let Some(search) = args.search.as_deref().filter(|s| !s.trim().is_empty()) {
                        params.insert("search".to_string(), search.to_string());
                    }
                }
                MonitoringPanel::Errors => {
                    if let Some(kind) = args.error_type.as_deref().filter(|t| !t.trim().is_empty()) {
                        params.insert("type".to_string(), kind.to_string());
                    }
                }
                _ => {}
            }
            (panel, params)
        })
        .collect()
}

pub async fn show(runtime: &AdminRuntime, args: MonitoringArgs) -> anyhow::Result<String> {
    let requests = panel_requests(&args);
    if args.watch {
        watch(runtime, requests).await?;
        return Ok(String::new());
    }

    let loader = runtime.load_monitoring_panel();
    let mut out = String::new();
    for (panel, params) in requests {
        let result = loader.execute(panel, params).await;
        if let Err(err) = &result {
            if err.is_authorization() {
                return Err(api_failure(err.clone()));
            }
        }
        out.push_str(&render_panel(panel, &result));
        out.push('\n');
    }
    Ok(out)
}

/// Print each panel as it refreshes until Ctrl-C or a revoked session.
async fn watch(
    runtime: &AdminRuntime,
    requests: Vec<(MonitoringPanel, QueryParams)>,
) -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping monitoring");
        }
        ctrl_c.cancel();
    });

    let (mut updates, handles) = runtime.monitoring_poller().start(requests, token.clone());
    let mut failure = None;
    while let Some(update) = updates.recv().await {
        if let Err(err) = &update.result {
            if err.is_authorization() {
                failure = Some(err.clone());
                token.cancel();
                break;
            }
        }
        println!("{}", render_panel(update.panel, &update.result));
    }
    drop(updates);

    for handle in handles {
        if let Err(err) = handle.await {
            warn!(error = %err, "monitoring task ended abnormally");
        }
    }
    match failure {
        Some(err) => Err(api_failure(err)),
        None => Ok(()),
    }
}
