use super::format::{format_bytes, format_count, format_date_time, truncate};
use super::table::Table;
use ga_core::monitoring::{
    error_rate_severity, p95_severity, query_duration_severity, response_time_severity,
    usage_severity, ApiMetrics, MonitoringData, QueryStat, Severity, SystemOverview,
};
use ga_core::{ApiError, MonitoringPanel};

fn flagged(value: String, severity: Severity) -> String {
    match severity {
        Severity::Normal => value,
        _ => format!("{} [{}]", value, severity.label()),
    }
}

fn panel_title(panel: MonitoringPanel) -> &'static str {
    match panel {
        MonitoringPanel::System => "System",
        MonitoringPanel::ApiMetrics => "API metrics",
        MonitoringPanel::Endpoints => "Endpoints",
        MonitoringPanel::Errors => "Recent errors",
        MonitoringPanel::Queries => "Database queries",
        MonitoringPanel::Logs => "Logs",
    }
}

fn render_system(system: &SystemOverview) -> String {
    let mut table = Table::new(["Metric", "Value"]);
    table.push_row(vec![
        "CPU".into(),
        flagged(
            format!("{:.1}% of {} cores", system.cpu_usage, system.cpu_cores),
            usage_severity(system.cpu_usage),
        ),
    ]);
    table.push_row(vec![
        "Memory".into(),
        flagged(
            format!(
                "{:.1}% ({} / {})",
                system.memory_percentage,
                format_bytes(system.memory_used),
                format_bytes(system.memory_total)
            ),
            usage_severity(system.memory_percentage),
        ),
    ]);
    if let Some(disk) = system.disk_percentage {
        table.push_row(vec![
            "Disk".into(),
            flagged(format!("{:.1}%", disk), usage_severity(disk)),
        ]);
    }
    table.push_row(vec![
        "Database".into(),
        format!("{} ({:.0} ms)", or_unknown(&system.database_status), system.database_response_ms),
    ]);
    if !system.redis_status.is_empty() {
        table.push_row(vec![
            "Redis".into(),
            format!("{} ({})", system.redis_status, or_unknown(&system.redis_memory)),
        ]);
    }
    table.push_row(vec!["Uptime".into(), or_unknown(&system.uptime).to_string()]);
    table.push_row(vec!["Connections".into(), format_count(system.active_connections)]);
    table.render()
}

fn or_unknown(text: &str) -> &str {
    if text.is_empty() {
        "unknown"
    } else {
        text
    }
}

fn render_api(metrics: &ApiMetrics) -> String {
    let mut table = Table::new(["Metric", "Value"]);
    table.push_row(vec!["Requests today".into(), format_count(metrics.requests_today)]);
    table.push_row(vec!["Requests this hour".into(), format_count(metrics.requests_this_hour)]);
    table.push_row(vec![
        "Avg response".into(),
        flagged(
            format!("{:.0} ms", metrics.avg_response_time_ms),
            response_time_severity(metrics.avg_response_time_ms),
        ),
    ]);
    table.push_row(vec![
        "P95 response".into(),
        flagged(
            format!("{:.0} ms", metrics.p95_response_time_ms),
            p95_severity(metrics.p95_response_time_ms),
        ),
    ]);
    table.push_row(vec![
        "Errors".into(),
        flagged(
            format!("{} ({:.2}%)", format_count(metrics.error_count), metrics.error_rate),
            error_rate_severity(metrics.error_rate),
        ),
    ]);
    table.render()
}

fn query_rows(table: &mut Table, stats: &[QueryStat]) {
    for q in stats {
        table.push_row(vec![
            q.model.clone(),
            q.operation.clone(),
            format_count(q.count),
            flagged(format!("{:.1} ms", q.avg_duration_ms), query_duration_severity(q.avg_duration_ms)),
            format!("{:.1} ms", q.max_duration_ms),
        ]);
    }
}

pub fn render_panel(panel: MonitoringPanel, result: &Result<MonitoringData, ApiError>) -> String {
    let mut out = format!("== {} ==\n", panel_title(panel));
    let data = match result {
        Ok(data) => data,
        Err(err) => {
            out.push_str(&format!("! failed to load: {}\n", err));
            return out;
        }
    };

    let body = match data {
        MonitoringData::System(system) => render_system(system),
        MonitoringData::Api(metrics) => render_api(metrics),
        MonitoringData::Endpoints(list) if list.is_empty() => "No endpoint data\n".to_string(),
        MonitoringData::Endpoints(list) => {
            let mut table = Table::new(["Method", "Endpoint", "Requests", "Avg", "Errors"]);
            for e in list {
                table.push_row(vec![
                    e.method.clone(),
                    truncate(&e.endpoint, 50),
                    format_count(e.count),
                    flagged(
                        format!("{:.0} ms", e.avg_response_time_ms),
                        response_time_severity(e.avg_response_time_ms),
                    ),
                    format_count(e.error_count),
                ]);
            }
            table.render()
        }
        MonitoringData::Errors(list) if list.is_empty() => "No errors recorded\n".to_string(),
        MonitoringData::Errors(list) => {
            let mut table = Table::new(["When", "Status", "Request", "Type", "Message"]);
            for e in list {
                table.push_row(vec![
                    format_date_time(&e.timestamp),
                    e.status_code.to_string(),
                    format!("{} {}", e.method, truncate(&e.endpoint, 40)),
                    e.kind.clone(),
                    truncate(&e.message, 60),
                ]);
            }
            table.render()
        }
        MonitoringData::Queries(analytics) => {
            let mut text = String::new();
            for (title, stats) in [("Slow", &analytics.slow), ("Frequent", &analytics.frequent)] {
                text.push_str(title);
                text.push('\n');
                if stats.is_empty() {
                    text.push_str("No queries recorded\n");
                    continue;
                }
                let mut table = Table::new(["Model", "Operation", "Count", "Avg", "Max"]);
                query_rows(&mut table, stats);
                text.push_str(&table.render());
            }
            text
        }
        MonitoringData::Logs(list) if list.is_empty() => "No log entries\n".to_string(),
        MonitoringData::Logs(list) => {
            let mut table = Table::new(["When", "Level", "Source", "Message"]);
            for entry in list {
                table.push_row(vec![
                    format_date_time(&entry.timestamp),
                    entry.level.to_string(),
                    entry.source.clone().unwrap_or_else(|| "-".to_string()),
                    truncate(&entry.message, 80),
                ]);
            }
            table.render()
        }
    };
    out.push_str(&body);
    out
}
