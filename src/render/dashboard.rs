use super::format::{format_count, format_date, format_date_time, truncate};
use super::table::Table;
use ga_app::usecases::DashboardSnapshot;

/// Number of chart rows shown; the chart is summarised by its latest days.
const CHART_ROWS: usize = 7;

pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    match &snapshot.stats {
        Some(stats) => {
            out.push_str("Overview\n");
            let mut table = Table::new(["Metric", "Total", "Detail"]);
            let growth = stats
                .users_growth_rate
                .map(|g| format!(", {:+.1}% growth", g))
                .unwrap_or_default();
            table.push_row(vec![
                "Users".into(),
                format_count(stats.total_users),
                format!(
                    "{} active, {} new today{}",
                    format_count(stats.active_users),
                    format_count(stats.new_users_today),
                    growth
                ),
            ]);
            table.push_row(vec![
                "Jobs".into(),
                format_count(stats.total_jobs),
                format!(
                    "{} active, {} completed this week",
                    format_count(stats.active_jobs),
                    format_count(stats.completed_jobs_this_week)
                ),
            ]);
            table.push_row(vec![
                "Applications".into(),
                format_count(stats.total_applications),
                format!("{} pending", format_count(stats.pending_applications)),
            ]);
            table.push_row(vec![
                "Reports".into(),
                format_count(stats.total_reports),
                format!("{} pending", format_count(stats.pending_reports)),
            ]);
            table.push_row(vec![
                "Rating".into(),
                format!("{:.1}", stats.average_rating),
                "average".into(),
            ]);
            out.push_str(&table.render());
        }
        None => out.push_str("Overview unavailable\n"),
    }

    if !snapshot.chart.is_empty() {
        out.push_str("\nGrowth (latest days)\n");
        let mut table = Table::new(["Date", "Users", "Jobs", "Applications"]);
        let start = snapshot.chart.len().saturating_sub(CHART_ROWS);
        for point in &snapshot.chart[start..] {
            table.push_row(vec![
                format_date(&point.date),
                format_count(point.users),
                format_count(point.jobs),
                format_count(point.applications),
            ]);
        }
        out.push_str(&table.render());
    }

    out.push_str("\nRecent activity\n");
    if snapshot.activity.is_empty() {
        out.push_str("No recent activity\n");
    } else {
        let mut table = Table::new(["When", "Type", "Message"]);
        for entry in &snapshot.activity {
            table.push_row(vec![
                format_date_time(&entry.timestamp),
                entry.kind.clone(),
                truncate(&entry.message, 60),
            ]);
        }
        out.push_str(&table.render());
    }

    out.push_str("\nTop employers\n");
    if snapshot.top_employers.is_empty() {
        out.push_str("No employers yet\n");
    } else {
        let mut table = Table::new(["Employer", "Email", "Jobs"]);
        for employer in &snapshot.top_employers {
            table.push_row(vec![
                employer.name.clone(),
                employer.email.clone(),
                format_count(employer.jobs_count),
            ]);
        }
        out.push_str(&table.render());
    }

    for (view, err) in &snapshot.errors {
        out.push_str(&format!("\n! {} failed to load: {}\n", view.path(), err));
    }
    out
}
