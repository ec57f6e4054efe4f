//! Resource list pages and single-record detail views.

use serde_json::Value;

use super::format::{format_currency, format_date, truncate};
use super::table::Table;
use ga_core::{PaginatedResult, ResourceRecord, ResourceType};

const TITLE_WIDTH: usize = 40;

fn text_or_dash(record: &ResourceRecord, path: &str) -> String {
    record.text(path).unwrap_or("-").to_string()
}

fn person(record: &ResourceRecord, prefix: &str) -> Option<String> {
    let first = record.text(&format!("{}firstName", prefix));
    let last = record.text(&format!("{}lastName", prefix));
    match (first, last) {
        (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
        (Some(n), None) | (None, Some(n)) => Some(n.to_string()),
        (None, None) => None,
    }
}

fn status(record: &ResourceRecord) -> String {
    record.status.clone().unwrap_or_else(|| "-".to_string())
}

fn count(record: &ResourceRecord, paths: &[&str]) -> String {
    paths
        .iter()
        .find_map(|p| record.number(p))
        .map(|n| format!("{}", n.max(0.0) as u64))
        .unwrap_or_else(|| "0".to_string())
}

fn headers(resource: ResourceType) -> &'static [&'static str] {
    match resource {
        ResourceType::Users => &["ID", "User", "Role", "Status", "Rating", "Jobs", "Joined"],
        ResourceType::Jobs => &[
            "ID",
            "Job",
            "Employer",
            "Status",
            "Pay",
            "Applications",
            "Posted",
        ],
        ResourceType::Applications => &[
            "ID",
            "Applicant",
            "Job",
            "Employer",
            "Status",
            "Proposed Rate",
            "Applied",
        ],
        ResourceType::Reports => &[
            "ID",
            "Type",
            "Reason",
            "Reported By",
            "Reported Content",
            "Status",
            "Submitted",
        ],
        ResourceType::Categories => &["ID", "Name", "Slug", "Description", "Jobs"],
        ResourceType::Skills => &["ID", "Name", "Category"],
        ResourceType::Settings => &[],
    }
}

fn row(resource: ResourceType, r: &ResourceRecord) -> Vec<String> {
    let id = r.id.to_string();
    match resource {
        ResourceType::Users => {
            let mut user = r.display_label(resource);
            if let Some(email) = r.text("email").filter(|e| *e != user) {
                user = format!("{} <{}>", user, email);
            }
            let role = r.text("role").map(str::to_string).unwrap_or_else(|| {
                let employer = r.field("isEmployer").and_then(Value::as_bool).unwrap_or(false);
                if employer { "employer" } else { "worker" }.to_string()
            });
            let rating = match r.number("rating") {
                Some(n) if n > 0.0 => format!("★ {:.1}", n),
                _ => "N/A".to_string(),
            };
            vec![
                id,
                user,
                role,
                status(r),
                rating,
                count(r, &["jobsCount", "totalJobs"]),
                format_date(r.text("createdAt").unwrap_or("")),
            ]
        }
        ResourceType::Jobs => {
            let employer = r
                .text("employer.name")
                .map(str::to_string)
                .or_else(|| person(r, "employer."))
                .unwrap_or_else(|| "-".to_string());
            let mut pay = format_currency(r.number("payAmount"));
            if let Some(kind) = r.text("payType") {
                pay = format!("{} / {}", pay, kind);
            }
            vec![
                id,
                truncate(&text_or_dash(r, "title"), TITLE_WIDTH),
                employer,
                status(r),
                pay,
                count(r, &["applicationsCount"]),
                format_date(r.text("createdAt").unwrap_or("")),
            ]
        }
        ResourceType::Applications => {
            let applicant = person(r, "applicant.")
                .or_else(|| person(r, "worker."))
                .unwrap_or_else(|| "-".to_string());
            let rate = match r.number("proposedRate") {
                Some(n) if n > 0.0 => format_currency(Some(n)),
                _ => "-".to_string(),
            };
            vec![
                id,
                applicant,
                truncate(&text_or_dash(r, "job.title"), TITLE_WIDTH),
                person(r, "employer.").unwrap_or_else(|| "-".to_string()),
                status(r),
                rate,
                format_date(r.text("createdAt").unwrap_or("")),
            ]
        }
        ResourceType::Reports => {
            let kind = r.text("type").unwrap_or("-");
            let content = match kind {
                "user" => person(r, "reportedUser."),
                "job" => r.text("reportedJob.title").map(|t| truncate(t, TITLE_WIDTH)),
                "message" => r
                    .text("reportedId")
                    .map(|id| format!("Message #{}", id)),
                _ => None,
            };
            vec![
                id,
                kind.to_string(),
                text_or_dash(r, "reason"),
                person(r, "reporter.").unwrap_or_else(|| "-".to_string()),
                content.unwrap_or_else(|| "-".to_string()),
                status(r),
                format_date(r.text("createdAt").unwrap_or("")),
            ]
        }
        ResourceType::Categories => vec![
            id,
            text_or_dash(r, "name"),
            text_or_dash(r, "slug"),
            truncate(r.text("description").unwrap_or(""), TITLE_WIDTH),
            count(r, &["jobCount", "jobsCount"]),
        ],
        ResourceType::Skills => vec![id, text_or_dash(r, "name"), text_or_dash(r, "category.name")],
        ResourceType::Settings => Vec::new(),
    }
}

/// A list page with a paging footer, or a "No ... found" line.
pub fn render_page(resource: ResourceType, page: &PaginatedResult<ResourceRecord>) -> String {
    if page.items.is_empty() {
        return format!("No {} found\n", resource);
    }
    let mut table = Table::new(headers(resource).iter().copied());
    for record in &page.items {
        table.push_row(row(resource, record));
    }
    let mut out = table.render();
    out.push_str(&format!(
        "\nPage {} of {} ({} total)\n",
        page.page,
        page.total_pages.max(1),
        page.total
    ));
    out
}

/// Every field of one record, one per line, nested values as compact JSON.
pub fn render_record(resource: ResourceType, record: &ResourceRecord) -> String {
    let mut out = format!("{} {}\n", resource.singular(), record.display_label(resource));
    let key_width = record.fields.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (key, value) in &record.fields {
        let shown = match value {
            Value::String(s) => s.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        out.push_str(&format!("  {:width$}  {}\n", key, shown, width = key_width));
    }
    out
}
