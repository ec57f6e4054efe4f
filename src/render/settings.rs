use serde_json::Value;

use super::table::Table;
use ga_core::settings::{SettingsDiff, SettingsSection};
use ga_core::PlatformSettings;

fn show(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        other => other.to_string(),
    }
}

pub fn render_settings(settings: &PlatformSettings) -> String {
    let mut out = String::new();
    if settings.maintenance_mode() {
        out.push_str("MAINTENANCE MODE IS ON");
        if let Some(message) = settings.maintenance_message().filter(|m| !m.is_empty()) {
            out.push_str(&format!(": {}", message));
        }
        out.push_str("\n\n");
    }

    for section in SettingsSection::ALL {
        out.push_str(section.title());
        out.push('\n');
        let mut table = Table::new(["Key", "Value"]);
        for (key, value) in settings.section_values(section) {
            table.push_row(vec![key, show(&value)]);
        }
        out.push_str(&table.render());
        out.push('\n');
    }

    let other: Vec<_> = settings
        .iter()
        .filter(|(k, _)| SettingsSection::of_key(k).is_none())
        .collect();
    if !other.is_empty() {
        out.push_str("Other\n");
        let mut table = Table::new(["Key", "Value"]);
        for (key, value) in other {
            table.push_row(vec![key.clone(), show(value)]);
        }
        out.push_str(&table.render());
    }
    out
}

pub fn render_diff(diff: &SettingsDiff) -> String {
    if diff.is_empty() {
        return "No changes\n".to_string();
    }
    diff.changes
        .iter()
        .map(|c| {
            let old = c.old.as_ref().map(show).unwrap_or_else(|| "(unset)".to_string());
            format!("{}: {} -> {}\n", c.key, old, show(&c.new))
        })
        .collect()
}
