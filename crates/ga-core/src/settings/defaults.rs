use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Groups of settings saved together from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSection {
    Jobs,
    Maintenance,
    AppVersion,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 3] = [
        SettingsSection::Jobs,
        SettingsSection::Maintenance,
        SettingsSection::AppVersion,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SettingsSection::Jobs => "Jobs",
            SettingsSection::Maintenance => "Maintenance",
            SettingsSection::AppVersion => "App Version",
        }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            SettingsSection::Jobs => &[
                "job_requires_approval",
                "max_images_per_job",
                "job_expiry_days",
                "featured_job_price",
                "min_pay_amount",
                "max_pay_amount",
            ],
            SettingsSection::Maintenance => &["maintenance_mode", "maintenance_message"],
            SettingsSection::AppVersion => &[
                "min_app_version_ios",
                "min_app_version_android",
                "force_update_message",
                "app_store_url",
                "play_store_url",
            ],
        }
    }

    pub fn of_key(key: &str) -> Option<SettingsSection> {
        Self::ALL.into_iter().find(|s| s.keys().iter().any(|k| *k == key))
    }
}

pub fn default_settings() -> BTreeMap<String, Value> {
    let pairs = [
        ("job_requires_approval", json!(true)),
        ("max_images_per_job", json!(5)),
        ("job_expiry_days", json!(30)),
        ("featured_job_price", json!(9.99)),
        ("min_pay_amount", json!(10)),
        ("max_pay_amount", json!(10000)),
        ("maintenance_mode", json!(false)),
        (
            "maintenance_message",
            json!("We are currently performing maintenance. Please check back soon."),
        ),
        ("min_app_version_ios", json!("1.0.0")),
        ("min_app_version_android", json!("1.0.0")),
        (
            "force_update_message",
            json!("A new version of GigHub is available. Please update to continue using the app."),
        ),
        ("app_store_url", json!("https://apps.apple.com/app/gighub-uk/id123456789")),
        (
            "play_store_url",
            json!("https://play.google.com/store/apps/details?id=uk.gighub.app"),
        ),
    ];
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_belongs_to_a_section() {
        for key in default_settings().keys() {
            assert!(SettingsSection::of_key(key).is_some(), "{key} has no section");
        }
    }
}
