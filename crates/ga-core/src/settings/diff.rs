use serde_json::Value;

use super::PlatformSettings;

/// One changed setting.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingChange {
    pub key: String,
    pub old: Option<Value>,
    pub new: Value,
}

/// Keys whose values differ between two settings documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDiff {
    pub changes: Vec<SettingChange>,
}

impl SettingsDiff {
    /// Compare the current settings against the values about to be written.
    pub fn between<'a>(
        current: &PlatformSettings,
        updates: impl IntoIterator<Item = (&'a String, &'a Value)>,
    ) -> Self {
        let changes = updates
            .into_iter()
            .filter(|(k, v)| current.get(k) != Some(*v))
            .map(|(k, v)| SettingChange {
                key: k.clone(),
                old: current.get(k).cloned(),
                new: v.clone(),
            })
            .collect();
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn to_log_string(&self) -> String {
        if self.changes.is_empty() {
            return "(no changes)".to_string();
        }
        self.changes
            .iter()
            .map(|c| match &c.old {
                Some(old) => format!("{}: {} → {}", c.key, old, c.new),
                None => format!("{}: (unset) → {}", c.key, c.new),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_diff_reports_only_changed_keys() {
        let current = PlatformSettings::default();
        let mut updates = Map::new();
        updates.insert("job_expiry_days".into(), json!(30));
        updates.insert("max_images_per_job".into(), json!(8));

        let diff = SettingsDiff::between(&current, &updates);
        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.to_log_string(), "max_images_per_job: 5 → 8");
    }
}
