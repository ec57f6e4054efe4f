use std::collections::BTreeSet;

use super::operation::MutationOperation;
use crate::resource::{CacheScope, DashboardView, ResourceType};

const REPORT_ACTIONS_AFFECTING_USERS: [&str; 3] = ["ban", "suspend", "warn"];
const REPORT_ACTIONS_AFFECTING_JOBS: [&str; 3] = ["remove", "remove_content", "remove_job"];

/// Scopes a successful mutation invalidates.
///
/// Every mutation invalidates its own resource. Beyond that:
/// users, applications and reports feed the dashboard counters and the
/// activity feed; jobs also feed the chart; categories and skills reference
/// each other; a report resolution that acts on the reported user or job
/// invalidates that resource too.
pub fn affected_scopes(resource: ResourceType, operation: &MutationOperation) -> Vec<CacheScope> {
    let mut scopes = BTreeSet::new();
    scopes.insert(CacheScope::Resource(resource));

    match resource {
        ResourceType::Users | ResourceType::Applications => {
            scopes.insert(CacheScope::Dashboard(DashboardView::Stats));
            scopes.insert(CacheScope::Dashboard(DashboardView::Activity));
        }
        ResourceType::Jobs => {
            scopes.insert(CacheScope::Dashboard(DashboardView::Stats));
            scopes.insert(CacheScope::Dashboard(DashboardView::Chart));
            scopes.insert(CacheScope::Dashboard(DashboardView::Activity));
        }
        ResourceType::Reports => {
            scopes.insert(CacheScope::Dashboard(DashboardView::Stats));
            scopes.insert(CacheScope::Dashboard(DashboardView::Activity));
            if let MutationOperation::Resolve { action, .. } = operation {
                let action = action.trim().to_ascii_lowercase();
                if REPORT_ACTIONS_AFFECTING_USERS.iter().any(|a| *a == action) {
                    scopes.insert(CacheScope::Resource(ResourceType::Users));
                }
                if REPORT_ACTIONS_AFFECTING_JOBS.iter().any(|a| *a == action) {
                    scopes.insert(CacheScope::Resource(ResourceType::Jobs));
                }
            }
        }
        ResourceType::Categories => {
            scopes.insert(CacheScope::Resource(ResourceType::Skills));
        }
        ResourceType::Skills => {
            scopes.insert(CacheScope::Resource(ResourceType::Categories));
        }
        ResourceType::Settings => {}
    }

    scopes.into_iter().collect()
}
