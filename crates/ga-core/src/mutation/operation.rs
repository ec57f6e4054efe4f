use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::ids::RecordId;
use crate::resource::ResourceType;

/// Report resolution actions offered by the console.
pub const REPORT_ACTIONS: [&str; 4] = ["warn", "ban", "remove", "dismiss"];

/// A named write against the backend.
///
/// Action endpoints (approve, ban, resolve, ...) are distinct operations and
/// not a generic status patch, because the server attaches side effects to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MutationOperation {
    UpdateStatus {
        status: String,
        reason: Option<String>,
    },
    Delete,
    Create {
        payload: Value,
    },
    Update {
        payload: Value,
    },
    Resolve {
        resolution: String,
        action: String,
    },
    Approve,
    Reject {
        reason: String,
    },
    Suspend {
        reason: String,
    },
    Unsuspend,
    Ban {
        reason: String,
    },
    Reorder {
        order: Vec<(RecordId, u32)>,
    },
    UpdateSettings {
        values: Map<String, Value>,
    },
    ToggleMaintenance {
        enabled: bool,
        message: Option<String>,
    },
}

/// Payload-free discriminant, used to identify controls and in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    UpdateStatus,
    Delete,
    Create,
    Update,
    Resolve,
    Approve,
    Reject,
    Suspend,
    Unsuspend,
    Ban,
    Reorder,
    UpdateSettings,
    ToggleMaintenance,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::UpdateStatus => "update_status",
            OperationKind::Delete => "delete",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Resolve => "resolve",
            OperationKind::Approve => "approve",
            OperationKind::Reject => "reject",
            OperationKind::Suspend => "suspend",
            OperationKind::Unsuspend => "unsuspend",
            OperationKind::Ban => "ban",
            OperationKind::Reorder => "reorder",
            OperationKind::UpdateSettings => "update_settings",
            OperationKind::ToggleMaintenance => "toggle_maintenance",
        }
    }

    /// Whether the operation addresses one existing record.
    pub fn requires_target(&self) -> bool {
        !matches!(
            self,
            OperationKind::Create
                | OperationKind::Reorder
                | OperationKind::UpdateSettings
                | OperationKind::ToggleMaintenance
        )
    }

    pub fn supported_by(&self, resource: ResourceType) -> bool {
        use OperationKind::*;
        match resource {
            ResourceType::Users => matches!(
                self,
                UpdateStatus | Suspend | Unsuspend | Ban | Update | Delete
            ),
            ResourceType::Jobs => {
                matches!(self, Approve | Reject | UpdateStatus | Update | Delete)
            }
            ResourceType::Applications => matches!(self, UpdateStatus),
            ResourceType::Reports => matches!(self, Resolve),
            ResourceType::Categories => matches!(self, Create | Update | Delete | Reorder),
            ResourceType::Skills => matches!(self, Create | Update | Delete),
            ResourceType::Settings => matches!(self, UpdateSettings | ToggleMaintenance),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MutationOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            MutationOperation::UpdateStatus { .. } => OperationKind::UpdateStatus,
            MutationOperation::Delete => OperationKind::Delete,
            MutationOperation::Create { .. } => OperationKind::Create,
            MutationOperation::Update { .. } => OperationKind::Update,
            MutationOperation::Resolve { .. } => OperationKind::Resolve,
            MutationOperation::Approve => OperationKind::Approve,
            MutationOperation::Reject { .. } => OperationKind::Reject,
            MutationOperation::Suspend { .. } => OperationKind::Suspend,
            MutationOperation::Unsuspend => OperationKind::Unsuspend,
            MutationOperation::Ban { .. } => OperationKind::Ban,
            MutationOperation::Reorder { .. } => OperationKind::Reorder,
            MutationOperation::UpdateSettings { .. } => OperationKind::UpdateSettings,
            MutationOperation::ToggleMaintenance { .. } => OperationKind::ToggleMaintenance,
        }
    }
}
