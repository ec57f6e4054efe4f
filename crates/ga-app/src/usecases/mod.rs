//! Use cases that are not tied to a list page.

pub mod dashboard;
pub mod get_record;
pub mod monitoring;
pub mod settings;

pub use dashboard::{DashboardSnapshot, LoadDashboard};
pub use get_record::GetRecord;
pub use monitoring::{LoadMonitoringPanel, MonitoringPoller, PanelUpdate};
pub use settings::{GetSettings, ToggleMaintenance, UpdateSettings};
