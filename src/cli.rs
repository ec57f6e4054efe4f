//! Command-line surface of the console.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ga_core::mutation::REPORT_ACTIONS;
use ga_core::MonitoringPanel;

#[derive(Parser, Debug)]
#[command(name = "gigadmin")]
#[command(version, about = "Admin console for the gig marketplace", long_about = None)]
pub struct Cli {
    /// Config file. Defaults to the per-user config dir.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Debug logging for the console crates (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with an admin account
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Platform stats, growth chart, recent activity and top employers
    Dashboard {
        /// Days of growth history
        #[arg(long, default_value_t = 365)]
        days: u32,
        /// Number of top employers
        #[arg(long, default_value_t = 5)]
        top: u32,
    },
    /// Browse and moderate users
    Users {
        #[command(flatten)]
        list: ListArgs,
        #[command(subcommand)]
        action: Option<UserAction>,
    },
    /// Browse and moderate job posts
    Jobs {
        #[command(flatten)]
        list: ListArgs,
        #[command(subcommand)]
        action: Option<JobAction>,
    },
    /// Browse job applications
    Applications {
        #[command(flatten)]
        list: ListArgs,
        #[command(subcommand)]
        action: Option<ApplicationAction>,
    },
    /// Review and resolve reports
    Reports {
        #[command(flatten)]
        list: ListArgs,
        #[command(subcommand)]
        action: Option<ReportAction>,
    },
    /// Manage job categories
    Categories {
        #[command(flatten)]
        list: ListArgs,
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },
    /// Manage skills
    Skills {
        #[command(flatten)]
        list: ListArgs,
        #[command(subcommand)]
        action: Option<SkillAction>,
    },
    /// Platform settings and maintenance mode
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// System health, API metrics, errors, queries and logs
    Monitoring(MonitoringArgs),
}

/// Paging, search and filters shared by every list command.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    /// Category id
    #[arg(long)]
    pub category: Option<String>,
}

impl ListArgs {
    /// Filters in wire-parameter names. `None` values are dropped.
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("status", self.status.as_deref()),
            ("role", self.role.as_deref()),
            ("type", self.kind.as_deref()),
            ("categoryId", self.category.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    Show { id: String },
    Suspend {
        id: String,
        #[arg(long)]
        reason: String,
    },
    Unsuspend { id: String },
    Ban {
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Set an arbitrary status
    Status {
        id: String,
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Update {
        id: String,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum JobAction {
    Show { id: String },
    Approve { id: String },
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
    Status { id: String, status: String },
    Update {
        id: String,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationAction {
    Show { id: String },
    Status { id: String, status: String },
}

#[derive(Subcommand, Debug)]
pub enum ReportAction {
    Show { id: String },
    Resolve {
        id: String,
        #[arg(long)]
        resolution: String,
        #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(REPORT_ACTIONS))]
        action: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    Create {
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
    Update {
        id: String,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
    Delete { id: String },
    /// Ids in their new display order
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SkillAction {
    Create {
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
    Update {
        id: String,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    Show,
    /// Write one or more settings
    Set {
        #[arg(value_name = "KEY=VALUE", value_parser = parse_key_val, required = true)]
        pairs: Vec<(String, String)>,
    },
    Maintenance {
        #[arg(value_enum)]
        state: Toggle,
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Args, Debug, Clone)]
pub struct MonitoringArgs {
    /// Panels to show; all when omitted
    #[arg(long = "panel", value_enum)]
    pub panels: Vec<PanelArg>,

    /// Keep refreshing until Ctrl-C
    #[arg(long)]
    pub watch: bool,

    /// Log levels, comma separated
    #[arg(long)]
    pub level: Option<String>,

    /// Search term for the log panel
    #[arg(long)]
    pub search: Option<String>,

    /// Error type filter for the errors panel
    #[arg(long = "error-type")]
    pub error_type: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelArg {
    System,
    ApiMetrics,
    Endpoints,
    Errors,
    Queries,
    Logs,
}

impl From<PanelArg> for MonitoringPanel {
    fn from(arg: PanelArg) -> Self {
        match arg {
            PanelArg::System => MonitoringPanel::System,
            PanelArg::ApiMetrics => MonitoringPanel::ApiMetrics,
            PanelArg::Endpoints => MonitoringPanel::Endpoints,
            PanelArg::Errors => MonitoringPanel::Errors,
            PanelArg::Queries => MonitoringPanel::Queries,
            PanelArg::Logs => MonitoringPanel::Logs,
        }
    }
}

/// Parse `key=value`. The value may itself contain `=`.
pub fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{}`", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
