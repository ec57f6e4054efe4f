//! List pages and row actions for the browsable resources.

use serde_json::{Map, Value};
use tracing::{debug, info_span, Instrument};

use super::{api_failure, browser_failure};
use crate::cli::{
    ApplicationAction, CategoryAction, JobAction, ListArgs, ReportAction, SkillAction, UserAction,
};
use crate::render::{render_page, render_record};
use ga_app::{AdminRuntime, BrowserState};
use ga_core::mutation::OperationKind;
use ga_core::settings::parse_setting_value;
use ga_core::{MutationIntent, MutationOperation, RecordId, ResourceType};

/// What a resource subcommand asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    Show(RecordId),
    Mutate(MutationIntent),
}

/// `key=value` pairs as a JSON object, with values typed like settings.
pub fn payload(fields: Vec<(String, String)>) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| {
            let value = parse_setting_value(&v);
            (k, value)
        })
        .collect();
    Value::Object(map)
}

fn on(resource: ResourceType, id: String, operation: MutationOperation) -> RowAction {
    RowAction::Mutate(MutationIntent::on(resource, id, operation))
}

impl From<UserAction> for RowAction {
    fn from(action: UserAction) -> Self {
        let r = ResourceType::Users;
        match action {
            UserAction::Show { id } => RowAction::Show(id.into()),
            UserAction::Suspend { id, reason } => on(r, id, MutationOperation::Suspend { reason }),
            UserAction::Unsuspend { id } => on(r, id, MutationOperation::Unsuspend),
            UserAction::Ban { id, reason } => on(r, id, MutationOperation::Ban { reason }),
            UserAction::Status { id, status, reason } => {
                on(r, id, MutationOperation::UpdateStatus { status, reason })
            }
            UserAction::Update { id, fields } => on(
                r,
                id,
                MutationOperation::Update {
                    payload: payload(fields),
                },
            ),
            UserAction::Delete { id } => on(r, id, MutationOperation::Delete),
        }
    }
}

impl From<JobAction> for RowAction {
    fn from(action: JobAction) -> Self {
        let r = ResourceType::Jobs;
        match action {
            JobAction::Show { id } => RowAction::Show(id.into()),
            JobAction::Approve { id } => on(r, id, MutationOperation::Approve),
            JobAction::Reject { id, reason } => on(r, id, MutationOperation::Reject { reason }),
            JobAction::Status { id, status } => on(
                r,
                id,
                MutationOperation::UpdateStatus {
                    status,
                    reason: None,
                },
            ),
            JobAction::Update { id, fields } => on(
                r,
                id,
                MutationOperation::Update {
                    payload: payload(fields),
                },
            ),
            JobAction::Delete { id } => on(r, id, MutationOperation::Delete),
        }
    }
}

impl From<ApplicationAction> for RowAction {
    fn from(action: ApplicationAction) -> Self {
        match action {
            ApplicationAction::Show { id } => RowAction::Show(id.into()),
            ApplicationAction::Status { id, status } => on(
                ResourceType::Applications,
                id,
                MutationOperation::UpdateStatus {
                    status,
                    reason: None,
                },
            ),
        }
    }
}

impl From<ReportAction> for RowAction {
    fn from(action: ReportAction) -> Self {
        match action {
            ReportAction::Show { id } => RowAction::Show(id.into()),
            ReportAction::Resolve {
                id,
                resolution,
                action,
            } => on(
                ResourceType::Reports,
                id,
                MutationOperation::Resolve { resolution, action },
            ),
        }
    }
}

impl From<CategoryAction> for RowAction {
    fn from(action: CategoryAction) -> Self {
        let r = ResourceType::Categories;
        match action {
            CategoryAction::Create { fields } => RowAction::Mutate(MutationIntent::on_collection(
                r,
                MutationOperation::Create {
                    payload: payload(fields),
                },
            )),
            CategoryAction::Update { id, fields } => on(
                r,
                id,
                MutationOperation::Update {
                    payload: payload(fields),
                },
            ),
            CategoryAction::Delete { id } => on(r, id, MutationOperation::Delete),
            CategoryAction::Reorder { ids } => {
                let order = ids
                    .into_iter()
                    .enumerate()
                    .map(|(position, id)| (RecordId::from(id), position as u32))
                    .collect();
                RowAction::Mutate(MutationIntent::on_collection(
                    r,
                    MutationOperation::Reorder { order },
                ))
            }
        }
    }
}

impl From<SkillAction> for RowAction {
    fn from(action: SkillAction) -> Self {
        let r = ResourceType::Skills;
        match action {
            SkillAction::Create { fields } => RowAction::Mutate(MutationIntent::on_collection(
                r,
                MutationOperation::Create {
                    payload: payload(fields),
                },
            )),
            SkillAction::Update { id, fields } => on(
                r,
                id,
                MutationOperation::Update {
                    payload: payload(fields),
                },
            ),
            SkillAction::Delete { id } => on(r, id, MutationOperation::Delete),
        }
    }
}

fn past_tense(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::UpdateStatus => "Updated status of",
        OperationKind::Delete => "Deleted",
        OperationKind::Create => "Created",
        OperationKind::Update => "Updated",
        OperationKind::Resolve => "Resolved",
        OperationKind::Approve => "Approved",
        OperationKind::Reject => "Rejected",
        OperationKind::Suspend => "Suspended",
        OperationKind::Unsuspend => "Unsuspended",
        OperationKind::Ban => "Banned",
        OperationKind::Reorder => "Reordered",
        OperationKind::UpdateSettings => "Updated",
        OperationKind::ToggleMaintenance => "Toggled maintenance for",
    }
}

/// Success line for a finished action, e.g. `Approved job j1`.
pub fn confirmation(intent: &MutationIntent) -> String {
    let verb = past_tense(intent.kind());
    match &intent.target {
        Some(id) => format!("{} {} {}\n", verb, intent.resource.singular(), id),
        None => format!("{} {}\n", verb, intent.resource),
    }
}

pub async fn run(
    runtime: &AdminRuntime,
    resource: ResourceType,
    list: ListArgs,
    action: Option<RowAction>,
) -> anyhow::Result<String> {
    let span = info_span!("command.resource", resource = %resource);
    match action {
        None => browse(runtime, resource, list).instrument(span).await,
        Some(RowAction::Show(id)) => show(runtime, resource, id).instrument(span).await,
        Some(RowAction::Mutate(intent)) => mutate(runtime, intent).instrument(span).await,
    }
}

async fn browse(
    runtime: &AdminRuntime,
    resource: ResourceType,
    list: ListArgs,
) -> anyhow::Result<String> {
    let browser = runtime.browser(resource).map_err(browser_failure)?;

    let mut query = browser.query();
    if let Some(term) = &list.search {
        query.set_search(term.as_str());
    }
    for (name, value) in list.filters() {
        query.set_filter(name, value);
    }
    // Search and filters reset the page, so the page goes last.
    query.set_page(list.page);

    let view = browser.set_query(query).await;
    match (view.state, view.error, view.page) {
        (BrowserState::Loaded, _, Some(page)) => Ok(render_page(resource, &page)),
        (_, Some(err), _) => Err(api_failure(err)),
        (state, None, _) => anyhow::bail!("{} did not load ({:?})", resource, state),
    }
}

async fn show(runtime: &AdminRuntime, resource: ResourceType, id: RecordId) -> anyhow::Result<String> {
    match runtime
        .get_record()
        .execute(resource, &id)
        .await
        .map_err(api_failure)?
    {
        Some(record) => Ok(render_record(resource, &record)),
        None => anyhow::bail!("{} {} not found", resource.singular(), id),
    }
}

async fn mutate(runtime: &AdminRuntime, intent: MutationIntent) -> anyhow::Result<String> {
    let browser = runtime.browser(intent.resource).map_err(browser_failure)?;
    let line = confirmation(&intent);
    let outcome = browser.run_action(intent).await.map_err(browser_failure)?;
    debug!(
        mutation_id = %outcome.id,
        invalidated = ?outcome.invalidated,
        "action applied"
    );
    Ok(line)
}
