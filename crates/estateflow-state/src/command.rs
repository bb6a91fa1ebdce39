use estateflow_core::{ProjectStatus, ViewMode};

use crate::fields::{ActualField, ChannelField, PerformanceField, PlanField, ProjectField, WeekField};

/// One edit to the application state.
///
/// Values are stored as given; nothing here validates ranges. Derived
/// metrics pick up the change on the next read. Non-finite numbers are
/// rejected by [`crate::apply`] since a snapshot cannot hold them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPlanField {
        project_id: String,
        field: PlanField,
        value: f64,
    },
    SetProjectField {
        project_id: String,
        field: ProjectField,
        value: f64,
    },
    SetProjectStatus {
        project_id: String,
        status: ProjectStatus,
    },
    SetProjectLocation {
        project_id: String,
        location: String,
    },
    /// `None` clears the override and the simulator falls back to the plan
    /// budget.
    SetManualMediaBudget {
        project_id: String,
        budget: Option<f64>,
    },
    SetWeekField {
        project_id: String,
        week_id: u32,
        field: WeekField,
        value: f64,
    },
    /// Creates the week's record when it does not exist yet. `None` clears
    /// the single field.
    SetActualField {
        project_id: String,
        week_id: u32,
        field: ActualField,
        value: Option<f64>,
    },
    SetChannelField {
        project_id: String,
        channel_id: String,
        field: ChannelField,
        value: f64,
    },
    RenameChannel {
        project_id: String,
        channel_id: String,
        name: String,
    },
    /// Set a channel's absolute budget by rewriting its allocation against
    /// the current simulation budget in `mode`.
    SetChannelBudget {
        project_id: String,
        channel_id: String,
        budget: f64,
        mode: ViewMode,
    },
    AddChannel {
        project_id: String,
        name: Option<String>,
    },
    DeleteChannel {
        project_id: String,
        channel_id: String,
    },
    SetChannelPerformance {
        project_id: String,
        channel_id: String,
        field: PerformanceField,
        value: f64,
    },
    ToggleLock {
        project_id: String,
    },
    AddProject {
        name: String,
        poc: String,
    },
    DeleteProject {
        project_id: String,
    },
    RenameProject {
        project_id: String,
        name: String,
    },
    SetProjectPoc {
        project_id: String,
        poc: String,
    },
    AddPoc {
        name: String,
    },
}

impl Command {
    /// The number this command stores, if it carries one.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Command::SetPlanField { value, .. }
            | Command::SetProjectField { value, .. }
            | Command::SetWeekField { value, .. }
            | Command::SetChannelField { value, .. }
            | Command::SetChannelPerformance { value, .. } => Some(*value),
            Command::SetChannelBudget { budget, .. } => Some(*budget),
            Command::SetManualMediaBudget { budget, .. } => *budget,
            Command::SetActualField { value, .. } => *value,
            _ => None,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Command::SetPlanField { .. } => "set_plan_field",
            Command::SetProjectField { .. } => "set_project_field",
            Command::SetProjectStatus { .. } => "set_project_status",
            Command::SetProjectLocation { .. } => "set_project_location",
            Command::SetManualMediaBudget { .. } => "set_manual_media_budget",
            Command::SetWeekField { .. } => "set_week_field",
            Command::SetActualField { .. } => "set_actual_field",
            Command::SetChannelField { .. } => "set_channel_field",
            Command::RenameChannel { .. } => "rename_channel",
            Command::SetChannelBudget { .. } => "set_channel_budget",
            Command::AddChannel { .. } => "add_channel",
            Command::DeleteChannel { .. } => "delete_channel",
            Command::SetChannelPerformance { .. } => "set_channel_performance",
            Command::ToggleLock { .. } => "toggle_lock",
            Command::AddProject { .. } => "add_project",
            Command::DeleteProject { .. } => "delete_project",
            Command::RenameProject { .. } => "rename_project",
            Command::SetProjectPoc { .. } => "set_project_poc",
            Command::AddPoc { .. } => "add_poc",
        }
    }
}
