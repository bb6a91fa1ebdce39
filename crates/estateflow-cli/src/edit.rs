//! Edit command handlers. Each edit loads the snapshot, applies one command
//! through the controller and writes the result back.

use clap::builder::PossibleValuesParser;
use clap::Subcommand;
use estateflow_core::{ProjectStatus, ViewMode, PRESET_CHANNELS};
use estateflow_state::{
    ActualField, AppState, ChannelField, Command, Controller, PerformanceField, PlanField,
    ProjectField, WeekField,
};

use crate::Context;

/// Sub-commands available under `edit`.
///
/// Weeks are numbered 1 to 13 as displayed.
#[derive(Debug, Subcommand)]
pub enum EditCommands {
    /// Set a business plan input (e.g. overall-bv, ats, ltw, wtb, cpl, tax)
    Plan {
        project: String,
        field: PlanField,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Set received budget or other spends
    Budget {
        project: String,
        field: ProjectField,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Set project status (planning, active, completed)
    Status {
        project: String,
        status: ProjectStatus,
    },
    /// Set project location
    Location { project: String, location: String },
    /// Override the media mix simulation budget; omit the amount to clear it
    MediaBudget {
        project: String,
        #[arg(allow_negative_numbers = true)]
        budget: Option<f64>,
    },
    /// Set a week's spend, lead or AD conversion percentage
    Week {
        project: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=13))]
        week: u32,
        field: WeekField,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Record a week's actual; omit the value to clear the field
    Actual {
        project: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=13))]
        week: u32,
        field: ActualField,
        #[arg(allow_negative_numbers = true)]
        value: Option<f64>,
    },
    /// Set a media channel's allocation, CPL or conversion percentage
    Channel {
        project: String,
        channel: String,
        field: ChannelField,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Set a channel's absolute budget (rewrites its allocation %)
    ChannelBudget {
        project: String,
        channel: String,
        #[arg(allow_negative_numbers = true)]
        budget: f64,
    },
    /// Rename a media channel
    RenameChannel {
        project: String,
        channel: String,
        name: String,
    },
    /// Add a media channel with zero allocation
    AddChannel {
        project: String,
        #[arg(long)]
        name: Option<String>,
        /// Name the channel after a preset (e.g. "LinkedIn", "Radio")
        #[arg(
            long,
            conflicts_with = "name",
            value_parser = PossibleValuesParser::new(PRESET_CHANNELS.iter().copied())
        )]
        preset: Option<String>,
    },
    /// Remove a media channel
    DeleteChannel { project: String, channel: String },
    /// Record a channel's funnel count or spend
    ChannelPerformance {
        project: String,
        channel: String,
        field: PerformanceField,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Lock or unlock the business plan and week curves
    Lock { project: String },
    /// Create a project with the default plan
    AddProject {
        name: String,
        #[arg(long)]
        poc: String,
    },
    /// Remove a project
    DeleteProject { project: String },
    /// Rename a project
    RenameProject { project: String, name: String },
    /// Assign a project to a POC
    AssignPoc { project: String, poc: String },
    /// Register a POC
    AddPoc { name: String },
}

impl EditCommands {
    /// The state command this edit dispatches. `mode` is the presentation
    /// a channel budget was entered in.
    pub(crate) fn into_command(self, mode: ViewMode) -> Command {
        match self {
            EditCommands::Plan {
                project,
                field,
                value,
            } => Command::SetPlanField {
                project_id: project,
                field,
                value,
            },
            EditCommands::Budget {
                project,
                field,
                value,
            } => Command::SetProjectField {
                project_id: project,
                field,
                value,
            },
            EditCommands::Status { project, status } => Command::SetProjectStatus {
                project_id: project,
                status,
            },
            EditCommands::Location { project, location } => Command::SetProjectLocation {
                project_id: project,
                location,
            },
            EditCommands::MediaBudget { project, budget } => Command::SetManualMediaBudget {
                project_id: project,
                budget,
            },
            EditCommands::Week {
                project,
                week,
                field,
                value,
            } => Command::SetWeekField {
                project_id: project,
                week_id: week.saturating_sub(1),
                field,
                value,
            },
            EditCommands::Actual {
                project,
                week,
                field,
                value,
            } => Command::SetActualField {
                project_id: project,
                week_id: week.saturating_sub(1),
                field,
                value,
            },
            EditCommands::Channel {
                project,
                channel,
                field,
                value,
            } => Command::SetChannelField {
                project_id: project,
                channel_id: channel,
                field,
                value,
            },
            EditCommands::ChannelBudget {
                project,
                channel,
                budget,
            } => Command::SetChannelBudget {
                project_id: project,
                channel_id: channel,
                budget,
                mode,
            },
            EditCommands::RenameChannel {
                project,
                channel,
                name,
            } => Command::RenameChannel {
                project_id: project,
                channel_id: channel,
                name,
            },
            EditCommands::AddChannel {
                project,
                name,
                preset,
            } => Command::AddChannel {
                project_id: project,
                name: name.or(preset),
            },
            EditCommands::DeleteChannel { project, channel } => Command::DeleteChannel {
                project_id: project,
                channel_id: channel,
            },
            EditCommands::ChannelPerformance {
                project,
                channel,
                field,
                value,
            } => Command::SetChannelPerformance {
                project_id: project,
                channel_id: channel,
                field,
                value,
            },
            EditCommands::Lock { project } => Command::ToggleLock {
                project_id: project,
            },
            EditCommands::AddProject { name, poc } => Command::AddProject { name, poc },
            EditCommands::DeleteProject { project } => Command::DeleteProject {
                project_id: project,
            },
            EditCommands::RenameProject { project, name } => Command::RenameProject {
                project_id: project,
                name,
            },
            EditCommands::AssignPoc { project, poc } => Command::SetProjectPoc {
                project_id: project,
                poc,
            },
            EditCommands::AddPoc { name } => Command::AddPoc { name },
        }
    }
}

/// Write a fresh snapshot from the sample portfolio or the portfolio YAML.
///
/// # Errors
///
/// Returns an error if a snapshot already exists and `force` is not set, the
/// portfolio file is invalid, or the snapshot cannot be written.
pub(crate) fn run_init(ctx: &Context, from_portfolio: bool, force: bool) -> anyhow::Result<()> {
    if ctx.state_path.exists() && !force {
        anyhow::bail!(
            "snapshot already exists at {}; pass --force to overwrite",
            ctx.state_path.display()
        );
    }

    let state = if from_portfolio {
        let portfolio = estateflow_core::load_portfolio(&ctx.config.portfolio_path)?;
        tracing::info!(
            path = %ctx.config.portfolio_path.display(),
            projects = portfolio.projects.len(),
            "seeding from portfolio file"
        );
        estateflow_state::state_from_portfolio(portfolio, &ctx.calendar)
    } else {
        estateflow_state::sample_state(&ctx.calendar)
    };

    estateflow_state::save_snapshot(&ctx.state_path, &state)?;
    println!(
        "Wrote {} project(s) and {} POC(s) to {}",
        state.projects.len(),
        state.pocs.len(),
        ctx.state_path.display()
    );
    Ok(())
}

/// Apply one edit and save the snapshot.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or written, or the state
/// rejects the command (unknown project, locked plan, and so on).
pub(crate) fn run_edit(ctx: &Context, edit: EditCommands) -> anyhow::Result<()> {
    let state = ctx.load_state()?;
    let command = edit.into_command(ctx.mode);
    let summary = describe(&command);

    let mut controller = Controller::new(state, ctx.calendar);
    let before = controller.state().clone();
    controller.dispatch(command)?;
    estateflow_state::save_snapshot(&ctx.state_path, controller.state())?;

    println!("{summary}");
    if let Some(created) = created_id(&before, controller.state()) {
        println!("New id: {created}");
    }
    Ok(())
}

fn describe(command: &Command) -> String {
    match command {
        Command::SetPlanField {
            project_id, field, ..
        } => format!("Updated {field:?} on project {project_id}"),
        Command::SetProjectField {
            project_id, field, ..
        } => format!("Updated {field:?} on project {project_id}"),
        Command::ToggleLock { project_id } => format!("Toggled lock on project {project_id}"),
        Command::AddProject { name, .. } => format!("Added project {name}"),
        Command::AddPoc { name } => format!("Added POC {name}"),
        other => format!("Applied {}", other.kind()),
    }
}

/// Id of a project or channel the edit just created, if any.
fn created_id(before: &AppState, after: &AppState) -> Option<String> {
    if after.projects.len() > before.projects.len() {
        return after.projects.last().map(|p| p.id.clone());
    }
    after
        .projects
        .iter()
        .zip(&before.projects)
        .find(|(a, b)| a.media_plan.len() > b.media_plan.len())
        .and_then(|(a, _)| a.media_plan.last().map(|c| c.id.clone()))
}
