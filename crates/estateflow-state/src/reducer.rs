use estateflow_core::{
    CampaignCalendar, ChannelPerformance, MediaChannel, Poc, Project, WeekInputs, CAMPAIGN_WEEKS,
};
use estateflow_metrics::{allocation_for_budget, calculate_metrics, simulation_budget};
use uuid::Uuid;

use crate::command::Command;
use crate::fields::ProjectField;
use crate::{AppState, StateError};

const NEW_CHANNEL_NAME: &str = "New Channel";

/// Apply one command, returning the next state.
///
/// `state` is never modified; on error the caller keeps the state it had.
/// `calendar` supplies week rows for newly created projects.
///
/// # Errors
///
/// Returns [`StateError`] when the command names a project, channel or week
/// that does not exist, edits the plan of a locked project, supplies an
/// empty name, or carries `NaN` or an infinity.
pub fn apply(
    state: &AppState,
    command: Command,
    calendar: &CampaignCalendar,
) -> Result<AppState, StateError> {
    if let Some(value) = command.numeric_value().filter(|v| !v.is_finite()) {
        return Err(StateError::NonFiniteValue {
            command: command.kind(),
            value,
        });
    }

    let mut next = state.clone();

    match command {
        Command::SetPlanField {
            project_id,
            field,
            value,
        } => {
            let project = unlocked_project(&mut next, &project_id)?;
            field.set(&mut project.plan, value);
        }
        Command::SetProjectField {
            project_id,
            field,
            value,
        } => {
            let project = project_mut(&mut next, &project_id)?;
            match field {
                ProjectField::ReceivedBudget => project.plan.received_budget = value,
                ProjectField::OtherSpends => project.other_spends = value,
            }
        }
        Command::SetProjectStatus { project_id, status } => {
            project_mut(&mut next, &project_id)?.status = status;
        }
        Command::SetProjectLocation {
            project_id,
            location,
        } => {
            project_mut(&mut next, &project_id)?.location = location;
        }
        Command::SetManualMediaBudget { project_id, budget } => {
            project_mut(&mut next, &project_id)?.manual_media_budget = budget;
        }
        Command::SetWeekField {
            project_id,
            week_id,
            field,
            value,
        } => {
            let project = unlocked_project(&mut next, &project_id)?;
            field.set(week_mut(project, week_id)?, value);
        }
        Command::SetActualField {
            project_id,
            week_id,
            field,
            value,
        } => {
            check_week(week_id)?;
            let project = project_mut(&mut next, &project_id)?;
            field.set(project.actuals.entry(week_id).or_default(), value);
        }
        Command::SetChannelField {
            project_id,
            channel_id,
            field,
            value,
        } => {
            let project = project_mut(&mut next, &project_id)?;
            field.set(channel_mut(project, &channel_id)?, value);
        }
        Command::RenameChannel {
            project_id,
            channel_id,
            name,
        } => {
            let name = non_empty(&name, "channel")?;
            let project = project_mut(&mut next, &project_id)?;
            channel_mut(project, &channel_id)?.name = name;
        }
        Command::SetChannelBudget {
            project_id,
            channel_id,
            budget,
            mode,
        } => {
            let project = project_mut(&mut next, &project_id)?;
            let metrics = calculate_metrics(&project.plan);
            let sim_budget = simulation_budget(&metrics, project.manual_media_budget, mode);
            let channel = channel_mut(project, &channel_id)?;
            match allocation_for_budget(sim_budget, budget) {
                Some(allocation) => channel.allocation_percent = allocation,
                None => {
                    tracing::debug!(
                        project = %project_id,
                        channel = %channel_id,
                        sim_budget,
                        "simulation budget is not positive; channel budget edit ignored"
                    );
                }
            }
        }
        Command::AddChannel { project_id, name } => {
            let project = project_mut(&mut next, &project_id)?;
            let name = name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| NEW_CHANNEL_NAME.to_string());
            project
                .media_plan
                .push(MediaChannel::custom(Uuid::new_v4().to_string(), name));
        }
        Command::DeleteChannel {
            project_id,
            channel_id,
        } => {
            let project = project_mut(&mut next, &project_id)?;
            let before = project.media_plan.len();
            project.media_plan.retain(|c| c.id != channel_id);
            if project.media_plan.len() == before {
                return Err(channel_not_found(&project_id, &channel_id));
            }
        }
        Command::SetChannelPerformance {
            project_id,
            channel_id,
            field,
            value,
        } => {
            let project = project_mut(&mut next, &project_id)?;
            if project.channel(&channel_id).is_none() {
                return Err(channel_not_found(&project_id, &channel_id));
            }
            let perf = match project
                .channel_performance
                .iter()
                .position(|p| p.channel_id == channel_id)
            {
                Some(i) => &mut project.channel_performance[i],
                None => {
                    project
                        .channel_performance
                        .push(ChannelPerformance::empty(channel_id));
                    let last = project.channel_performance.len() - 1;
                    &mut project.channel_performance[last]
                }
            };
            field.set(perf, value);
        }
        Command::ToggleLock { project_id } => {
            let project = project_mut(&mut next, &project_id)?;
            project.is_locked = !project.is_locked;
        }
        Command::AddProject { name, poc } => {
            let name = non_empty(&name, "project")?;
            next.projects.push(Project::new(
                Uuid::new_v4().to_string(),
                name,
                poc,
                calendar,
            ));
        }
        Command::DeleteProject { project_id } => {
            let before = next.projects.len();
            next.projects.retain(|p| p.id != project_id);
            if next.projects.len() == before {
                return Err(StateError::ProjectNotFound(project_id));
            }
        }
        Command::RenameProject { project_id, name } => {
            let name = non_empty(&name, "project")?;
            project_mut(&mut next, &project_id)?.name = name;
        }
        Command::SetProjectPoc { project_id, poc } => {
            project_mut(&mut next, &project_id)?.poc = poc;
        }
        Command::AddPoc { name } => {
            let name = non_empty(&name, "POC")?;
            if next.pocs.iter().any(|p| p.name == name) {
                return Err(StateError::DuplicatePoc(name));
            }
            next.pocs.push(Poc {
                id: Uuid::new_v4().to_string(),
                name,
            });
        }
    }

    Ok(next)
}

fn project_mut<'a>(state: &'a mut AppState, id: &str) -> Result<&'a mut Project, StateError> {
    state
        .projects
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StateError::ProjectNotFound(id.to_string()))
}

fn unlocked_project<'a>(state: &'a mut AppState, id: &str) -> Result<&'a mut Project, StateError> {
    let project = project_mut(state, id)?;
    if project.is_locked {
        return Err(StateError::ProjectLocked(id.to_string()));
    }
    Ok(project)
}

fn check_week(week_id: u32) -> Result<(), StateError> {
    match usize::try_from(week_id) {
        Ok(w) if w < CAMPAIGN_WEEKS => Ok(()),
        _ => Err(StateError::WeekOutOfRange(week_id)),
    }
}

fn week_mut(project: &mut Project, week_id: u32) -> Result<&mut WeekInputs, StateError> {
    project
        .weeks
        .iter_mut()
        .find(|w| w.id == week_id)
        .ok_or(StateError::WeekOutOfRange(week_id))
}

fn channel_mut<'a>(
    project: &'a mut Project,
    channel_id: &str,
) -> Result<&'a mut MediaChannel, StateError> {
    let project_id = project.id.clone();
    project
        .media_plan
        .iter_mut()
        .find(|c| c.id == channel_id)
        .ok_or_else(|| channel_not_found(&project_id, channel_id))
}

fn channel_not_found(project_id: &str, channel_id: &str) -> StateError {
    StateError::ChannelNotFound {
        project_id: project_id.to_string(),
        channel_id: channel_id.to_string(),
    }
}

fn non_empty(name: &str, what: &'static str) -> Result<String, StateError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StateError::EmptyName(what));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "reducer_test.rs"]
mod tests;
