use estateflow_core::CampaignCalendar;

use crate::command::Command;
use crate::reducer::apply;
use crate::{AppState, StateError};

/// Single owner of the application state.
///
/// Each dispatch replaces the held state with the reducer's result, so a
/// rejected command leaves it unchanged.
#[derive(Debug, Clone)]
pub struct Controller {
    state: AppState,
    calendar: CampaignCalendar,
}

impl Controller {
    #[must_use]
    pub fn new(state: AppState, calendar: CampaignCalendar) -> Self {
        Self { state, calendar }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn calendar(&self) -> &CampaignCalendar {
        &self.calendar
    }

    #[must_use]
    pub fn into_state(self) -> AppState {
        self.state
    }

    /// # Errors
    ///
    /// Returns the reducer's [`StateError`]; the held state is kept as is.
    pub fn dispatch(&mut self, command: Command) -> Result<&AppState, StateError> {
        let kind = command.kind();
        match apply(&self.state, command, &self.calendar) {
            Ok(next) => {
                tracing::debug!(command = kind, "command applied");
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                tracing::debug!(command = kind, error = %e, "command rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::PlanField;
    use crate::seed::sample_state;

    fn controller() -> Controller {
        let cal = CampaignCalendar::default();
        Controller::new(sample_state(&cal), cal)
    }

    #[test]
    fn dispatch_replaces_state() {
        let mut c = controller();
        c.dispatch(Command::ToggleLock {
            project_id: "2".to_string(),
        })
        .unwrap();
        assert!(c.state().project("2").unwrap().is_locked);
    }

    #[test]
    fn rejected_command_keeps_state() {
        let mut c = controller();
        let before = c.state().clone();
        let result = c.dispatch(Command::SetPlanField {
            project_id: "1".to_string(),
            field: PlanField::OverallBv,
            value: 1.0,
        });
        assert!(matches!(result, Err(StateError::ProjectLocked(_))));
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn added_projects_use_controller_calendar() {
        let cal = CampaignCalendar::new(chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let mut c = Controller::new(AppState::default(), cal);
        c.dispatch(Command::AddProject {
            name: "Godrej Aqua".to_string(),
            poc: "Amey".to_string(),
        })
        .unwrap();
        assert_eq!(c.state().projects[0].weeks[0].date_range, "5 Jan - 11 Jan");
    }
}
