use estateflow_core::{ProjectStatus, ViewMode};
use estateflow_metrics::calculate_metrics;

use super::*;
use crate::fields::{ActualField, ChannelField, PerformanceField, PlanField, WeekField};
use crate::seed::sample_state;

fn cal() -> CampaignCalendar {
    CampaignCalendar::default()
}

fn run(state: &AppState, command: Command) -> Result<AppState, StateError> {
    apply(state, command, &cal())
}

#[test]
fn plan_edit_on_unlocked_project() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::SetPlanField {
            project_id: "2".to_string(),
            field: PlanField::Cpl,
            value: 5000.0,
        },
    )
    .unwrap();
    assert!((next.project("2").unwrap().plan.cpl - 5000.0).abs() < f64::EPSILON);
    // input state is untouched
    assert!((state.project("2").unwrap().plan.cpl - 4819.0).abs() < f64::EPSILON);
}

#[test]
fn plan_edit_on_locked_project_is_rejected() {
    let state = sample_state(&cal());
    let err = run(
        &state,
        Command::SetPlanField {
            project_id: "1".to_string(),
            field: PlanField::Ats,
            value: 8.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, StateError::ProjectLocked(ref id) if id == "1"));
}

#[test]
fn week_edit_on_locked_project_is_rejected() {
    let state = sample_state(&cal());
    let err = run(
        &state,
        Command::SetWeekField {
            project_id: "1".to_string(),
            week_id: 3,
            field: WeekField::SpendDistribution,
            value: 9.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, StateError::ProjectLocked(_)));
}

#[test]
fn locked_project_still_accepts_actuals_and_budget() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::SetActualField {
            project_id: "1".to_string(),
            week_id: 3,
            field: ActualField::Leads,
            value: Some(140.0),
        },
    )
    .unwrap();
    let next = run(
        &next,
        Command::SetProjectField {
            project_id: "1".to_string(),
            field: ProjectField::OtherSpends,
            value: 75_000.0,
        },
    )
    .unwrap();
    let p = next.project("1").unwrap();
    assert_eq!(p.actuals[&3].leads, Some(140.0));
    assert_eq!(p.actuals[&3].spends, None);
    assert!((p.other_spends - 75_000.0).abs() < f64::EPSILON);
}

#[test]
fn received_budget_lives_on_plan() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::SetProjectField {
            project_id: "2".to_string(),
            field: ProjectField::ReceivedBudget,
            value: 1_000_000.0,
        },
    )
    .unwrap();
    assert!((next.project("2").unwrap().plan.received_budget - 1_000_000.0).abs() < f64::EPSILON);
}

#[test]
fn unlocking_allows_plan_edits() {
    let state = sample_state(&cal());
    let unlocked = run(
        &state,
        Command::ToggleLock {
            project_id: "1".to_string(),
        },
    )
    .unwrap();
    assert!(!unlocked.project("1").unwrap().is_locked);
    assert!(run(
        &unlocked,
        Command::SetWeekField {
            project_id: "1".to_string(),
            week_id: 0,
            field: WeekField::LeadDistribution,
            value: 1.0,
        },
    )
    .is_ok());
}

#[test]
fn actuals_outside_campaign_are_rejected() {
    let state = sample_state(&cal());
    let err = run(
        &state,
        Command::SetActualField {
            project_id: "2".to_string(),
            week_id: 13,
            field: ActualField::Leads,
            value: Some(1.0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StateError::WeekOutOfRange(13)));
}

#[test]
fn unknown_project_is_reported() {
    let state = sample_state(&cal());
    let err = run(
        &state,
        Command::ToggleLock {
            project_id: "99".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StateError::ProjectNotFound(ref id) if id == "99"));
}

#[test]
fn channel_budget_rewrites_allocation() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::SetChannelBudget {
            project_id: "2".to_string(),
            channel_id: "google".to_string(),
            budget: 1_000_000.0,
            mode: ViewMode::Brand,
        },
    )
    .unwrap();
    let p = next.project("2").unwrap();
    let base = calculate_metrics(&p.plan).base_budget;
    let alloc = p.channel("google").unwrap().allocation_percent;
    assert!((base * alloc / 100.0 - 1_000_000.0).abs() < 1e-6);
}

#[test]
fn channel_budget_without_simulation_budget_is_noop() {
    let state = sample_state(&cal());
    let zeroed = run(
        &state,
        Command::SetManualMediaBudget {
            project_id: "2".to_string(),
            budget: Some(0.0),
        },
    )
    .unwrap();
    let next = run(
        &zeroed,
        Command::SetChannelBudget {
            project_id: "2".to_string(),
            channel_id: "google".to_string(),
            budget: 1_000_000.0,
            mode: ViewMode::Brand,
        },
    )
    .unwrap();
    assert_eq!(next, zeroed);
}

#[test]
fn add_channel_uses_default_funnel() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::AddChannel {
            project_id: "2".to_string(),
            name: None,
        },
    )
    .unwrap();
    let added = next.project("2").unwrap().media_plan.last().unwrap().clone();
    assert_eq!(added.name, "New Channel");
    assert!(added.is_custom);
    assert!((added.capi_percent - 30.0).abs() < f64::EPSILON);
    assert!((added.ap_to_ad_percent - 50.0).abs() < f64::EPSILON);
    assert!(added.allocation_percent.abs() < f64::EPSILON);
}

#[test]
fn delete_channel_removes_immediately() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::DeleteChannel {
            project_id: "2".to_string(),
            channel_id: "native".to_string(),
        },
    )
    .unwrap();
    assert!(next.project("2").unwrap().channel("native").is_none());
    assert!(run(
        &next,
        Command::DeleteChannel {
            project_id: "2".to_string(),
            channel_id: "native".to_string(),
        },
    )
    .is_err());
}

#[test]
fn channel_field_edit_is_stored_as_given() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::SetChannelField {
            project_id: "2".to_string(),
            channel_id: "fb".to_string(),
            field: ChannelField::AllocationPercent,
            value: -10.0,
        },
    )
    .unwrap();
    let ch = next.project("2").unwrap().channel("fb").unwrap().clone();
    assert!((ch.allocation_percent + 10.0).abs() < f64::EPSILON);
}

#[test]
fn channel_performance_record_is_created_on_first_edit() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::SetChannelPerformance {
            project_id: "1".to_string(),
            channel_id: "portals".to_string(),
            field: PerformanceField::Leads,
            value: 42.0,
        },
    )
    .unwrap();
    let next = run(
        &next,
        Command::SetChannelPerformance {
            project_id: "1".to_string(),
            channel_id: "portals".to_string(),
            field: PerformanceField::Spends,
            value: 90_000.0,
        },
    )
    .unwrap();
    let p = next.project("1").unwrap();
    assert_eq!(p.channel_performance.len(), 1);
    let perf = p.performance_for("portals").unwrap();
    assert!((perf.leads - 42.0).abs() < f64::EPSILON);
    assert!((perf.spends - 90_000.0).abs() < f64::EPSILON);
}

#[test]
fn add_project_starts_from_defaults() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::AddProject {
            name: "  Godrej Park World ".to_string(),
            poc: "Pratham".to_string(),
        },
    )
    .unwrap();
    let added = next.projects.last().unwrap();
    assert_eq!(added.name, "Godrej Park World");
    assert_eq!(added.status, ProjectStatus::Planning);
    assert!(!added.is_locked);
    assert_ne!(added.id, "1");
}

#[test]
fn blank_names_are_rejected() {
    let state = sample_state(&cal());
    let err = run(
        &state,
        Command::RenameProject {
            project_id: "1".to_string(),
            name: "   ".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StateError::EmptyName("project")));
}

#[test]
fn duplicate_poc_is_rejected() {
    let state = sample_state(&cal());
    let err = run(
        &state,
        Command::AddPoc {
            name: "Amey".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StateError::DuplicatePoc(_)));

    let next = run(
        &state,
        Command::AddPoc {
            name: "Sneha".to_string(),
        },
    )
    .unwrap();
    assert_eq!(next.pocs.len(), 4);
}

#[test]
fn delete_project_drops_it() {
    let state = sample_state(&cal());
    let next = run(
        &state,
        Command::DeleteProject {
            project_id: "2".to_string(),
        },
    )
    .unwrap();
    assert_eq!(next.projects.len(), 1);
    assert!(next.project("2").is_none());
}

#[test]
fn manual_budget_can_be_cleared() {
    let state = sample_state(&cal());
    let set = run(
        &state,
        Command::SetManualMediaBudget {
            project_id: "1".to_string(),
            budget: Some(5e6),
        },
    )
    .unwrap();
    let cleared = run(
        &set,
        Command::SetManualMediaBudget {
            project_id: "1".to_string(),
            budget: None,
        },
    )
    .unwrap();
    assert!(cleared.project("1").unwrap().manual_media_budget.is_none());
}

#[test]
fn non_finite_numbers_are_rejected() {
    let state = sample_state(&cal());
    let commands = [
        Command::SetPlanField {
            project_id: "2".to_string(),
            field: PlanField::Cpl,
            value: f64::INFINITY,
        },
        Command::SetWeekField {
            project_id: "2".to_string(),
            week_id: 0,
            field: WeekField::SpendDistribution,
            value: f64::NAN,
        },
        Command::SetActualField {
            project_id: "1".to_string(),
            week_id: 0,
            field: ActualField::Leads,
            value: Some(f64::NEG_INFINITY),
        },
        Command::SetManualMediaBudget {
            project_id: "1".to_string(),
            budget: Some(f64::NAN),
        },
    ];
    for command in commands {
        let kind = command.kind();
        let err = run(&state, command).unwrap_err();
        assert!(
            matches!(err, StateError::NonFiniteValue { command, .. } if command == kind),
            "{kind}: {err}"
        );
    }
}

#[test]
fn clearing_an_actual_is_accepted() {
    let state = sample_state(&cal());
    assert!(run(
        &state,
        Command::SetActualField {
            project_id: "1".to_string(),
            week_id: 0,
            field: ActualField::Leads,
            value: None,
        },
    )
    .is_ok());
}
