use estateflow_state::{ActualField, Command, PlanField, WeekField};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["estateflow"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.view.is_none());
}

#[test]
fn parses_projects_with_poc_filter() {
    let cli = Cli::try_parse_from(["estateflow", "projects", "--poc", "Amey"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Projects { poc: Some(ref p) }) if p == "Amey"
    ));
}

#[test]
fn global_view_and_window_flags() {
    let cli = Cli::try_parse_from([
        "estateflow",
        "performance",
        "1",
        "--view",
        "agency",
        "--from",
        "2025-10-08",
        "--to",
        "2025-10-21",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.view, Some(ViewMode::Agency));
    assert_eq!(cli.from, NaiveDate::from_ymd_opt(2025, 10, 8));
    assert!(matches!(
        cli.command,
        Some(Commands::Performance { ref project }) if project == "1"
    ));
}

#[test]
fn rejects_unknown_view() {
    assert!(Cli::try_parse_from(["estateflow", "--view", "retail", "projects"]).is_err());
}

#[test]
fn parses_media_mix_command() {
    let cli = Cli::try_parse_from(["estateflow", "media-mix", "2"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::MediaMix { .. })));
}

#[test]
fn parses_init_flags() {
    let cli = Cli::try_parse_from(["estateflow", "init", "--from-portfolio", "--force"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Init {
            from_portfolio: true,
            force: true
        })
    ));
}

#[test]
fn parses_export_defaults() {
    let cli = Cli::try_parse_from(["estateflow", "export"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Export {
            project: None,
            out: None
        })
    ));
}

#[test]
fn parses_edit_plan_with_field_alias() {
    let cli = Cli::try_parse_from(["estateflow", "edit", "plan", "1", "overall-bv", "400"])
        .expect("expected valid cli args");
    let Some(Commands::Edit { command }) = cli.command else {
        panic!("expected edit command");
    };
    assert_eq!(
        command.into_command(ViewMode::Brand),
        Command::SetPlanField {
            project_id: "1".to_string(),
            field: PlanField::OverallBv,
            value: 400.0,
        }
    );
}

#[test]
fn edit_actual_without_value_clears() {
    let cli = Cli::try_parse_from(["estateflow", "edit", "actual", "1", "4", "leads"])
        .expect("expected valid cli args");
    let Some(Commands::Edit { command }) = cli.command else {
        panic!("expected edit command");
    };
    assert_eq!(
        command.into_command(ViewMode::Brand),
        Command::SetActualField {
            project_id: "1".to_string(),
            week_id: 3,
            field: ActualField::Leads,
            value: None,
        }
    );
}

#[test]
fn edit_week_accepts_negative_values() {
    let cli = Cli::try_parse_from(["estateflow", "edit", "week", "1", "13", "spend", "-2"])
        .expect("expected valid cli args");
    let Some(Commands::Edit { command }) = cli.command else {
        panic!("expected edit command");
    };
    assert!(matches!(
        command.into_command(ViewMode::Brand),
        Command::SetWeekField {
            week_id: 12,
            field: WeekField::SpendDistribution,
            ..
        }
    ));
}

#[test]
fn edit_week_rejects_week_zero() {
    assert!(Cli::try_parse_from(["estateflow", "edit", "week", "1", "0", "spend", "5"]).is_err());
}

#[test]
fn edit_rejects_unknown_field() {
    assert!(Cli::try_parse_from(["estateflow", "edit", "plan", "1", "colour", "5"]).is_err());
}

#[test]
fn window_defaults_to_full_campaign() {
    let cal = CampaignCalendar::default();
    assert_eq!(resolve_window(&cal, None, None), ReportingWindow::full());
}

#[test]
fn window_open_end_runs_to_last_week() {
    let cal = CampaignCalendar::default();
    let window = resolve_window(&cal, NaiveDate::from_ymd_opt(2025, 10, 15), None);
    assert_eq!(window, ReportingWindow::Weeks { start: 2, end: 12 });
}

#[test]
fn window_before_campaign_is_empty() {
    let cal = CampaignCalendar::default();
    let window = resolve_window(
        &cal,
        NaiveDate::from_ymd_opt(2025, 9, 1),
        NaiveDate::from_ymd_opt(2025, 9, 20),
    );
    assert!(window.is_empty());
}

#[test]
fn add_channel_from_preset() {
    let cli = Cli::try_parse_from(["estateflow", "edit", "add-channel", "1", "--preset", "Radio"])
        .expect("expected valid cli args");
    let Some(Commands::Edit { command }) = cli.command else {
        panic!("expected edit command");
    };
    assert_eq!(
        command.into_command(ViewMode::Brand),
        Command::AddChannel {
            project_id: "1".to_string(),
            name: Some("Radio".to_string()),
        }
    );
}

#[test]
fn add_channel_rejects_unknown_preset() {
    assert!(
        Cli::try_parse_from(["estateflow", "edit", "add-channel", "1", "--preset", "TikTok"])
            .is_err()
    );
}

#[test]
fn help_and_version_are_answered_by_the_parser() {
    let help = Cli::try_parse_from(["estateflow", "--help"]).unwrap_err();
    assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    let version = Cli::try_parse_from(["estateflow", "--version"]).unwrap_err();
    assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
}
