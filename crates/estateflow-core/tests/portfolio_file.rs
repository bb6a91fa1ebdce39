//! The portfolio shipped in `config/` loads and builds full projects.

use std::path::PathBuf;

use estateflow_core::{load_portfolio, CampaignCalendar, ProjectStatus, CAMPAIGN_WEEKS};

fn shipped_portfolio() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/portfolio.yaml")
}

#[test]
fn shipped_portfolio_validates() {
    let portfolio = load_portfolio(&shipped_portfolio()).expect("portfolio should load");
    assert_eq!(portfolio.pocs, ["Amey", "Rohan", "Pratham"]);
    assert_eq!(portfolio.projects.len(), 2);
}

#[test]
fn shipped_projects_carry_plan_and_actuals() {
    let portfolio = load_portfolio(&shipped_portfolio()).expect("portfolio should load");
    let cal = CampaignCalendar::default();
    let mut projects = portfolio
        .projects
        .into_iter()
        .map(|p| p.into_project(&cal));

    let horizon = projects.next().expect("horizon");
    assert_eq!(horizon.status, ProjectStatus::Active);
    assert!(horizon.is_locked);
    assert!((horizon.plan.received_budget - 2_936_003.0).abs() < f64::EPSILON);
    assert_eq!(horizon.actuals.len(), 3);
    assert_eq!(horizon.actuals[&2].presales_bookings, Some(1.0));
    assert_eq!(horizon.channel_performance.len(), 2);
    assert_eq!(horizon.weeks.len(), CAMPAIGN_WEEKS);

    let reserve = projects.next().expect("reserve");
    assert!((reserve.plan.overall_bv - 500.0).abs() < f64::EPSILON);
    assert!(reserve.actuals.is_empty());
    assert!((reserve.weeks[1].spend_distribution - 5.0).abs() < f64::EPSILON);
    assert!((reserve.weeks[7].lead_distribution - 13.0).abs() < f64::EPSILON);
    let spend: f64 = reserve.weeks.iter().map(|w| w.spend_distribution).sum();
    let leads: f64 = reserve.weeks.iter().map(|w| w.lead_distribution).sum();
    assert!((spend - 100.0).abs() < 1e-9);
    assert!((leads - 100.0).abs() < 1e-9);
}
