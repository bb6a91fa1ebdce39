use estateflow_core::{
    ActualsMap, CampaignCalendar, Poc, PortfolioFile, Project, ProjectStatus, WeeklyActuals,
};

use crate::AppState;

/// The two-project portfolio a fresh install starts with.
#[must_use]
pub fn sample_state(calendar: &CampaignCalendar) -> AppState {
    let mut horizon = Project::new("1", "Godrej Horizon", "Amey", calendar);
    horizon.location = "Wadala, Mumbai".to_string();
    horizon.status = ProjectStatus::Active;
    horizon.plan.overall_bv = 350.0;
    horizon.plan.received_budget = 2_936_003.0;
    horizon.other_spends = 50_000.0;
    horizon.actuals = horizon_actuals();
    horizon.is_locked = true;

    let mut reserve = Project::new("2", "Godrej Reserve", "Rohan", calendar);
    reserve.location = "Kandivali, Mumbai".to_string();
    reserve.plan.overall_bv = 500.0;

    AppState {
        projects: vec![horizon, reserve],
        pocs: ["Amey", "Rohan", "Pratham"]
            .iter()
            .enumerate()
            .map(|(i, name)| Poc {
                id: (i + 1).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
    }
}

/// State built from a portfolio YAML file.
#[must_use]
pub fn state_from_portfolio(portfolio: PortfolioFile, calendar: &CampaignCalendar) -> AppState {
    let pocs = portfolio.poc_records();
    AppState {
        projects: portfolio
            .projects
            .into_iter()
            .map(|p| p.into_project(calendar))
            .collect(),
        pocs,
    }
}

fn horizon_actuals() -> ActualsMap {
    [
        (0, 38.0, 3.0, 2.0, 137_143.0, 0.0, 0.0),
        (1, 76.0, 8.0, 4.0, 274_286.0, 1.0, 0.0),
        (2, 115.0, 12.0, 6.0, 400_000.0, 1.0, 1.0),
    ]
    .into_iter()
    .map(|(week, leads, ap, ad, spends, bookings, presales)| {
        (
            week,
            WeeklyActuals {
                leads: Some(leads),
                ap: Some(ap),
                ad: Some(ad),
                spends: Some(spends),
                bookings: Some(bookings),
                presales_bookings: Some(presales),
            },
        )
    })
    .collect()
}
