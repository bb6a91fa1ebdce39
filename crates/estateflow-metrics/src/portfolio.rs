//! Cross-project analytics over the live portfolio.

use std::collections::BTreeMap;

use estateflow_core::{Project, ProjectStatus, ViewMode, WeeklyActuals};
use serde::Serialize;

use crate::delivery::{percent_of, ratio_or_zero};
use crate::funnel::calculate_metrics;
use crate::weekly::distribute_weeks;

/// One campaign week summed across projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub week_id: u32,
    pub week_label: String,
    pub planned_spend: f64,
    pub actual_spend: f64,
    pub actual_leads: f64,
    pub actual_walkins: f64,
    /// Digital bookings.
    pub actual_bookings: f64,
    pub cpl: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalytics {
    pub project_count: usize,
    pub planned_budget: f64,
    pub actual_spend: f64,
    pub target_leads: f64,
    pub actual_leads: f64,
    pub target_walkins: f64,
    pub actual_walkins: f64,
    pub actual_bookings: f64,
    /// Actual spend as a percentage of planned budget.
    pub spend_vs_plan_percent: f64,
    /// Weeks where something was planned or spent, in week order.
    pub trend: Vec<TrendPoint>,
}

/// Aggregate every project that is not completed, or only `project_id` when
/// given. Planned and actual spend follow `mode`.
#[must_use]
pub fn portfolio_analytics(
    projects: &[Project],
    mode: ViewMode,
    project_id: Option<&str>,
) -> PortfolioAnalytics {
    let selected: Vec<&Project> = projects
        .iter()
        .filter(|p| p.status != ProjectStatus::Completed)
        .filter(|p| project_id.map_or(true, |id| p.id == id))
        .collect();

    let mut out = PortfolioAnalytics {
        project_count: selected.len(),
        ..PortfolioAnalytics::default()
    };
    let mut trend: BTreeMap<u32, TrendPoint> = BTreeMap::new();
    let empty = WeeklyActuals::default();

    for project in selected {
        let tax_multiplier = mode.tax_multiplier(project.plan.tax_percent);
        let metrics = calculate_metrics(&project.plan);

        for week in distribute_weeks(&project.weeks, &metrics) {
            let planned = week.spends_for(mode);
            let act = project.actuals.get(&week.id).unwrap_or(&empty);
            let spent = act.spends() * tax_multiplier;

            out.planned_budget += planned;
            out.actual_spend += spent;
            out.target_leads += week.leads;
            out.actual_leads += act.leads();
            out.target_walkins += week.ad;
            out.actual_walkins += act.ad();
            out.actual_bookings += act.bookings();

            let point = trend.entry(week.id).or_insert_with(|| TrendPoint {
                week_id: week.id,
                week_label: week.week_label.clone(),
                ..TrendPoint::default()
            });
            point.planned_spend += planned;
            point.actual_spend += spent;
            point.actual_leads += act.leads();
            point.actual_walkins += act.ad();
            point.actual_bookings += act.bookings();
        }
    }

    out.spend_vs_plan_percent = percent_of(out.actual_spend, out.planned_budget);
    out.trend = trend
        .into_values()
        .filter(|t| t.planned_spend > 0.0 || t.actual_spend > 0.0)
        .map(|mut t| {
            t.cpl = ratio_or_zero(t.actual_spend, t.actual_leads);
            t
        })
        .collect();
    out
}
