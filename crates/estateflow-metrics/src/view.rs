//! Project to view model projection. Called on every read; nothing here is
//! cached between edits.

use estateflow_core::{Project, ProjectStatus, ViewMode};
use serde::Serialize;

use crate::channels::{aggregate_channels, ChannelReport};
use crate::delivery::{percent_of, ratio_or_zero};
use crate::funnel::{calculate_metrics, CalculatedMetrics};
use crate::media_mix::{forecast, is_manual_override, simulation_budget, MediaMixForecast};
use crate::reconcile::{
    reconcile_budget, reconcile_period, weekly_performance, BudgetSummary, PerformanceTable,
    PeriodSummary,
};
use crate::weekly::{
    check_distribution, distribute_weeks, weekly_totals, DistributionCheck, WeeklyData,
    WeeklyTotals,
};
use crate::window::ReportingWindow;

/// Everything derived from one project for one presentation and window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub poc: String,
    pub status: ProjectStatus,
    pub is_locked: bool,
    pub mode: ViewMode,
    pub tax_multiplier: f64,
    pub metrics: CalculatedMetrics,
    pub weeks: Vec<WeeklyData>,
    pub weekly_totals: WeeklyTotals,
    pub distribution: DistributionCheck,
    pub period: PeriodSummary,
    pub budget: BudgetSummary,
    pub performance: PerformanceTable,
    pub media_mix: MediaMixForecast,
    pub manual_override: bool,
    pub channels: ChannelReport,
    /// Base budget over planned walk-ins summed across weeks.
    pub target_cpw: f64,
    /// Booked units (digital and presales) as a percentage of total units.
    pub unit_delivery_percent: f64,
    /// Lifetime base spend against base budget, capped at 100.
    pub spend_progress_percent: f64,
}

#[must_use]
pub fn project_view(project: &Project, mode: ViewMode, window: ReportingWindow) -> ProjectView {
    let tax_multiplier = mode.tax_multiplier(project.plan.tax_percent);
    let metrics = calculate_metrics(&project.plan);
    let weeks = distribute_weeks(&project.weeks, &metrics);
    let totals = weekly_totals(&weeks);

    let period = reconcile_period(&weeks, &project.actuals, &project.plan, window, tax_multiplier);
    let budget = reconcile_budget(
        project.plan.received_budget,
        period.actual_spend,
        project.other_spends,
    );

    let sim_budget = simulation_budget(&metrics, project.manual_media_budget, mode);
    let lifetime_base_spend: f64 = project.actuals.values().map(|a| a.spends()).sum();

    ProjectView {
        id: project.id.clone(),
        name: project.name.clone(),
        location: project.location.clone(),
        poc: project.poc.clone(),
        status: project.status,
        is_locked: project.is_locked,
        mode,
        tax_multiplier,
        target_cpw: ratio_or_zero(metrics.base_budget, totals.ad),
        unit_delivery_percent: period.unit_delivery_percent(metrics.total_units),
        spend_progress_percent: percent_of(lifetime_base_spend, metrics.base_budget).min(100.0),
        distribution: check_distribution(&project.weeks),
        performance: weekly_performance(&weeks, &project.actuals, tax_multiplier),
        media_mix: forecast(sim_budget, &project.media_plan, metrics.target_walkins),
        manual_override: is_manual_override(&metrics, project.manual_media_budget, mode),
        channels: aggregate_channels(
            &project.media_plan,
            &project.channel_performance,
            tax_multiplier,
        ),
        metrics,
        weeks,
        weekly_totals: totals,
        period,
        budget,
    }
}
