//! Media mix forecast: a simulated budget split across channels and pushed
//! down each channel's funnel.

use estateflow_core::{MediaChannel, ViewMode};
use serde::Serialize;

use crate::delivery::{percent_of, ratio_or_zero};
use crate::funnel::CalculatedMetrics;

/// Total allocation further than this from 100 is flagged.
pub const ALLOCATION_TOLERANCE: f64 = 0.5;

/// A manual budget within this much of the plan budget is not reported as an
/// override.
pub const OVERRIDE_TOLERANCE: f64 = 1.0;

/// Budget the forecast runs on: the manual override when one is set,
/// otherwise the plan budget in the given presentation.
#[must_use]
pub fn simulation_budget(
    metrics: &CalculatedMetrics,
    manual_budget: Option<f64>,
    mode: ViewMode,
) -> f64 {
    manual_budget
        .filter(|b| !b.is_nan())
        .unwrap_or_else(|| metrics.budget_for(mode))
}

/// Whether a manual budget meaningfully differs from the plan budget.
#[must_use]
pub fn is_manual_override(
    metrics: &CalculatedMetrics,
    manual_budget: Option<f64>,
    mode: ViewMode,
) -> bool {
    manual_budget.is_some_and(|b| (b - metrics.budget_for(mode)).abs() > OVERRIDE_TOLERANCE)
}

/// Allocation percentage that yields `entered_budget` under `sim_budget`.
///
/// `None` when the simulation budget is not positive; the stored allocation
/// must then be left untouched.
#[must_use]
pub fn allocation_for_budget(sim_budget: f64, entered_budget: f64) -> Option<f64> {
    (sim_budget > 0.0).then(|| entered_budget / sim_budget * 100.0)
}

/// Forecast for a single channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelForecast {
    pub channel_id: String,
    pub name: String,
    pub allocation_percent: f64,
    pub estimated_cpl: f64,
    pub budget: f64,
    pub leads: f64,
    /// Qualified (CAPI) leads.
    pub qualified: f64,
    pub ap: f64,
    pub ad: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastTotals {
    pub budget: f64,
    pub leads: f64,
    pub qualified: f64,
    pub ap: f64,
    pub ad: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMixForecast {
    pub sim_budget: f64,
    pub channels: Vec<ChannelForecast>,
    pub totals: ForecastTotals,
    /// Total budget over total leads, zero without leads.
    pub blended_cpl: f64,
    pub total_allocation: f64,
    /// Set when `total_allocation` is not within
    /// [`ALLOCATION_TOLERANCE`] of 100.
    pub allocation_mismatch: bool,
    pub target_walkins: f64,
    /// Forecast walk-ins as a percentage of target, capped at 100.
    pub walkin_coverage_percent: f64,
    pub meets_walkin_target: bool,
}

impl MediaMixForecast {
    /// Walk-ins still missing from the forecast, zero once the target is met.
    #[must_use]
    pub fn walkin_gap(&self) -> f64 {
        (self.target_walkins - self.totals.ad).max(0.0)
    }
}

/// Run the forecast. A NaN percentage on a channel counts as zero.
#[must_use]
pub fn forecast(
    sim_budget: f64,
    channels: &[MediaChannel],
    target_walkins: f64,
) -> MediaMixForecast {
    let rows: Vec<ChannelForecast> = channels
        .iter()
        .map(|ch| forecast_channel(sim_budget, ch))
        .collect();

    let totals = rows.iter().fold(ForecastTotals::default(), |acc, r| ForecastTotals {
        budget: acc.budget + r.budget,
        leads: acc.leads + r.leads,
        qualified: acc.qualified + r.qualified,
        ap: acc.ap + r.ap,
        ad: acc.ad + r.ad,
    });

    let total_allocation: f64 = channels
        .iter()
        .map(|ch| or_zero(ch.allocation_percent))
        .sum();

    MediaMixForecast {
        sim_budget,
        blended_cpl: ratio_or_zero(totals.budget, totals.leads),
        allocation_mismatch: (total_allocation - 100.0).abs() > ALLOCATION_TOLERANCE,
        total_allocation,
        target_walkins,
        walkin_coverage_percent: percent_of(totals.ad, target_walkins).min(100.0),
        meets_walkin_target: totals.ad >= target_walkins,
        channels: rows,
        totals,
    }
}

fn forecast_channel(sim_budget: f64, ch: &MediaChannel) -> ChannelForecast {
    let allocation = or_zero(ch.allocation_percent);
    let budget = sim_budget * (allocation / 100.0);
    let leads = ratio_or_zero(budget, or_zero(ch.estimated_cpl));
    let qualified = leads * (or_zero(ch.capi_percent) / 100.0);
    let ap = qualified * (or_zero(ch.capi_to_ap_percent) / 100.0);
    let ad = ap * (or_zero(ch.ap_to_ad_percent) / 100.0);

    ChannelForecast {
        channel_id: ch.id.clone(),
        name: ch.name.clone(),
        allocation_percent: allocation,
        estimated_cpl: ch.estimated_cpl,
        budget,
        leads,
        qualified,
        ap,
        ad,
    }
}

fn or_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}
