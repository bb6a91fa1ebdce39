//! Week-on-week distribution of annual targets.

use estateflow_core::{ViewMode, WeekInputs};
use serde::Serialize;

use crate::funnel::CalculatedMetrics;

/// Appointments proposed per appointment done. A fixed rule of thumb that is
/// independent of the plan's walk-in-to-booking rate.
pub const AP_PER_AD: f64 = 2.0;

/// Distribution sums further than this from 100 are flagged.
pub const DISTRIBUTION_TOLERANCE: f64 = 0.01;

/// One week with its planned targets populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyData {
    pub id: u32,
    pub week_label: String,
    pub date_range: String,
    pub spend_distribution: f64,
    pub lead_distribution: f64,
    pub ad_conversion: f64,
    pub leads: f64,
    pub cumulative_leads: f64,
    pub ap: f64,
    pub cumulative_ap: f64,
    pub ad: f64,
    pub cumulative_ad: f64,
    pub spends_base: f64,
    pub spends_all_in: f64,
}

impl WeeklyData {
    /// Planned spend in the given presentation.
    #[must_use]
    pub fn spends_for(&self, mode: ViewMode) -> f64 {
        match mode {
            ViewMode::Brand => self.spends_base,
            ViewMode::Agency => self.spends_all_in,
        }
    }
}

/// Spread annual targets across the campaign weeks.
///
/// A single pass in week order; the running totals start at zero for every
/// call, so the result never depends on previously derived values.
#[must_use]
pub fn distribute_weeks(weeks: &[WeekInputs], metrics: &CalculatedMetrics) -> Vec<WeeklyData> {
    let mut cum_leads = 0.0;
    let mut cum_ap = 0.0;
    let mut cum_ad = 0.0;

    weeks
        .iter()
        .map(|week| {
            let leads = metrics.target_leads * (week.lead_distribution / 100.0);
            cum_leads += leads;
            let ad = leads * (week.ad_conversion / 100.0);
            let ap = ad * AP_PER_AD;
            cum_ap += ap;
            cum_ad += ad;

            WeeklyData {
                id: week.id,
                week_label: week.week_label.clone(),
                date_range: week.date_range.clone(),
                spend_distribution: week.spend_distribution,
                lead_distribution: week.lead_distribution,
                ad_conversion: week.ad_conversion,
                leads,
                cumulative_leads: cum_leads,
                ap,
                cumulative_ap: cum_ap,
                ad,
                cumulative_ad: cum_ad,
                spends_base: metrics.base_budget * (week.spend_distribution / 100.0),
                spends_all_in: metrics.all_in_budget * (week.spend_distribution / 100.0),
            }
        })
        .collect()
}

/// Plan totals across all weeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotals {
    pub leads: f64,
    pub ap: f64,
    pub ad: f64,
    pub spends_base: f64,
    pub spends_all_in: f64,
}

#[must_use]
pub fn weekly_totals(weeks: &[WeeklyData]) -> WeeklyTotals {
    weeks.iter().fold(WeeklyTotals::default(), |acc, w| WeeklyTotals {
        leads: acc.leads + w.leads,
        ap: acc.ap + w.ap,
        ad: acc.ad + w.ad,
        spends_base: acc.spends_base + w.spends_base,
        spends_all_in: acc.spends_all_in + w.spends_all_in,
    })
}

/// Sums of the editable curves, for highlighting a plan that does not
/// distribute exactly 100%. Nothing is blocked on these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionCheck {
    pub spend_total: f64,
    pub lead_total: f64,
    pub average_ad_conversion: f64,
    pub spend_balanced: bool,
    pub lead_balanced: bool,
}

impl DistributionCheck {
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.spend_balanced && self.lead_balanced
    }
}

#[must_use]
pub fn check_distribution(weeks: &[WeekInputs]) -> DistributionCheck {
    let spend_total: f64 = weeks.iter().map(|w| w.spend_distribution).sum();
    let lead_total: f64 = weeks.iter().map(|w| w.lead_distribution).sum();
    let conversion_total: f64 = weeks.iter().map(|w| w.ad_conversion).sum();
    #[allow(clippy::cast_precision_loss)]
    let average_ad_conversion = if weeks.is_empty() {
        0.0
    } else {
        conversion_total / weeks.len() as f64
    };

    DistributionCheck {
        spend_total,
        lead_total,
        average_ad_conversion,
        spend_balanced: (spend_total - 100.0).abs() <= DISTRIBUTION_TOLERANCE,
        lead_balanced: (lead_total - 100.0).abs() <= DISTRIBUTION_TOLERANCE,
    }
}
