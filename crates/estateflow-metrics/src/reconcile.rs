//! Actuals against targets, for a reporting window and a cost presentation.

use estateflow_core::{ActualsMap, PlanningData, WeeklyActuals};
use serde::Serialize;

use crate::delivery::{percent_of, ratio_or_zero, Delivery, DeliveryStatus};
use crate::weekly::WeeklyData;
use crate::window::ReportingWindow;

/// An achieved conversion rate compared with the plan's rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioCheck {
    pub achieved_percent: f64,
    pub planned_percent: f64,
    pub status: DeliveryStatus,
}

impl RatioCheck {
    fn new(achieved_percent: f64, planned_percent: f64) -> Self {
        Self {
            achieved_percent,
            planned_percent,
            status: DeliveryStatus::classify(percent_of(achieved_percent, planned_percent)),
        }
    }
}

/// Reconciliation of one project over one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub window: ReportingWindow,
    pub leads: Delivery,
    pub ap: Delivery,
    pub ad: Delivery,
    /// Planned spend inside the window, in the same presentation as
    /// `actual_spend`.
    pub planned_spend: f64,
    /// Stored base spend multiplied by the presentation's tax multiplier.
    pub actual_spend: f64,
    pub ach_cpl: f64,
    pub ach_cpw: f64,
    pub ach_cpb: f64,
    pub digital_bookings: f64,
    pub presales_bookings: f64,
    pub total_bookings: f64,
    /// Achieved lead to walk-in rate against `ltw_percent`.
    pub l2w: RatioCheck,
    /// Achieved walk-in to booking rate against `wtb_percent`.
    pub wtb: RatioCheck,
    /// Crore.
    pub achieved_digital_bv: f64,
    /// Crore.
    pub achieved_presales_bv: f64,
}

impl PeriodSummary {
    /// Booked units as a percentage of the plan's total units.
    #[must_use]
    pub fn unit_delivery_percent(&self, total_units: f64) -> f64 {
        percent_of(self.total_bookings, total_units)
    }
}

/// Sum targets and actuals over `window` and derive the achieved ratios.
///
/// Weeks without an actuals record count as zero. Every ratio resolves to
/// zero rather than dividing by zero.
#[must_use]
pub fn reconcile_period(
    weeks: &[WeeklyData],
    actuals: &ActualsMap,
    plan: &PlanningData,
    window: ReportingWindow,
    tax_multiplier: f64,
) -> PeriodSummary {
    let mut target = Counts::default();
    let mut planned_base_spend = 0.0;
    for w in weeks.iter().filter(|w| window.contains(w.id)) {
        target.leads += w.leads;
        target.ap += w.ap;
        target.ad += w.ad;
        planned_base_spend += w.spends_base;
    }

    let achieved = actuals
        .iter()
        .filter(|(id, _)| window.contains(**id))
        .fold(Counts::default(), |acc, (_, a)| acc.add(a));

    let actual_spend = achieved.spends * tax_multiplier;

    PeriodSummary {
        window,
        leads: Delivery::new(target.leads, achieved.leads),
        ap: Delivery::new(target.ap, achieved.ap),
        ad: Delivery::new(target.ad, achieved.ad),
        planned_spend: planned_base_spend * tax_multiplier,
        actual_spend,
        ach_cpl: ratio_or_zero(actual_spend, achieved.leads),
        ach_cpw: ratio_or_zero(actual_spend, achieved.ad),
        ach_cpb: ratio_or_zero(actual_spend, achieved.total_bookings()),
        digital_bookings: achieved.bookings,
        presales_bookings: achieved.presales_bookings,
        total_bookings: achieved.total_bookings(),
        l2w: RatioCheck::new(percent_of(achieved.ad, achieved.leads), plan.ltw_percent),
        wtb: RatioCheck::new(percent_of(achieved.bookings, achieved.ad), plan.wtb_percent),
        achieved_digital_bv: achieved.bookings * plan.ats,
        achieved_presales_bv: achieved.presales_bookings * plan.ats,
    }
}

/// Spend against the received work order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub received_budget: f64,
    pub performance_spend: f64,
    pub other_spends: f64,
    pub total_spend: f64,
    /// Negative when over budget.
    pub pending: f64,
    pub over_budget: bool,
}

/// `total = performance_spend + other_spends`, `pending = received - total`.
///
/// `performance_spend` is already in the display presentation, usually
/// [`PeriodSummary::actual_spend`].
#[must_use]
pub fn reconcile_budget(
    received_budget: f64,
    performance_spend: f64,
    other_spends: f64,
) -> BudgetSummary {
    let total_spend = performance_spend + other_spends;
    let pending = received_budget - total_spend;
    BudgetSummary {
        received_budget,
        performance_spend,
        other_spends,
        total_spend,
        pending,
        over_budget: pending < 0.0,
    }
}

/// Target against actual for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPerformance {
    pub id: u32,
    pub week_label: String,
    pub date_range: String,
    /// `false` when no actuals record exists for the week.
    pub reported: bool,
    pub target_leads: f64,
    pub actual_leads: f64,
    pub target_ap: f64,
    pub actual_ap: f64,
    pub target_ad: f64,
    pub actual_ad: f64,
    pub target_spend: f64,
    pub actual_spend: f64,
    pub digital_bookings: f64,
    pub presales_bookings: f64,
    pub cumulative_leads: f64,
    pub cumulative_ad: f64,
    pub ach_cpl: f64,
    pub ach_cpw: f64,
    pub ach_cpb: f64,
    pub ach_l2w: f64,
    pub ach_wtb: f64,
}

/// Per-week rows plus a totals row computed on the summed counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTable {
    pub rows: Vec<WeekPerformance>,
    pub totals: WeekPerformance,
}

#[must_use]
pub fn weekly_performance(
    weeks: &[WeeklyData],
    actuals: &ActualsMap,
    tax_multiplier: f64,
) -> PerformanceTable {
    let empty = WeeklyActuals::default();
    let mut cumulative = Counts::default();

    let rows: Vec<WeekPerformance> = weeks
        .iter()
        .map(|w| {
            let record = actuals.get(&w.id);
            let a = record.unwrap_or(&empty);
            cumulative = cumulative.add(a);
            performance_row(
                w.id,
                w.week_label.clone(),
                w.date_range.clone(),
                record.is_some(),
                &Counts::from_targets(w),
                &Counts::from_actuals(a),
                &cumulative,
                tax_multiplier,
            )
        })
        .collect();

    let target_totals = weeks
        .iter()
        .fold(Counts::default(), |acc, w| acc.plus(&Counts::from_targets(w)));
    let totals = performance_row(
        0,
        "Total".to_string(),
        String::new(),
        !actuals.is_empty(),
        &target_totals,
        &cumulative,
        &cumulative,
        tax_multiplier,
    );

    PerformanceTable { rows, totals }
}

#[allow(clippy::too_many_arguments)]
fn performance_row(
    id: u32,
    week_label: String,
    date_range: String,
    reported: bool,
    target: &Counts,
    actual: &Counts,
    cumulative: &Counts,
    tax_multiplier: f64,
) -> WeekPerformance {
    let actual_spend = actual.spends * tax_multiplier;
    WeekPerformance {
        id,
        week_label,
        date_range,
        reported,
        target_leads: target.leads,
        actual_leads: actual.leads,
        target_ap: target.ap,
        actual_ap: actual.ap,
        target_ad: target.ad,
        actual_ad: actual.ad,
        target_spend: target.spends * tax_multiplier,
        actual_spend,
        digital_bookings: actual.bookings,
        presales_bookings: actual.presales_bookings,
        cumulative_leads: cumulative.leads,
        cumulative_ad: cumulative.ad,
        ach_cpl: ratio_or_zero(actual_spend, actual.leads),
        ach_cpw: ratio_or_zero(actual_spend, actual.ad),
        ach_cpb: ratio_or_zero(actual_spend, actual.total_bookings()),
        ach_l2w: percent_of(actual.ad, actual.leads),
        ach_wtb: percent_of(actual.bookings, actual.ad),
    }
}

/// Funnel counts with base spend. Used for both targets and actuals.
#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    leads: f64,
    ap: f64,
    ad: f64,
    spends: f64,
    bookings: f64,
    presales_bookings: f64,
}

impl Counts {
    fn from_targets(w: &WeeklyData) -> Self {
        Self {
            leads: w.leads,
            ap: w.ap,
            ad: w.ad,
            spends: w.spends_base,
            ..Self::default()
        }
    }

    fn from_actuals(a: &WeeklyActuals) -> Self {
        Self::default().add(a)
    }

    fn add(self, a: &WeeklyActuals) -> Self {
        self.plus(&Self {
            leads: a.leads(),
            ap: a.ap(),
            ad: a.ad(),
            spends: a.spends(),
            bookings: a.bookings(),
            presales_bookings: a.presales_bookings(),
        })
    }

    fn plus(self, other: &Self) -> Self {
        Self {
            leads: self.leads + other.leads,
            ap: self.ap + other.ap,
            ad: self.ad + other.ad,
            spends: self.spends + other.spends,
            bookings: self.bookings + other.bookings,
            presales_bookings: self.presales_bookings + other.presales_bookings,
        }
    }

    fn total_bookings(&self) -> f64 {
        self.bookings + self.presales_bookings
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
