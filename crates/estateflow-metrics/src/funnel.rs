//! Business plan to annual funnel targets.

use estateflow_core::{PlanningData, CRORE};
use serde::Serialize;

/// Annual targets derived from a [`PlanningData`].
///
/// Recomputed on every read and never stored. Money is in currency units
/// except the `*_bv` fields, which stay in Crore.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMetrics {
    pub total_units: f64,
    pub digital_units: f64,
    pub presales_units: f64,
    #[serde(rename = "digitalBV")]
    pub digital_bv: f64,
    #[serde(rename = "presalesBV")]
    pub presales_bv: f64,
    pub target_walkins: f64,
    pub target_leads: f64,
    pub base_budget: f64,
    pub tax_amount: f64,
    pub all_in_budget: f64,
    /// Cost per walk-in, always on the base budget.
    pub cpw: f64,
    /// Cost per digital booking, on the base budget.
    pub cpb: f64,
    /// Overall booking value in currency units.
    pub revenue: f64,
    /// All-in budget as a percentage of digital revenue.
    #[serde(rename = "targetCOM")]
    pub target_com: f64,
}

impl CalculatedMetrics {
    /// Plan budget in the given presentation: base for brand view, all-in
    /// for agency view.
    #[must_use]
    pub fn budget_for(&self, mode: estateflow_core::ViewMode) -> f64 {
        match mode {
            estateflow_core::ViewMode::Brand => self.base_budget,
            estateflow_core::ViewMode::Agency => self.all_in_budget,
        }
    }

    /// True when a zero ATS or conversion rate left a unit, walk-in or lead
    /// target infinite or NaN.
    #[must_use]
    pub fn has_unbounded_targets(&self) -> bool {
        !self.total_units.is_finite()
            || !self.target_walkins.is_finite()
            || !self.target_leads.is_finite()
    }
}

/// Derive the full funnel from a business plan.
///
/// Divisions are deliberately unguarded: `ats == 0` or a zero
/// `ltw_percent`/`wtb_percent` produces infinities or NaN, which callers
/// must treat as unvalidated input.
#[must_use]
pub fn calculate_metrics(plan: &PlanningData) -> CalculatedMetrics {
    let digital_bv = plan.overall_bv * (plan.digital_contribution_percent / 100.0);
    let presales_bv = plan.overall_bv * (plan.presales_contribution_percent / 100.0);

    let total_units = plan.overall_bv / plan.ats;
    let digital_units = digital_bv / plan.ats;
    let presales_units = presales_bv / plan.ats;

    let target_walkins = digital_units / (plan.wtb_percent / 100.0);
    let target_leads = target_walkins / (plan.ltw_percent / 100.0);

    let base_budget = target_leads * plan.cpl;
    let tax_amount = base_budget * (plan.tax_percent / 100.0);
    let all_in_budget = base_budget + tax_amount;

    let cpw = base_budget / target_walkins;
    let cpb = base_budget / digital_units;
    let revenue = plan.overall_bv * CRORE;
    let target_com = (all_in_budget / (digital_bv * CRORE)) * 100.0;

    CalculatedMetrics {
        total_units,
        digital_units,
        presales_units,
        digital_bv,
        presales_bv,
        target_walkins,
        target_leads,
        base_budget,
        tax_amount,
        all_in_budget,
        cpw,
        cpb,
        revenue,
        target_com,
    }
}

#[cfg(test)]
mod tests {
    use estateflow_core::ViewMode;

    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn default_plan_funnel() {
        let m = calculate_metrics(&PlanningData::default());
        assert!(close(m.digital_bv, 43.75, 1e-9));
        assert!(close(m.presales_bv, 8.75, 1e-9));
        assert!(close(m.total_units, 50.0, 1e-9));
        assert!(close(m.digital_units, 6.25, 1e-9));
        assert!(close(m.presales_units, 1.25, 1e-9));
        assert!(close(m.target_walkins, 104.166_666, 1e-3));
        assert!(close(m.target_leads, 3472.222, 1e-2));
        assert!(close(m.base_budget, 16_732_638.9, 1.0));
        assert!(close(m.all_in_budget, m.base_budget * 1.18, 1e-6));
    }

    #[test]
    fn tax_amount_is_share_of_base() {
        let m = calculate_metrics(&PlanningData::default());
        assert!(close(m.tax_amount, m.base_budget * 0.18, 1e-6));
        assert!(close(m.all_in_budget, m.base_budget + m.tax_amount, 1e-6));
    }

    #[test]
    fn cost_ratios_use_base_budget() {
        let m = calculate_metrics(&PlanningData::default());
        assert!(close(m.cpw, m.base_budget / m.target_walkins, 1e-6));
        assert!(close(m.cpb, m.base_budget / m.digital_units, 1e-6));
        // cpl * leads / walkins collapses to cpl / ltw
        assert!(close(m.cpw, 4819.0 / 0.03, 1e-6));
    }

    #[test]
    fn revenue_and_com_scale_crore() {
        let m = calculate_metrics(&PlanningData::default());
        assert!(close(m.revenue, 3_500_000_000.0, 1e-3));
        let expected = m.all_in_budget / (43.75 * CRORE) * 100.0;
        assert!(close(m.target_com, expected, 1e-9));
    }

    #[test]
    fn zero_conversion_is_infinite_not_guarded() {
        let plan = PlanningData {
            wtb_percent: 0.0,
            ..PlanningData::default()
        };
        let m = calculate_metrics(&plan);
        assert!(m.target_walkins.is_infinite());
        assert!(m.target_leads.is_infinite());
        assert!(m.has_unbounded_targets());
    }

    #[test]
    fn zero_lead_to_walkin_flags_unbounded_targets() {
        let plan = PlanningData {
            ltw_percent: 0.0,
            wtb_percent: 6.0,
            ..PlanningData::default()
        };
        let m = calculate_metrics(&plan);
        assert!(m.total_units.is_finite());
        assert!(m.target_leads.is_infinite());
        assert!(m.has_unbounded_targets());
        assert!(!calculate_metrics(&PlanningData::default()).has_unbounded_targets());
    }

    #[test]
    fn zero_ats_is_not_finite() {
        let plan = PlanningData {
            ats: 0.0,
            ..PlanningData::default()
        };
        let m = calculate_metrics(&plan);
        assert!(!m.total_units.is_finite());
        assert!(m.has_unbounded_targets());
    }

    #[test]
    fn serializes_with_upper_case_acronyms() {
        let m = calculate_metrics(&PlanningData::default());
        let json = serde_json::to_value(m).unwrap();
        assert!(json.get("digitalBV").is_some());
        assert!(json.get("targetCOM").is_some());
        assert!(json.get("allInBudget").is_some());
    }

    #[test]
    fn budget_for_follows_view_mode() {
        let m = calculate_metrics(&PlanningData::default());
        assert!(close(m.budget_for(ViewMode::Brand), m.base_budget, 0.0));
        assert!(close(m.budget_for(ViewMode::Agency), m.all_in_budget, 0.0));
    }
}
