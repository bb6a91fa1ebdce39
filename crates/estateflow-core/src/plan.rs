use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One Crore in currency units. Booking values and ticket sizes are entered in
/// Crore; budgets, CPLs and spends are plain currency units.
pub const CRORE: f64 = 10_000_000.0;

/// Business-plan inputs for one project.
///
/// Percentages are whole numbers (`12.5` means 12.5%). `ats` is a divisor in
/// every unit derivation and is expected to be non-zero; nothing here
/// enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningData {
    /// Target booking value, in Crore.
    #[serde(rename = "overallBV")]
    pub overall_bv: f64,
    /// Average ticket size per unit, in Crore.
    pub ats: f64,
    pub digital_contribution_percent: f64,
    pub presales_contribution_percent: f64,
    /// Lead-to-walk-in conversion.
    pub ltw_percent: f64,
    /// Walk-in-to-booking conversion.
    pub wtb_percent: f64,
    /// Planned cost per lead, in currency units.
    pub cpl: f64,
    /// Agency fee / tax applied on top of base media spend.
    pub tax_percent: f64,
    /// Work-order amount actually received, in currency units.
    #[serde(default)]
    pub received_budget: f64,
}

impl Default for PlanningData {
    fn default() -> Self {
        Self {
            overall_bv: 350.0,
            ats: 7.0,
            digital_contribution_percent: 12.5,
            presales_contribution_percent: 2.5,
            ltw_percent: 3.0,
            wtb_percent: 6.0,
            cpl: 4819.0,
            tax_percent: 18.0,
            received_budget: 0.0,
        }
    }
}

/// Cost presentation used when displaying spends.
///
/// `Brand` shows base (pre-tax) media spend, `Agency` shows all-in spend with
/// the plan's tax percentage applied. Stored spends are always base amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Brand,
    Agency,
}

impl ViewMode {
    /// Multiplier applied to stored base spends for display.
    #[must_use]
    pub fn tax_multiplier(self, tax_percent: f64) -> f64 {
        match self {
            ViewMode::Brand => 1.0,
            ViewMode::Agency => 1.0 + tax_percent / 100.0,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Brand => write!(f, "brand"),
            ViewMode::Agency => write!(f, "agency"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brand" | "base" => Ok(ViewMode::Brand),
            "agency" | "all-in" | "allin" => Ok(ViewMode::Agency),
            other => Err(CoreError::InvalidViewMode(other.to_string())),
        }
    }
}
