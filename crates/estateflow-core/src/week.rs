use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Editable distribution inputs for one campaign week.
///
/// Only the three percentage curves are stored; planned leads, AP, AD and
/// spends are derived from them on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekInputs {
    /// Week index, `0..CAMPAIGN_WEEKS`.
    pub id: u32,
    pub week_label: String,
    /// Display range, e.g. `"1 Oct - 7 Oct"`.
    pub date_range: String,
    /// Share of the plan budget spent this week.
    pub spend_distribution: f64,
    /// Share of target leads expected this week.
    pub lead_distribution: f64,
    /// Planned lead-to-AD conversion for this week.
    pub ad_conversion: f64,
}

/// Reported actuals for one week.
///
/// Every field is optional: `None` means "not entered", which the engine
/// reads as zero. `spends` is always the base (pre-tax) amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyActuals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leads: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spends: Option<f64>,
    /// Digital bookings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presales_bookings: Option<f64>,
}

impl WeeklyActuals {
    #[must_use]
    pub fn leads(&self) -> f64 {
        self.leads.unwrap_or(0.0)
    }

    #[must_use]
    pub fn ap(&self) -> f64 {
        self.ap.unwrap_or(0.0)
    }

    #[must_use]
    pub fn ad(&self) -> f64 {
        self.ad.unwrap_or(0.0)
    }

    #[must_use]
    pub fn spends(&self) -> f64 {
        self.spends.unwrap_or(0.0)
    }

    #[must_use]
    pub fn bookings(&self) -> f64 {
        self.bookings.unwrap_or(0.0)
    }

    #[must_use]
    pub fn presales_bookings(&self) -> f64 {
        self.presales_bookings.unwrap_or(0.0)
    }

    /// Digital plus presales bookings.
    #[must_use]
    pub fn total_bookings(&self) -> f64 {
        self.bookings() + self.presales_bookings()
    }
}

/// Sparse actuals keyed by week id. A missing key means the week has not
/// been reported yet.
pub type ActualsMap = BTreeMap<u32, WeeklyActuals>;
