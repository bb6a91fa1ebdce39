//! Typed field keys for the numeric edit commands.
//!
//! Each key parses from its JSON name (`overallBV`), a kebab or snake
//! spelling (`overall-bv`), or a short alias where one is listed.

use std::str::FromStr;

use estateflow_core::{ChannelPerformance, MediaChannel, PlanningData, WeekInputs, WeeklyActuals};

use crate::StateError;

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn unknown(entity: &'static str, field: &str) -> StateError {
    StateError::UnknownField {
        entity,
        field: field.to_string(),
    }
}

/// Business plan inputs gated by the project lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    OverallBv,
    Ats,
    DigitalContributionPercent,
    PresalesContributionPercent,
    LtwPercent,
    WtbPercent,
    Cpl,
    TaxPercent,
}

impl PlanField {
    pub(crate) fn set(self, plan: &mut PlanningData, value: f64) {
        let slot = match self {
            PlanField::OverallBv => &mut plan.overall_bv,
            PlanField::Ats => &mut plan.ats,
            PlanField::DigitalContributionPercent => &mut plan.digital_contribution_percent,
            PlanField::PresalesContributionPercent => &mut plan.presales_contribution_percent,
            PlanField::LtwPercent => &mut plan.ltw_percent,
            PlanField::WtbPercent => &mut plan.wtb_percent,
            PlanField::Cpl => &mut plan.cpl,
            PlanField::TaxPercent => &mut plan.tax_percent,
        };
        *slot = value;
    }
}

impl FromStr for PlanField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "overallbv" | "bv" => Ok(PlanField::OverallBv),
            "ats" => Ok(PlanField::Ats),
            "digitalcontributionpercent" | "digital" => Ok(PlanField::DigitalContributionPercent),
            "presalescontributionpercent" | "presales" => {
                Ok(PlanField::PresalesContributionPercent)
            }
            "ltwpercent" | "ltw" => Ok(PlanField::LtwPercent),
            "wtbpercent" | "wtb" => Ok(PlanField::WtbPercent),
            "cpl" => Ok(PlanField::Cpl),
            "taxpercent" | "tax" => Ok(PlanField::TaxPercent),
            _ => Err(unknown("plan", s)),
        }
    }
}

/// Budget fields editable whether or not the plan is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    ReceivedBudget,
    OtherSpends,
}

impl FromStr for ProjectField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "receivedbudget" | "received" => Ok(ProjectField::ReceivedBudget),
            "otherspends" | "other" => Ok(ProjectField::OtherSpends),
            _ => Err(unknown("project", s)),
        }
    }
}

/// The three editable distribution curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekField {
    SpendDistribution,
    LeadDistribution,
    AdConversion,
}

impl WeekField {
    pub(crate) fn set(self, week: &mut WeekInputs, value: f64) {
        match self {
            WeekField::SpendDistribution => week.spend_distribution = value,
            WeekField::LeadDistribution => week.lead_distribution = value,
            WeekField::AdConversion => week.ad_conversion = value,
        }
    }
}

impl FromStr for WeekField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "spenddistribution" | "spend" => Ok(WeekField::SpendDistribution),
            "leaddistribution" | "lead" | "leads" => Ok(WeekField::LeadDistribution),
            "adconversion" | "ad" => Ok(WeekField::AdConversion),
            _ => Err(unknown("week", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualField {
    Leads,
    Ap,
    Ad,
    Spends,
    Bookings,
    PresalesBookings,
}

impl ActualField {
    pub(crate) fn set(self, actuals: &mut WeeklyActuals, value: Option<f64>) {
        let slot = match self {
            ActualField::Leads => &mut actuals.leads,
            ActualField::Ap => &mut actuals.ap,
            ActualField::Ad => &mut actuals.ad,
            ActualField::Spends => &mut actuals.spends,
            ActualField::Bookings => &mut actuals.bookings,
            ActualField::PresalesBookings => &mut actuals.presales_bookings,
        };
        *slot = value;
    }
}

impl FromStr for ActualField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "leads" => Ok(ActualField::Leads),
            "ap" => Ok(ActualField::Ap),
            "ad" | "walkins" => Ok(ActualField::Ad),
            "spends" | "spend" => Ok(ActualField::Spends),
            "bookings" => Ok(ActualField::Bookings),
            "presalesbookings" | "presales" => Ok(ActualField::PresalesBookings),
            _ => Err(unknown("actuals", s)),
        }
    }
}

/// Numeric media channel inputs. Names go through `RenameChannel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelField {
    AllocationPercent,
    EstimatedCpl,
    CapiPercent,
    CapiToApPercent,
    ApToAdPercent,
}

impl ChannelField {
    pub(crate) fn set(self, channel: &mut MediaChannel, value: f64) {
        let slot = match self {
            ChannelField::AllocationPercent => &mut channel.allocation_percent,
            ChannelField::EstimatedCpl => &mut channel.estimated_cpl,
            ChannelField::CapiPercent => &mut channel.capi_percent,
            ChannelField::CapiToApPercent => &mut channel.capi_to_ap_percent,
            ChannelField::ApToAdPercent => &mut channel.ap_to_ad_percent,
        };
        *slot = value;
    }
}

impl FromStr for ChannelField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "allocationpercent" | "allocation" => Ok(ChannelField::AllocationPercent),
            "estimatedcpl" | "cpl" => Ok(ChannelField::EstimatedCpl),
            "capipercent" | "capi" => Ok(ChannelField::CapiPercent),
            "capitoappercent" | "capitoap" => Ok(ChannelField::CapiToApPercent),
            "aptoadpercent" | "aptoad" => Ok(ChannelField::ApToAdPercent),
            _ => Err(unknown("channel", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceField {
    Spends,
    Leads,
    OpenAttempted,
    Contacted,
    AssignedToSales,
    Ap,
    Ad,
    Bookings,
    Lost,
}

impl PerformanceField {
    pub(crate) fn set(self, perf: &mut ChannelPerformance, value: f64) {
        let slot = match self {
            PerformanceField::Spends => &mut perf.spends,
            PerformanceField::Leads => &mut perf.leads,
            PerformanceField::OpenAttempted => &mut perf.open_attempted,
            PerformanceField::Contacted => &mut perf.contacted,
            PerformanceField::AssignedToSales => &mut perf.assigned_to_sales,
            PerformanceField::Ap => &mut perf.ap,
            PerformanceField::Ad => &mut perf.ad,
            PerformanceField::Bookings => &mut perf.bookings,
            PerformanceField::Lost => &mut perf.lost,
        };
        *slot = value;
    }
}

impl FromStr for PerformanceField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "spends" | "spend" => Ok(PerformanceField::Spends),
            "leads" => Ok(PerformanceField::Leads),
            "openattempted" | "open" => Ok(PerformanceField::OpenAttempted),
            "contacted" => Ok(PerformanceField::Contacted),
            "assignedtosales" | "assigned" | "capi" => Ok(PerformanceField::AssignedToSales),
            "ap" => Ok(PerformanceField::Ap),
            "ad" => Ok(PerformanceField::Ad),
            "bookings" => Ok(PerformanceField::Bookings),
            "lost" => Ok(PerformanceField::Lost),
            _ => Err(unknown("channel performance", s)),
        }
    }
}
