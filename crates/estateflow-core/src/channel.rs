use serde::{Deserialize, Serialize};

/// Qualified-lead share given to a newly added channel.
pub const DEFAULT_CAPI_PERCENT: f64 = 30.0;
/// Qualified-to-AP share given to a newly added channel.
pub const DEFAULT_CAPI_TO_AP_PERCENT: f64 = 30.0;
/// AP-to-AD share given to a newly added channel.
pub const DEFAULT_AP_TO_AD_PERCENT: f64 = 50.0;

/// Channel names offered when adding a channel from a preset.
pub const PRESET_CHANNELS: &[&str] = &[
    "LinkedIn",
    "YouTube",
    "Print / Newspaper",
    "Hoardings / OOH",
    "Radio",
    "Channel Partners",
];

/// One media channel in a project's simulated media mix.
///
/// The channel's absolute budget is never stored; it is always derived from
/// the simulation budget and `allocation_percent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaChannel {
    pub id: String,
    pub name: String,
    /// Share of the simulation budget.
    pub allocation_percent: f64,
    pub estimated_cpl: f64,
    /// Lead to qualified (CAPI).
    pub capi_percent: f64,
    /// Qualified to AP.
    pub capi_to_ap_percent: f64,
    /// AP to AD.
    pub ap_to_ad_percent: f64,
    #[serde(default)]
    pub is_custom: bool,
}

impl MediaChannel {
    /// A user-added channel with default funnel percentages and no budget.
    #[must_use]
    pub fn custom(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            allocation_percent: 0.0,
            estimated_cpl: 0.0,
            capi_percent: DEFAULT_CAPI_PERCENT,
            capi_to_ap_percent: DEFAULT_CAPI_TO_AP_PERCENT,
            ap_to_ad_percent: DEFAULT_AP_TO_AD_PERCENT,
            is_custom: true,
        }
    }

    fn preset(
        id: &str,
        name: &str,
        allocation_percent: f64,
        estimated_cpl: f64,
        funnel: (f64, f64, f64),
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            allocation_percent,
            estimated_cpl,
            capi_percent: funnel.0,
            capi_to_ap_percent: funnel.1,
            ap_to_ad_percent: funnel.2,
            is_custom: false,
        }
    }
}

/// The media mix every new project starts from.
#[must_use]
pub fn default_media_plan() -> Vec<MediaChannel> {
    vec![
        MediaChannel::preset("fb", "Meta (FB/Insta)", 40.0, 4200.0, (35.0, 30.0, 50.0)),
        MediaChannel::preset("google", "Google Search", 30.0, 3800.0, (40.0, 35.0, 55.0)),
        MediaChannel::preset("display", "Google Display", 10.0, 2500.0, (20.0, 15.0, 30.0)),
        MediaChannel::preset("portals", "Property Portals", 15.0, 3200.0, (45.0, 40.0, 60.0)),
        MediaChannel::preset("native", "Native / Others", 5.0, 5500.0, (25.0, 20.0, 40.0)),
    ]
}

/// Actual funnel counts recorded for one channel.
///
/// Counts are expected to shrink down the funnel but nothing enforces it.
/// `spends` is the base (pre-tax) amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelPerformance {
    pub channel_id: String,
    pub spends: f64,
    pub leads: f64,
    pub open_attempted: f64,
    pub contacted: f64,
    /// Leads handed to sales; the qualified (CAPI) stage.
    pub assigned_to_sales: f64,
    pub ap: f64,
    pub ad: f64,
    pub bookings: f64,
    pub lost: f64,
}

impl ChannelPerformance {
    /// An all-zero record, used when a channel has nothing recorded.
    #[must_use]
    pub fn empty(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }
}
