use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{CampaignCalendar, CAMPAIGN_WEEKS};
use crate::channel::{default_media_plan, ChannelPerformance, MediaChannel};
use crate::plan::PlanningData;
use crate::week::{ActualsMap, WeekInputs};
use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "Planning"),
            ProjectStatus::Active => write!(f, "Active"),
            ProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// A campaign owner (single point of contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poc {
    pub id: String,
    pub name: String,
}

/// Aggregate root for one real-estate campaign.
///
/// A project exclusively owns its plan, week curves, actuals and media mix.
/// Nothing derived from the plan is stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Name of the assigned POC.
    pub poc: String,
    pub status: ProjectStatus,
    pub plan: PlanningData,
    /// Non-performance marketing spend, in currency units.
    #[serde(default)]
    pub other_spends: f64,
    /// Overrides the plan budget in the media mix simulation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_media_budget: Option<f64>,
    pub media_plan: Vec<MediaChannel>,
    pub weeks: [WeekInputs; CAMPAIGN_WEEKS],
    #[serde(default)]
    pub actuals: ActualsMap,
    #[serde(default)]
    pub channel_performance: Vec<ChannelPerformance>,
    #[serde(default)]
    pub is_locked: bool,
}

impl Project {
    /// A fresh unlocked project with the default plan, media mix and curves.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        poc: impl Into<String>,
        calendar: &CampaignCalendar,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: "New Location".to_string(),
            poc: poc.into(),
            status: ProjectStatus::Planning,
            plan: PlanningData::default(),
            other_spends: 0.0,
            manual_media_budget: None,
            media_plan: default_media_plan(),
            weeks: calendar.default_weeks(),
            actuals: ActualsMap::new(),
            channel_performance: Vec::new(),
            is_locked: false,
        }
    }

    /// Recorded performance for `channel_id`, if any.
    #[must_use]
    pub fn performance_for(&self, channel_id: &str) -> Option<&ChannelPerformance> {
        self.channel_performance
            .iter()
            .find(|p| p.channel_id == channel_id)
    }

    #[must_use]
    pub fn channel(&self, channel_id: &str) -> Option<&MediaChannel> {
        self.media_plan.iter().find(|c| c.id == channel_id)
    }
}
