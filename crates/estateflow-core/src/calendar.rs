//! The fixed 13-week campaign calendar.

use chrono::{Days, NaiveDate};

use crate::week::WeekInputs;

/// Number of weeks in every campaign.
pub const CAMPAIGN_WEEKS: usize = 13;

/// Spend distribution curve new projects start with.
pub const DEFAULT_SPEND_CURVE: [f64; CAMPAIGN_WEEKS] =
    [0.0, 0.0, 7.0, 8.0, 11.0, 11.0, 13.0, 13.0, 13.0, 13.0, 11.0, 0.0, 0.0];

/// Lead distribution curve new projects start with.
pub const DEFAULT_LEAD_CURVE: [f64; CAMPAIGN_WEEKS] =
    [0.0, 0.0, 7.0, 8.0, 11.0, 11.0, 13.0, 13.0, 13.0, 13.0, 11.0, 0.0, 0.0];

/// Lead-to-AD conversion curve new projects start with. Weeks with no lead
/// share still carry the 2.5% baseline.
pub const DEFAULT_AD_CONVERSION_CURVE: [f64; CAMPAIGN_WEEKS] =
    [2.5, 2.5, 3.0, 3.0, 2.5, 2.5, 2.5, 2.7, 2.7, 2.7, 3.2, 3.0, 2.5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignCalendar {
    pub start: NaiveDate,
}

impl Default for CampaignCalendar {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl CampaignCalendar {
    #[must_use]
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// First day of week `index`.
    #[must_use]
    pub fn week_start(&self, index: usize) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(7 * index as u64))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Last day of week `index` (six days after its start).
    #[must_use]
    pub fn week_end(&self, index: usize) -> NaiveDate {
        self.week_start(index)
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX)
    }

    #[must_use]
    pub fn week_label(index: usize) -> String {
        format!("Week {}", index + 1)
    }

    /// Display range such as `"1 Oct - 7 Oct"`.
    #[must_use]
    pub fn date_range(&self, index: usize) -> String {
        format!(
            "{} - {}",
            self.week_start(index).format("%-d %b"),
            self.week_end(index).format("%-d %b")
        )
    }

    /// Week index a calendar date falls in.
    ///
    /// Dates before the campaign start map to `-1`; dates past the last week
    /// are clamped to the final week index.
    #[must_use]
    pub fn week_index(&self, date: NaiveDate) -> i32 {
        let days = (date - self.start).num_days();
        if days < 0 {
            return -1;
        }
        let last = i64::try_from(CAMPAIGN_WEEKS - 1).unwrap_or(i64::MAX);
        let index = (days / 7).min(last);
        i32::try_from(index).unwrap_or(i32::MAX)
    }

    /// Week rows with the default distribution curves.
    #[must_use]
    pub fn default_weeks(&self) -> [WeekInputs; CAMPAIGN_WEEKS] {
        std::array::from_fn(|i| WeekInputs {
            id: u32::try_from(i).unwrap_or(u32::MAX),
            week_label: Self::week_label(i),
            date_range: self.date_range(i),
            spend_distribution: DEFAULT_SPEND_CURVE[i],
            lead_distribution: DEFAULT_LEAD_CURVE[i],
            ad_conversion: DEFAULT_AD_CONVERSION_CURVE[i],
        })
    }
}
