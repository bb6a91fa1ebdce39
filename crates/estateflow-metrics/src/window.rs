//! Reporting windows over the campaign weeks.

use chrono::NaiveDate;
use estateflow_core::{CampaignCalendar, CAMPAIGN_WEEKS};
use serde::Serialize;

/// An inclusive range of week indices, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ReportingWindow {
    Empty,
    Weeks { start: u32, end: u32 },
}

impl ReportingWindow {
    /// Every campaign week.
    #[must_use]
    pub fn full() -> Self {
        ReportingWindow::Weeks {
            start: 0,
            end: last_week(),
        }
    }

    /// Window from raw week indices as produced by
    /// [`CampaignCalendar::week_index`].
    ///
    /// A start of `-1` (before the campaign) clamps to week 0. An end before
    /// the campaign, or a start after the end, gives an empty window; nothing
    /// wraps around to the last week.
    #[must_use]
    pub fn from_indices(start: i32, end: i32) -> Self {
        let last = i64::from(last_week());
        if end < 0 {
            return ReportingWindow::Empty;
        }
        let start = i64::from(start).clamp(0, last);
        let end = i64::from(end).clamp(0, last);
        if start > end {
            return ReportingWindow::Empty;
        }
        match (u32::try_from(start), u32::try_from(end)) {
            (Ok(start), Ok(end)) => ReportingWindow::Weeks { start, end },
            _ => ReportingWindow::Empty,
        }
    }

    /// Resolve two calendar dates against the campaign calendar.
    #[must_use]
    pub fn from_dates(calendar: &CampaignCalendar, from: NaiveDate, to: NaiveDate) -> Self {
        Self::from_indices(calendar.week_index(from), calendar.week_index(to))
    }

    #[must_use]
    pub fn contains(&self, week_id: u32) -> bool {
        match *self {
            ReportingWindow::Empty => false,
            ReportingWindow::Weeks { start, end } => (start..=end).contains(&week_id),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, ReportingWindow::Empty)
    }
}

impl std::fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportingWindow::Empty => write!(f, "no weeks"),
            ReportingWindow::Weeks { start, end } if start == end => {
                write!(f, "week {}", start + 1)
            }
            ReportingWindow::Weeks { start, end } => {
                write!(f, "weeks {}-{}", start + 1, end + 1)
            }
        }
    }
}

fn last_week() -> u32 {
    u32::try_from(CAMPAIGN_WEEKS - 1).unwrap_or(0)
}
