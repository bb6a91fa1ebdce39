use std::path::PathBuf;

use chrono::NaiveDate;

use crate::calendar::CampaignCalendar;
use crate::plan::ViewMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// JSON snapshot holding the whole portfolio.
    pub state_path: PathBuf,
    /// YAML portfolio used to seed a fresh snapshot.
    pub portfolio_path: PathBuf,
    pub campaign_start: NaiveDate,
    pub view_mode: ViewMode,
    pub export_dir: PathBuf,
}

impl AppConfig {
    #[must_use]
    pub fn calendar(&self) -> CampaignCalendar {
        CampaignCalendar::new(self.campaign_start)
    }
}
