pub mod app_config;
pub mod calendar;
pub mod channel;
pub mod config;
pub mod plan;
pub mod portfolio;
pub mod project;
pub mod week;

pub use app_config::{AppConfig, Environment};
pub use calendar::{CampaignCalendar, CAMPAIGN_WEEKS};
pub use channel::{default_media_plan, ChannelPerformance, MediaChannel, PRESET_CHANNELS};
pub use config::{load_app_config, load_app_config_from_env};
pub use plan::{PlanningData, ViewMode, CRORE};
pub use portfolio::{load_portfolio, PortfolioFile, ProjectConfig, WeekCurve};
pub use project::{Poc, Project, ProjectStatus};
pub use week::{ActualsMap, WeekInputs, WeeklyActuals};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read portfolio file {path}: {source}")]
    PortfolioFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse portfolio file: {0}")]
    PortfolioFileParse(#[from] serde_yaml::Error),

    #[error("portfolio validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid view mode: {0} (expected \"brand\" or \"agency\")")]
    InvalidViewMode(String),

    #[error("invalid project status: {0}")]
    InvalidStatus(String),
}
