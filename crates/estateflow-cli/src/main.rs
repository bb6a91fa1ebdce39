mod edit;
mod exports;
mod report;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use estateflow_core::{AppConfig, CampaignCalendar, ViewMode, CAMPAIGN_WEEKS};
use estateflow_metrics::ReportingWindow;
use estateflow_state::AppState;
use tracing_subscriber::EnvFilter;

use crate::edit::EditCommands;

#[derive(Debug, Parser)]
#[command(name = "estateflow", version)]
#[command(about = "Marketing funnel planning for real-estate campaigns")]
struct Cli {
    /// Snapshot file to read and write (defaults to `ESTATEFLOW_STATE_PATH`)
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Cost presentation: brand (base spend) or agency (all-in spend)
    #[arg(long, global = true)]
    view: Option<ViewMode>,
    /// First day of the reporting window (YYYY-MM-DD)
    #[arg(long, global = true)]
    from: Option<NaiveDate>,
    /// Last day of the reporting window (YYYY-MM-DD)
    #[arg(long, global = true)]
    to: Option<NaiveDate>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a fresh snapshot from the sample portfolio
    Init {
        /// Seed from the portfolio YAML (`ESTATEFLOW_PORTFOLIO_PATH`) instead
        #[arg(long)]
        from_portfolio: bool,
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// List projects with delivery and budget for the reporting window
    Projects {
        /// Only projects owned by this POC
        #[arg(long)]
        poc: Option<String>,
    },
    /// List POCs
    Pocs,
    /// Show a project's business plan and derived targets
    Plan {
        /// Project id
        project: String,
    },
    /// Show the week-on-week plan
    Wow {
        /// Project id
        project: String,
    },
    /// Show the media mix forecast
    MediaMix {
        /// Project id
        project: String,
    },
    /// Show weekly targets against recorded actuals
    Performance {
        /// Project id
        project: String,
    },
    /// Show recorded channel funnels and cost per stage
    Channels {
        /// Project id
        project: String,
    },
    /// Portfolio analytics across projects that are not completed
    Analytics {
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
    /// Write report sheets as CSV
    Export {
        /// Export one project's sheets instead of the portfolio sheets
        #[arg(long)]
        project: Option<String>,
        /// Destination directory (defaults to `ESTATEFLOW_EXPORT_DIR`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Edit the portfolio
    Edit {
        #[command(subcommand)]
        command: EditCommands,
    },
}

/// Settings resolved from config and global flags, shared by every command.
pub(crate) struct Context {
    pub config: AppConfig,
    pub state_path: PathBuf,
    pub mode: ViewMode,
    pub calendar: CampaignCalendar,
    pub window: ReportingWindow,
}

impl Context {
    fn new(config: AppConfig, cli: &Cli) -> Self {
        let calendar = config.calendar();
        let window = resolve_window(&calendar, cli.from, cli.to);
        Self {
            state_path: cli.state.clone().unwrap_or_else(|| config.state_path.clone()),
            mode: cli.view.unwrap_or(config.view_mode),
            calendar,
            window,
            config,
        }
    }

    /// The saved snapshot, or the sample portfolio when none exists yet.
    pub fn load_state(&self) -> anyhow::Result<AppState> {
        if let Some(state) = estateflow_state::load_snapshot(&self.state_path)? {
            return Ok(state);
        }
        tracing::info!(
            path = %self.state_path.display(),
            "no snapshot found; using the sample portfolio"
        );
        Ok(estateflow_state::sample_state(&self.calendar))
    }
}

/// Missing bounds default to the campaign's first and last day.
fn resolve_window(
    calendar: &CampaignCalendar,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> ReportingWindow {
    if from.is_none() && to.is_none() {
        return ReportingWindow::full();
    }
    let from = from.unwrap_or(calendar.start);
    let to = to.unwrap_or_else(|| calendar.week_end(CAMPAIGN_WEEKS - 1));
    ReportingWindow::from_dates(calendar, from, to)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = estateflow_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::new(config, &cli);

    match cli.command {
        Some(Commands::Init {
            from_portfolio,
            force,
        }) => edit::run_init(&ctx, from_portfolio, force),
        Some(Commands::Projects { poc }) => report::run_projects(&ctx, poc.as_deref()),
        Some(Commands::Pocs) => report::run_pocs(&ctx),
        Some(Commands::Plan { project }) => report::run_plan(&ctx, &project),
        Some(Commands::Wow { project }) => report::run_wow(&ctx, &project),
        Some(Commands::MediaMix { project }) => report::run_media_mix(&ctx, &project),
        Some(Commands::Performance { project }) => report::run_performance(&ctx, &project),
        Some(Commands::Channels { project }) => report::run_channels(&ctx, &project),
        Some(Commands::Analytics { project }) => report::run_analytics(&ctx, project.as_deref()),
        Some(Commands::Export { project, out }) => {
            exports::run_export(&ctx, project.as_deref(), out)
        }
        Some(Commands::Edit { command }) => edit::run_edit(&ctx, command),
        None => report::run_projects(&ctx, None),
    }
}
