use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::calendar::{CampaignCalendar, CAMPAIGN_WEEKS};
use crate::channel::{default_media_plan, ChannelPerformance, MediaChannel};
use crate::plan::PlanningData;
use crate::project::{Poc, Project, ProjectStatus};
use crate::week::ActualsMap;
use crate::ConfigError;

/// One week's curve values as written in the portfolio YAML. Labels and
/// date ranges always come from the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeekCurve {
    pub spend_distribution: f64,
    pub lead_distribution: f64,
    pub ad_conversion: f64,
}

/// One project as written in the portfolio YAML. Anything omitted falls back
/// to the defaults a freshly created project gets.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub poc: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub plan: Option<PlanningData>,
    #[serde(default)]
    pub other_spends: f64,
    #[serde(default)]
    pub manual_media_budget: Option<f64>,
    #[serde(default)]
    pub media_plan: Option<Vec<MediaChannel>>,
    /// Either omitted or exactly one entry per campaign week, in order.
    #[serde(default)]
    pub weeks: Option<Vec<WeekCurve>>,
    #[serde(default)]
    pub actuals: ActualsMap,
    #[serde(default)]
    pub channel_performance: Vec<ChannelPerformance>,
    #[serde(default)]
    pub is_locked: bool,
}

impl ProjectConfig {
    /// Build the full project, generating week rows from `calendar`.
    #[must_use]
    pub fn into_project(self, calendar: &CampaignCalendar) -> Project {
        let mut project = Project::new(self.id, self.name, self.poc, calendar);
        if let Some(location) = self.location {
            project.location = location;
        }
        project.status = self.status;
        if let Some(plan) = self.plan {
            project.plan = plan;
        }
        project.other_spends = self.other_spends;
        project.manual_media_budget = self.manual_media_budget;
        project.media_plan = self.media_plan.unwrap_or_else(default_media_plan);
        for (week, curve) in project.weeks.iter_mut().zip(self.weeks.unwrap_or_default()) {
            week.spend_distribution = curve.spend_distribution;
            week.lead_distribution = curve.lead_distribution;
            week.ad_conversion = curve.ad_conversion;
        }
        project.actuals = self.actuals;
        project.channel_performance = self.channel_performance;
        project.is_locked = self.is_locked;
        project
    }
}

#[derive(Debug, Deserialize)]
pub struct PortfolioFile {
    #[serde(default)]
    pub pocs: Vec<String>,
    pub projects: Vec<ProjectConfig>,
}

impl PortfolioFile {
    /// POC records with sequential ids, in file order.
    #[must_use]
    pub fn poc_records(&self) -> Vec<Poc> {
        self.pocs
            .iter()
            .enumerate()
            .map(|(i, name)| Poc {
                id: (i + 1).to_string(),
                name: name.clone(),
            })
            .collect()
    }
}

/// Load and validate a portfolio from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_portfolio(path: &Path) -> Result<PortfolioFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PortfolioFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let portfolio: PortfolioFile = serde_yaml::from_str(&content)?;

    validate_portfolio(&portfolio)?;

    Ok(portfolio)
}

/// Structural checks only. Numeric plan values are stored as given, even
/// ones that make derived metrics meaningless.
fn validate_portfolio(portfolio: &PortfolioFile) -> Result<(), ConfigError> {
    let known_pocs: HashSet<&str> = portfolio.pocs.iter().map(String::as_str).collect();
    let mut seen_ids = HashSet::new();

    for project in &portfolio.projects {
        if project.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "project name must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(project.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate project id: '{}'",
                project.id
            )));
        }

        if !known_pocs.is_empty() && !known_pocs.contains(project.poc.as_str()) {
            return Err(ConfigError::Validation(format!(
                "project '{}' references unknown POC '{}'",
                project.name, project.poc
            )));
        }

        if let Some(week) = project
            .actuals
            .keys()
            .find(|w| usize::try_from(**w).map_or(true, |w| w >= CAMPAIGN_WEEKS))
        {
            return Err(ConfigError::Validation(format!(
                "project '{}' has actuals for week {week}; weeks run 0..{}",
                project.name,
                CAMPAIGN_WEEKS - 1
            )));
        }

        if let Some(weeks) = project.weeks.as_ref().filter(|w| w.len() != CAMPAIGN_WEEKS) {
            return Err(ConfigError::Validation(format!(
                "project '{}' lists {} weeks; expected {CAMPAIGN_WEEKS}",
                project.name,
                weeks.len()
            )));
        }

        if let Some(channels) = &project.media_plan {
            let mut channel_ids = HashSet::new();
            for ch in channels {
                if !channel_ids.insert(ch.id.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "project '{}' has duplicate channel id '{}'",
                        project.name, ch.id
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
pocs: [Amey, Rohan]
projects:
  - id: '1'
    name: Godrej Horizon
    location: Wadala, Mumbai
    poc: Amey
    status: Active
    other_spends: 50000
    is_locked: true
    actuals:
      0: { leads: 38, ap: 3, ad: 2, spends: 137143 }
  - id: '2'
    name: Godrej Reserve
    poc: Rohan
";

    fn parse(yaml: &str) -> PortfolioFile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn sample_portfolio_validates() {
        let portfolio = parse(SAMPLE);
        assert!(validate_portfolio(&portfolio).is_ok());
        assert_eq!(portfolio.projects.len(), 2);
    }

    #[test]
    fn into_project_fills_defaults() {
        let portfolio = parse(SAMPLE);
        let cal = CampaignCalendar::default();
        let reserve = portfolio.projects[1].clone().into_project(&cal);
        assert_eq!(reserve.location, "New Location");
        assert_eq!(reserve.status, ProjectStatus::Planning);
        assert_eq!(reserve.plan, PlanningData::default());
        assert_eq!(reserve.media_plan.len(), 5);
    }

    #[test]
    fn into_project_keeps_given_fields() {
        let portfolio = parse(SAMPLE);
        let cal = CampaignCalendar::default();
        let horizon = portfolio.projects[0].clone().into_project(&cal);
        assert_eq!(horizon.location, "Wadala, Mumbai");
        assert_eq!(horizon.status, ProjectStatus::Active);
        assert!(horizon.is_locked);
        assert!((horizon.other_spends - 50_000.0).abs() < f64::EPSILON);
        assert_eq!(horizon.actuals[&0].leads, Some(38.0));
        assert_eq!(horizon.actuals[&0].bookings, None);
    }

    #[test]
    fn into_project_takes_week_curves() {
        let spend = [10.0, 10.0, 9.0, 9.0, 8.0, 8.0, 8.0, 7.0, 7.0, 7.0, 6.0, 6.0, 5.0];
        let weeks: Vec<WeekCurve> = spend
            .iter()
            .map(|&s| WeekCurve {
                spend_distribution: s,
                lead_distribution: s,
                ad_conversion: 4.0,
            })
            .collect();
        let mut config = parse(SAMPLE).projects[1].clone();
        config.weeks = Some(weeks);

        let cal = CampaignCalendar::default();
        let defaults = cal.default_weeks();
        let reserve = config.into_project(&cal);
        assert!((reserve.weeks[0].spend_distribution - 10.0).abs() < f64::EPSILON);
        assert!((reserve.weeks[12].lead_distribution - 5.0).abs() < f64::EPSILON);
        assert!((reserve.weeks[6].ad_conversion - 4.0).abs() < f64::EPSILON);
        assert_eq!(reserve.weeks[6].week_label, defaults[6].week_label);
        assert_eq!(reserve.weeks[6].date_range, defaults[6].date_range);
    }

    #[test]
    fn validate_rejects_short_week_list() {
        let portfolio = parse(
            "projects:\n  - id: '1'\n    name: A\n    poc: Amey\n    weeks:\n      - { spend_distribution: 100, lead_distribution: 100, ad_conversion: 3 }\n",
        );
        let err = validate_portfolio(&portfolio).unwrap_err();
        assert!(err.to_string().contains("lists 1 weeks; expected 13"));
    }

    #[test]
    fn poc_records_are_numbered_from_one() {
        let pocs = parse(SAMPLE).poc_records();
        assert_eq!(pocs[0].id, "1");
        assert_eq!(pocs[1].name, "Rohan");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let portfolio = parse("projects:\n  - { id: '1', name: '  ', poc: Amey }\n");
        let err = validate_portfolio(&portfolio).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let portfolio = parse(
            "projects:\n  - { id: '1', name: A, poc: Amey }\n  - { id: '1', name: B, poc: Amey }\n",
        );
        let err = validate_portfolio(&portfolio).unwrap_err();
        assert!(err.to_string().contains("duplicate project id"));
    }

    #[test]
    fn validate_rejects_unknown_poc() {
        let portfolio = parse("pocs: [Amey]\nprojects:\n  - { id: '1', name: A, poc: Pratham }\n");
        let err = validate_portfolio(&portfolio).unwrap_err();
        assert!(err.to_string().contains("unknown POC 'Pratham'"));
    }

    #[test]
    fn validate_allows_any_poc_without_poc_list() {
        let portfolio = parse("projects:\n  - { id: '1', name: A, poc: Pratham }\n");
        assert!(validate_portfolio(&portfolio).is_ok());
    }

    #[test]
    fn validate_rejects_actuals_outside_campaign() {
        let portfolio =
            parse("projects:\n  - id: '1'\n    name: A\n    poc: Amey\n    actuals:\n      13: { leads: 1 }\n");
        let err = validate_portfolio(&portfolio).unwrap_err();
        assert!(err.to_string().contains("week 13"));
    }

    #[test]
    fn load_portfolio_reports_missing_file() {
        let err = load_portfolio(Path::new("/nonexistent/portfolio.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::PortfolioFileIo { .. }));
    }
}
