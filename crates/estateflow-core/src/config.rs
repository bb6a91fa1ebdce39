use std::path::PathBuf;

use chrono::NaiveDate;

use crate::app_config::{AppConfig, Environment};
use crate::plan::ViewMode;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("ESTATEFLOW_ENV", "development"))?;
    let log_level = or_default("ESTATEFLOW_LOG_LEVEL", "info");
    let state_path = PathBuf::from(or_default(
        "ESTATEFLOW_STATE_PATH",
        "./data/estateflow.json",
    ));
    let portfolio_path = PathBuf::from(or_default(
        "ESTATEFLOW_PORTFOLIO_PATH",
        "./config/portfolio.yaml",
    ));

    let raw_start = or_default("ESTATEFLOW_CAMPAIGN_START", "2025-10-01");
    let campaign_start = NaiveDate::parse_from_str(raw_start.trim(), "%Y-%m-%d")
        .map_err(|e| invalid("ESTATEFLOW_CAMPAIGN_START", e.to_string()))?;

    let view_mode = or_default("ESTATEFLOW_VIEW_MODE", "brand")
        .parse::<ViewMode>()
        .map_err(|e| invalid("ESTATEFLOW_VIEW_MODE", e.to_string()))?;

    let export_dir = PathBuf::from(or_default("ESTATEFLOW_EXPORT_DIR", "./exports"));

    Ok(AppConfig {
        env,
        log_level,
        state_path,
        portfolio_path,
        campaign_start,
        view_mode,
        export_dir,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ESTATEFLOW_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
