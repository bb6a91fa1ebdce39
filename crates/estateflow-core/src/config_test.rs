use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_accepts_known_names() {
    for (raw, expected) in [
        ("development", Environment::Development),
        ("Test", Environment::Test),
        (" production ", Environment::Production),
    ] {
        assert_eq!(parse_environment(raw).unwrap(), expected, "{raw}");
    }
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ESTATEFLOW_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.state_path, PathBuf::from("./data/estateflow.json"));
    assert_eq!(cfg.portfolio_path, PathBuf::from("./config/portfolio.yaml"));
    assert_eq!(
        cfg.campaign_start,
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    );
    assert_eq!(cfg.view_mode, ViewMode::Brand);
    assert_eq!(cfg.export_dir, PathBuf::from("./exports"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("ESTATEFLOW_ENV", "production");
    map.insert("ESTATEFLOW_LOG_LEVEL", "debug");
    map.insert("ESTATEFLOW_STATE_PATH", "/var/lib/estateflow/state.json");
    map.insert("ESTATEFLOW_CAMPAIGN_START", "2026-01-05");
    map.insert("ESTATEFLOW_VIEW_MODE", "agency");
    map.insert("ESTATEFLOW_EXPORT_DIR", "/tmp/out");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(
        cfg.state_path,
        PathBuf::from("/var/lib/estateflow/state.json")
    );
    assert_eq!(
        cfg.campaign_start,
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    );
    assert_eq!(cfg.view_mode, ViewMode::Agency);
    assert_eq!(cfg.export_dir, PathBuf::from("/tmp/out"));
}

#[test]
fn build_app_config_fails_with_invalid_campaign_start() {
    let mut map = HashMap::new();
    map.insert("ESTATEFLOW_CAMPAIGN_START", "01/10/2025");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ESTATEFLOW_CAMPAIGN_START"),
        "expected InvalidEnvVar(ESTATEFLOW_CAMPAIGN_START), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_view_mode() {
    let mut map = HashMap::new();
    map.insert("ESTATEFLOW_VIEW_MODE", "retail");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ESTATEFLOW_VIEW_MODE"),
        "expected InvalidEnvVar(ESTATEFLOW_VIEW_MODE), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_env() {
    let mut map = HashMap::new();
    map.insert("ESTATEFLOW_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ESTATEFLOW_ENV"),
        "expected InvalidEnvVar(ESTATEFLOW_ENV), got: {result:?}"
    );
}

#[test]
fn calendar_uses_configured_start() {
    let mut map = HashMap::new();
    map.insert("ESTATEFLOW_CAMPAIGN_START", "2026-01-05");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.calendar().date_range(0), "5 Jan - 11 Jan");
}
