//! Every sheet rendered from the sample portfolio and written to disk.

use chrono::NaiveDate;
use estateflow_core::{CampaignCalendar, ViewMode};
use estateflow_export::{
    analytics_data, business_plan, channel_tracker, master_report, media_mix, performance,
    wow_plan, write_sheet, Sheet,
};
use estateflow_state::sample_state;

fn all_sheets() -> Vec<Sheet> {
    let state = sample_state(&CampaignCalendar::default());
    let mut sheets = vec![
        master_report(&state.projects, ViewMode::Agency),
        analytics_data(&state.projects, ViewMode::Agency, None),
    ];
    for p in &state.projects {
        sheets.push(business_plan(p));
        sheets.push(media_mix(p));
        sheets.push(wow_plan(p, ViewMode::Agency));
        sheets.push(performance(p, ViewMode::Agency));
        sheets.push(channel_tracker(p, ViewMode::Agency));
    }
    sheets
}

#[test]
fn every_row_matches_its_header() {
    for sheet in all_sheets() {
        for row in &sheet.rows {
            assert_eq!(row.len(), sheet.headers.len(), "{}", sheet.title);
        }
    }
}

#[test]
fn master_report_has_a_row_per_project() {
    let sheets = all_sheets();
    assert_eq!(sheets[0].rows.len(), 2);
    assert_eq!(sheets[0].rows[1][0], "Godrej Reserve");
}

#[test]
fn sheets_write_with_dated_names() {
    let dir = std::env::temp_dir().join(format!("estateflow-sample-export-{}", std::process::id()));
    let date = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
    for sheet in all_sheets() {
        let path = write_sheet(&dir, &sheet, date).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_2025-11-24.csv"), "{name}");
        let csv = std::fs::read_to_string(&path).unwrap();
        assert_eq!(csv.lines().count(), sheet.rows.len() + 1);
    }
    assert!(dir.join("EstateFlow_Master_Report_2025-11-24.csv").exists());
    assert!(dir.join("Godrej Horizon_Channel_Tracker_2025-11-24.csv").exists());
    let _ = std::fs::remove_dir_all(&dir);
}
