//! CSV export handler.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use estateflow_core::ViewMode;
use estateflow_export::{
    analytics_data, business_plan, channel_tracker, master_report, media_mix, performance,
    wow_plan, write_sheet, Sheet,
};
use estateflow_state::AppState;

use crate::Context;

/// Sheets for one project, or the portfolio-wide sheets when `project_id` is
/// `None`.
pub(crate) fn sheets_for(
    state: &AppState,
    mode: ViewMode,
    project_id: Option<&str>,
) -> anyhow::Result<Vec<Sheet>> {
    let Some(id) = project_id else {
        return Ok(vec![
            master_report(&state.projects, mode),
            analytics_data(&state.projects, mode, None),
        ]);
    };
    let project = state
        .project(id)
        .ok_or_else(|| anyhow::anyhow!("project not found: {id}"))?;
    Ok(vec![
        business_plan(project),
        media_mix(project),
        wow_plan(project, mode),
        performance(project, mode),
        channel_tracker(project, mode),
        analytics_data(&state.projects, mode, Some(id)),
    ])
}

fn write_all(dir: &Path, sheets: &[Sheet], date: NaiveDate) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        written.push(write_sheet(dir, sheet, date)?);
    }
    Ok(written)
}

/// Write report sheets as dated CSV files.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, the project is unknown,
/// or a file cannot be written.
pub(crate) fn run_export(
    ctx: &Context,
    project_id: Option<&str>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let state = ctx.load_state()?;
    let sheets = sheets_for(&state, ctx.mode, project_id)?;
    let dir = out.unwrap_or_else(|| ctx.config.export_dir.clone());
    let today = chrono::Local::now().date_naive();

    let written = write_all(&dir, &sheets, today)?;
    for path in &written {
        println!("{}", path.display());
    }
    println!("{} sheet(s) written ({} view)", written.len(), ctx.mode);
    Ok(())
}
