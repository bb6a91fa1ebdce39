use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::sheet::Sheet;
use crate::ExportError;

/// `<stem>_<YYYY-MM-DD>.csv`, with path separators in the stem replaced.
#[must_use]
pub fn export_file_name(stem: &str, date: NaiveDate) -> String {
    let safe: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{safe}_{}.csv", date.format("%Y-%m-%d"))
}

/// Write one sheet into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ExportError`] if rendering fails or the file cannot be written.
pub fn write_sheet(dir: &Path, sheet: &Sheet, date: NaiveDate) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;
    let path = dir.join(export_file_name(&sheet.stem, date));
    let csv = sheet.to_csv()?;
    std::fs::write(&path, csv).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::info!(
        sheet = sheet.title,
        rows = sheet.rows.len(),
        path = %path.display(),
        "exported sheet"
    );
    Ok(path)
}
