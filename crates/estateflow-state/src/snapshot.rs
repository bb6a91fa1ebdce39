use std::path::Path;

use crate::{AppState, StateError};

/// Read a snapshot, or `None` when the file does not exist yet.
///
/// # Errors
///
/// Returns [`StateError::SnapshotIo`] if the file exists but cannot be read,
/// or [`StateError::SnapshotParse`] if it is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<Option<AppState>, StateError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(snapshot_io(path, e)),
    };
    let state: AppState = serde_json::from_str(&content)?;
    tracing::info!(
        path = %path.display(),
        projects = state.projects.len(),
        "loaded snapshot"
    );
    Ok(Some(state))
}

/// Write `state` as pretty JSON, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`StateError::SnapshotIo`] if the directory or file cannot be
/// written.
pub fn save_snapshot(path: &Path, state: &AppState) -> Result<(), StateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| snapshot_io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json).map_err(|e| snapshot_io(path, e))?;
    tracing::info!(
        path = %path.display(),
        projects = state.projects.len(),
        "saved snapshot"
    );
    Ok(())
}

fn snapshot_io(path: &Path, source: std::io::Error) -> StateError {
    StateError::SnapshotIo {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use estateflow_core::CampaignCalendar;

    use super::*;
    use crate::seed::sample_state;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("estateflow-{}-{}", std::process::id(), uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn missing_snapshot_is_none() {
        let loaded = load_snapshot(&temp_path("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_restores_state() {
        let path = temp_path("state.json");
        let state = sample_state(&CampaignCalendar::default());
        save_snapshot(&path, &state).unwrap();
        let loaded = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_snapshot_is_parse_error() {
        let path = temp_path("bad.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, StateError::SnapshotParse(_)));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
