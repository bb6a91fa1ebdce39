//! Portfolio state: the project collection, the commands that edit it, and
//! local JSON snapshots.

pub mod command;
pub mod controller;
pub mod fields;
pub mod reducer;
pub mod seed;
pub mod snapshot;

pub use command::Command;
pub use controller::Controller;
pub use fields::{ActualField, ChannelField, PerformanceField, PlanField, ProjectField, WeekField};
pub use reducer::apply;
pub use seed::{sample_state, state_from_portfolio};
pub use snapshot::{load_snapshot, save_snapshot};

use estateflow_core::{Poc, Project};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the application owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub pocs: Vec<Poc>,
}

impl AppState {
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects owned by `poc`, or all of them when `poc` is `None`.
    pub fn projects_for_poc<'a>(
        &'a self,
        poc: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Project> {
        self.projects
            .iter()
            .filter(move |p| poc.map_or(true, |name| p.poc == name))
    }
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("channel '{channel_id}' not found in project {project_id}")]
    ChannelNotFound {
        project_id: String,
        channel_id: String,
    },

    #[error("week {0} is outside the campaign")]
    WeekOutOfRange(u32),

    #[error("project {0} is locked; unlock it before editing the plan")]
    ProjectLocked(String),

    #[error("unknown {entity} field: {field}")]
    UnknownField { entity: &'static str, field: String },

    #[error("{0} name must be non-empty")]
    EmptyName(&'static str),

    #[error("{command} needs a finite number, got {value}")]
    NonFiniteValue { command: &'static str, value: f64 },

    #[error("POC already exists: {0}")]
    DuplicatePoc(String),

    #[error("failed to access snapshot {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),
}
