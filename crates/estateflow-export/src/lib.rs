//! Flat, row-oriented report sheets built from the metrics engine and
//! written as CSV files.

pub mod reports;
pub mod sheet;
pub mod writer;

pub use reports::{
    analytics_data, business_plan, channel_tracker, master_report, media_mix, performance,
    wow_plan,
};
pub use sheet::Sheet;
pub use writer::{export_file_name, write_sheet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv buffer: {0}")]
    Flush(String),

    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
