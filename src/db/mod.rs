//! Persistence module split across logical submodules.

mod checklist;
mod connection;

pub use checklist::WriteOutcome;
pub use connection::{Store, DATA_DIR_NAME, DB_FILE_NAME, DB_PATH_ENV};

use crate::error::Result;

/// Legacy behaviour for list screens: a failed read logs the error and shows
/// an empty list instead of propagating.
pub trait OrReportEmpty<T> {
    fn or_report_empty(self) -> Vec<T>;
}

impl<T> OrReportEmpty<T> for Result<Vec<T>> {
    fn or_report_empty(self) -> Vec<T> {
        self.unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to list checklist entries");
            Vec::new()
        })
    }
}
