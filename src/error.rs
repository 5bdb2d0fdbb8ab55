//! Error types for the checklist store.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the persistence layer. A write that matched no row is
/// not an error; see [`crate::db::WriteOutcome`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file or the `checklist` table could not be opened or created.
    #[error("checklist store unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The directory holding the store file could not be created.
    #[error("failed to create data directory {}: {source}", path.display())]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A statement against an opened store failed.
    #[error("failed to {operation}: {source}")]
    Statement {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A required field was blank.
    #[error("checklist entry field `{field}` must not be empty")]
    InvalidEntry { field: &'static str },

    /// The default store location depends on a home directory.
    #[error("could not locate home directory")]
    NoHomeDirectory,
}

impl StoreError {
    /// True for the failures that leave the application without a store.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable { .. } | StoreError::DataDirectory { .. }
        )
    }

    pub(crate) fn statement(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StoreError::Statement { operation, source }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
