use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::{Connection, OpenFlags};

use crate::error::{Result, StoreError};

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".checklist-atendimento";
/// SQLite file name stored inside the application data directory.
pub const DB_FILE_NAME: &str = "checklist.db";
/// Environment variable that overrides the store location.
pub const DB_PATH_ENV: &str = "CHECKLIST_DB_PATH";

const CREATE_CHECKLIST_TABLE: &str = "CREATE TABLE IF NOT EXISTS checklist (
    idChecklist INTEGER PRIMARY KEY,
    cliente TEXT NOT NULL,
    empresa TEXT NOT NULL,
    status TEXT NOT NULL,
    descricao TEXT,
    data DATE NOT NULL
)";

/// Handle to the checklist store. It only remembers where the SQLite file
/// lives; every operation opens its own connection and drops it before
/// returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Point the store at an explicit SQLite file. Nothing is opened until an
    /// operation runs, so tests can hand in a temporary path and production
    /// code can resolve one through [`Store::from_env`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `CHECKLIST_DB_PATH` when set, otherwise the default location in the
    /// user's home directory.
    pub fn from_env() -> Result<Self> {
        match env::var_os(DB_PATH_ENV) {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// Resolve `~/.checklist-atendimento/checklist.db`.
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDirectory)?;
        Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
    }

    /// Location of the SQLite file, mostly useful for log lines and for
    /// tests that inspect the raw table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the data directory, the database file and the `checklist`
    /// table exist. Safe to call on every startup.
    pub fn ensure_store(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::DataDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&self.path).map_err(|source| self.unavailable(source))?;
        conn.execute(CREATE_CHECKLIST_TABLE, [])
            .map_err(|source| self.unavailable(source))?;

        tracing::debug!(path = %self.path.display(), "checklist store ready");
        Ok(())
    }

    /// Open a connection scoped to a single operation. The file must already
    /// exist; creating it is [`Store::ensure_store`]'s job.
    pub(crate) fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::default().difference(OpenFlags::SQLITE_OPEN_CREATE);
        Connection::open_with_flags(&self.path, flags).map_err(|source| self.unavailable(source))
    }

    fn unavailable(&self, source: rusqlite::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_lives_under_data_dir() {
        // Skipped on machines without a resolvable home directory.
        if let Ok(path) = Store::default_path() {
            assert!(path.ends_with(Path::new(DATA_DIR_NAME).join(DB_FILE_NAME)));
        }
    }

    #[test]
    fn connect_does_not_create_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("missing.db"));

        let err = store.connect().unwrap_err();
        assert!(err.is_unavailable());
        assert!(!store.path().exists());
    }
}
