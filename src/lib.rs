//! Persistence layer for the checklist tracker: a single SQLite table of
//! support-desk entries with create, list, update and delete operations.
//!
//! ```no_run
//! use checklist_store::{EntryDraft, Store, PENDENTE};
//! use chrono::NaiveDate;
//!
//! let store = Store::new("checklist.db");
//! store.ensure_store()?;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let entry = store.create(&EntryDraft::new("Acme", "Corp", PENDENTE, date))?;
//! assert!(store.list_active()?.contains(&entry));
//! # Ok::<(), checklist_store::StoreError>(())
//! ```
pub mod db;
pub mod error;
pub mod models;

pub use db::{OrReportEmpty, Store, WriteOutcome};
pub use error::{Result, StoreError};
pub use models::{
    ChecklistEntry, EntryDraft, CANCELADO, CLOSED_STATUSES, FINALIZADO, PENDENTE,
};
