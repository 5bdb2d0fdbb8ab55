//! Domain models that mirror the `checklist` table. They stay plain data
//! holders; validation lives here so both insert and update paths agree on
//! what a storable entry looks like.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{Result, StoreError};

/// Status for work that is still open.
pub const PENDENTE: &str = "Pendente";
/// Status for work that was dropped.
pub const CANCELADO: &str = "Cancelado";
/// Status for work that is done.
pub const FINALIZADO: &str = "Finalizado";

/// Statuses hidden from the default listing.
pub const CLOSED_STATUSES: [&str; 2] = [CANCELADO, FINALIZADO];

#[derive(Debug, Clone, PartialEq, Eq)]
/// A persisted checklist row.
pub struct ChecklistEntry {
    /// Rowid assigned by SQLite on insert.
    pub id: i64,
    /// Person who requested the service. Stored exactly as typed, so any
    /// upper-casing done by a form has already happened upstream.
    pub client: String,
    /// Company the client belongs to. Required, like `client`.
    pub company: String,
    /// Free text. See [`PENDENTE`], [`CANCELADO`] and [`FINALIZADO`] for the
    /// values the rest of the application gives meaning to.
    pub status: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl ChecklistEntry {
    /// Whether the entry shows up in the default (active) listing.
    pub fn is_active(&self) -> bool {
        !CLOSED_STATUSES.contains(&self.status.as_str())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("client", &self.client)?;
        require("company", &self.company)?;
        require("status", &self.status)
    }
}

impl fmt::Display for ChecklistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} / {} [{}]",
            self.id, self.date, self.client, self.company, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Field values for an entry that has not been stored yet.
pub struct EntryDraft {
    /// See [`ChecklistEntry::client`].
    pub client: String,
    /// See [`ChecklistEntry::company`].
    pub company: String,
    pub status: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl EntryDraft {
    /// Build a draft from the required fields. The description starts empty
    /// because most entries are logged before anyone writes notes; attach one
    /// with [`EntryDraft::with_description`].
    pub fn new(
        client: impl Into<String>,
        company: impl Into<String>,
        status: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            client: client.into(),
            company: company.into(),
            status: status.into(),
            description: None,
            date,
        }
    }

    /// Builder-style setter for the free-text notes column, which is the
    /// only nullable field in the table.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the store-assigned id, producing the persisted form.
    pub fn into_entry(self, id: i64) -> ChecklistEntry {
        ChecklistEntry {
            id,
            client: self.client,
            company: self.company,
            status: self.status,
            description: self.description,
            date: self.date,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("client", &self.client)?;
        require("company", &self.company)?;
        require("status", &self.status)
    }
}

/// Blank values are rejected but accepted values are stored untouched.
fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(StoreError::InvalidEntry { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn closed_statuses_are_not_active() {
        let mut entry = EntryDraft::new("Acme", "Corp", PENDENTE, date()).into_entry(1);
        assert!(entry.is_active());

        entry.status = CANCELADO.to_string();
        assert!(!entry.is_active());
        entry.status = FINALIZADO.to_string();
        assert!(!entry.is_active());

        // Matching is exact, so a differently cased value stays active.
        entry.status = "finalizado".to_string();
        assert!(entry.is_active());
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let draft = EntryDraft::new("  ", "Corp", PENDENTE, date());
        assert!(matches!(
            draft.validate(),
            Err(StoreError::InvalidEntry { field: "client" })
        ));

        let draft = EntryDraft::new("Acme", "Corp", "", date());
        assert!(matches!(
            draft.validate(),
            Err(StoreError::InvalidEntry { field: "status" })
        ));
    }

    #[test]
    fn description_is_optional() {
        let draft = EntryDraft::new("Acme", "Corp", PENDENTE, date());
        assert!(draft.validate().is_ok());
        assert_eq!(draft.description, None);

        let draft = draft.with_description("printer offline");
        assert_eq!(draft.description.as_deref(), Some("printer offline"));
    }

    #[test]
    fn display_includes_date_and_status() {
        let entry = EntryDraft::new("Acme", "Corp", PENDENTE, date()).into_entry(7);
        assert_eq!(entry.to_string(), "#7 2024-01-01 Acme / Corp [Pendente]");
    }
}
