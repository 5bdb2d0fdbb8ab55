use chrono::{DateTime, NaiveDate};
use rusqlite::types::{FromSqlError, Type, ValueRef};
use rusqlite::{params, OptionalExtension, Params, Row};

use super::connection::Store;
use crate::error::{Result, StoreError};
use crate::models::{ChecklistEntry, EntryDraft, CANCELADO, FINALIZADO};

const SELECT_ENTRY: &str =
    "SELECT idChecklist, cliente, empresa, status, descricao, data FROM checklist";

/// Sort key that puts legacy millisecond rows on the same `YYYY-MM-DD` scale
/// as text rows, rounding to the nearest midnight like [`read_date`] does.
const ORDER_BY_DATE: &str = "ORDER BY CASE WHEN typeof(data) = 'integer'
    THEN date(data / 1000.0 + 43200, 'unixepoch')
    ELSE data END";

const DAY_MILLIS: i64 = 86_400_000;

/// Result of a write addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The row existed and was changed.
    Applied,
    /// No row carries the given id; nothing was touched.
    NotFound,
}

impl WriteOutcome {
    fn from_affected(rows: usize) -> Self {
        if rows == 0 {
            WriteOutcome::NotFound
        } else {
            WriteOutcome::Applied
        }
    }

    pub fn is_applied(self) -> bool {
        self == WriteOutcome::Applied
    }
}

impl Store {
    /// Insert a new entry and hand back the stored form with its fresh id.
    pub fn create(&self, draft: &EntryDraft) -> Result<ChecklistEntry> {
        draft.validate()?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO checklist (cliente, empresa, status, descricao, data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.client,
                draft.company,
                draft.status,
                draft.description,
                draft.date
            ],
        )
        .map_err(StoreError::statement("insert checklist entry"))?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, status = %draft.status, "checklist entry created");
        Ok(draft.clone().into_entry(id))
    }

    /// Entries that are neither cancelled nor finished, oldest date first.
    pub fn list_active(&self) -> Result<Vec<ChecklistEntry>> {
        self.query_entries(
            "list active checklist entries",
            &format!("{SELECT_ENTRY} WHERE status <> ?1 AND status <> ?2 {ORDER_BY_DATE}"),
            params![CANCELADO, FINALIZADO],
        )
    }

    /// Entries whose status matches `status` byte for byte, oldest date first.
    pub fn list_by_status(&self, status: &str) -> Result<Vec<ChecklistEntry>> {
        self.query_entries(
            "list checklist entries by status",
            &format!("{SELECT_ENTRY} WHERE status = ?1 {ORDER_BY_DATE}"),
            params![status],
        )
    }

    /// Look up a single entry by id. `None` means the row does not exist,
    /// which is how callers confirm that an update or delete landed where
    /// they expected.
    pub fn get(&self, id: i64) -> Result<Option<ChecklistEntry>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("{SELECT_ENTRY} WHERE idChecklist = ?1"),
            params![id],
            map_entry,
        )
        .optional()
        .map_err(StoreError::statement("load checklist entry"))
    }

    /// Overwrite every editable field of the row carrying `entry.id`.
    pub fn update(&self, entry: &ChecklistEntry) -> Result<WriteOutcome> {
        entry.validate()?;
        let conn = self.connect()?;
        let updated = conn
            .execute(
                "UPDATE checklist
                 SET cliente = ?1, empresa = ?2, status = ?3, descricao = ?4, data = ?5
                 WHERE idChecklist = ?6",
                params![
                    entry.client,
                    entry.company,
                    entry.status,
                    entry.description,
                    entry.date,
                    entry.id
                ],
            )
            .map_err(StoreError::statement("update checklist entry"))?;

        let outcome = WriteOutcome::from_affected(updated);
        match outcome {
            WriteOutcome::Applied => tracing::info!(id = entry.id, "checklist entry updated"),
            WriteOutcome::NotFound => {
                tracing::warn!(id = entry.id, "no checklist entry to update")
            }
        }
        Ok(outcome)
    }

    /// Remove the row carrying `id`. A missing row is reported as
    /// [`WriteOutcome::NotFound`] rather than an error so the caller can tell
    /// "nothing to delete" apart from a failed statement.
    pub fn delete(&self, id: i64) -> Result<WriteOutcome> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM checklist WHERE idChecklist = ?1", params![id])
            .map_err(StoreError::statement("delete checklist entry"))?;

        let outcome = WriteOutcome::from_affected(deleted);
        match outcome {
            WriteOutcome::Applied => tracing::info!(id, "checklist entry deleted"),
            WriteOutcome::NotFound => tracing::warn!(id, "no checklist entry to delete"),
        }
        Ok(outcome)
    }

    fn query_entries<P: Params>(
        &self,
        operation: &'static str,
        sql: &str,
        params: P,
    ) -> Result<Vec<ChecklistEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(StoreError::statement(operation))?;

        let entries = stmt
            .query_map(params, map_entry)
            .map_err(StoreError::statement(operation))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::statement(operation))?;

        tracing::debug!(rows = entries.len(), "{operation}");
        Ok(entries)
    }
}

/// Turn a row selected with [`SELECT_ENTRY`]'s column order into an entry.
pub(crate) fn map_entry(row: &Row<'_>) -> rusqlite::Result<ChecklistEntry> {
    Ok(ChecklistEntry {
        id: row.get(0)?,
        client: row.get(1)?,
        company: row.get(2)?,
        status: row.get(3)?,
        description: row.get(4)?,
        date: read_date(row, 5)?,
    })
}

/// Dates are written as `YYYY-MM-DD`, but rows written over JDBC hold epoch
/// milliseconds of local midnight instead. Those are rounded to the nearest
/// UTC midnight, which recovers the calendar day for offsets up to twelve
/// hours either side of UTC.
fn read_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    match row.get_ref(idx)? {
        ValueRef::Integer(millis) => millis
            .checked_add(DAY_MILLIS / 2)
            .and_then(|shifted| {
                DateTime::from_timestamp(shifted.div_euclid(DAY_MILLIS) * 86_400, 0)
            })
            .map(|datetime| datetime.date_naive())
            .ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    Type::Integer,
                    Box::new(FromSqlError::OutOfRange(millis)),
                )
            }),
        _ => row.get(idx),
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    fn decode(value: &str) -> rusqlite::Result<NaiveDate> {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row(&format!("SELECT {value}"), [], |row| read_date(row, 0))
    }

    #[test]
    fn reads_iso_text_dates() {
        assert_eq!(
            decode("'2024-03-15'").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn reads_epoch_millisecond_dates() {
        // 2024-01-01T00:00:00Z
        assert_eq!(
            decode("1704067200000").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn legacy_dates_round_to_the_local_calendar_day() {
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        // Local midnight at UTC+3, i.e. 2023-12-31T21:00:00Z.
        assert_eq!(decode("1704056400000").unwrap(), new_year);
        // Local midnight at UTC-3, i.e. 2024-01-01T03:00:00Z.
        assert_eq!(decode("1704078000000").unwrap(), new_year);
    }

    #[test]
    fn rejects_unparseable_dates() {
        assert!(decode("'yesterday'").is_err());
        assert!(decode("NULL").is_err());
    }

    #[test]
    fn outcome_from_affected_rows() {
        assert_eq!(WriteOutcome::from_affected(0), WriteOutcome::NotFound);
        assert!(WriteOutcome::from_affected(1).is_applied());
    }
}
