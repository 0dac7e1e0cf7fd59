// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// On-device history of confirmed bookings, backed by SQLite.
//
// Each booking is stored as its canonical JSON together with the SHA-256
// of that JSON. Reads re-hash the payload and reject rows whose digest no
// longer matches.

use std::path::Path;

use chrono::SecondsFormat;
use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::BookingId;
use rusqlite::{Connection, params};
use tracing::{debug, info, instrument};

use crate::integrity;
use crate::wizard::ConfirmedBooking;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        confirmed_at TEXT NOT NULL,
        walk_type TEXT NOT NULL,
        duration_minutes INTEGER NOT NULL,
        final_price INTEGER NOT NULL,
        payload TEXT NOT NULL,
        fingerprint TEXT NOT NULL
    )
"#;

/// Confirmed bookings kept on the device.
pub struct BookingHistory {
    conn: Connection,
}

impl BookingHistory {
    /// Open (or create) the history database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| PetmilyError::Database(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| PetmilyError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| PetmilyError::Database(format!("create table: {e}")))?;

        info!("booking history opened");
        Ok(Self { conn })
    }

    /// In-memory history, for tests and when history is disabled.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PetmilyError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| PetmilyError::Database(format!("create table: {e}")))?;

        debug!("in-memory booking history opened");
        Ok(Self { conn })
    }

    /// Store a confirmed booking. Returns its fingerprint.
    #[instrument(skip(self, booking), fields(booking_id = %booking.id()))]
    pub fn record(&self, booking: &ConfirmedBooking) -> Result<String> {
        let payload = booking.to_json()?;
        let digest = integrity::fingerprint(payload.as_bytes());
        let pricing = booking.pricing();
        let draft = booking.draft();
        let final_price = i64::try_from(pricing.final_price)
            .map_err(|e| PetmilyError::Database(format!("final price out of range: {e}")))?;

        self.conn
            .execute(
                "INSERT INTO bookings (id, confirmed_at, walk_type, duration_minutes,
                 final_price, payload, fingerprint)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    booking.id().to_string(),
                    booking.confirmed_at().to_rfc3339_opts(SecondsFormat::Micros, true),
                    draft.walk_type.as_str(),
                    draft.duration_minutes,
                    final_price,
                    payload,
                    digest,
                ],
            )
            .map_err(|e| PetmilyError::Database(format!("insert booking: {e}")))?;

        info!(final_price = pricing.final_price, "booking recorded");
        Ok(digest)
    }

    /// One booking by id, verified against its stored fingerprint.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub fn get(&self, id: &BookingId) -> Result<Option<ConfirmedBooking>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload, fingerprint FROM bookings WHERE id = ?1")
            .map_err(|e| PetmilyError::Database(format!("prepare get: {e}")))?;

        let mut rows = stmt
            .query_map(params![id.to_string()], row_to_stored)
            .map_err(|e| PetmilyError::Database(format!("query get: {e}")))?;

        match rows.next() {
            Some(Ok(stored)) => stored.verify().map(Some),
            Some(Err(e)) => Err(PetmilyError::Database(format!("row parse: {e}"))),
            None => Ok(None),
        }
    }

    /// Every stored booking, newest first.
    #[instrument(skip(self))]
    pub fn all(&self) -> Result<Vec<ConfirmedBooking>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload, fingerprint FROM bookings ORDER BY confirmed_at DESC")
            .map_err(|e| PetmilyError::Database(format!("prepare all: {e}")))?;

        let stored = stmt
            .query_map([], row_to_stored)
            .map_err(|e| PetmilyError::Database(format!("query all: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PetmilyError::Database(format!("collect rows: {e}")))?;

        let bookings = stored
            .into_iter()
            .map(StoredBooking::verify)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = bookings.len(), "retrieved booking history");
        Ok(bookings)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
            .map_err(|e| PetmilyError::Database(format!("count: {e}")))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    /// Remove one booking. Removing a missing id is not an error.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub fn delete(&self, id: &BookingId) -> Result<()> {
        self.conn
            .execute("DELETE FROM bookings WHERE id = ?1", params![id.to_string()])
            .map_err(|e| PetmilyError::Database(format!("delete booking: {e}")))?;
        info!("booking removed from history");
        Ok(())
    }
}

struct StoredBooking {
    payload: String,
    fingerprint: String,
}

impl StoredBooking {
    fn verify(self) -> Result<ConfirmedBooking> {
        integrity::verify(self.payload.as_bytes(), &self.fingerprint)?;
        Ok(serde_json::from_str(&self.payload)?)
    }
}

fn row_to_stored(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredBooking> {
    Ok(StoredBooking {
        payload: row.get(0)?,
        fingerprint: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountTable;
    use crate::draft::{BookingDraft, DraftUpdate};
    use crate::pricing::PricingEngine;
    use crate::wizard::WizardController;
    use petmily_core::config::AppConfig;
    use petmily_core::types::WalkType;

    fn confirmed(minutes: u32, walk_type: WalkType) -> ConfirmedBooking {
        let mut wizard = WizardController::new(&AppConfig::default());
        wizard
            .update(
                DraftUpdate::new()
                    .with_duration(minutes)
                    .with_walk_type(walk_type)
                    .with_insurance_agreed(true),
            )
            .expect("update");
        wizard.finalize().expect("finalize")
    }

    #[test]
    fn record_and_read_back() {
        let history = BookingHistory::open_in_memory().expect("open in-memory db");
        let booking = confirmed(60, WalkType::Package);
        let digest = history.record(&booking).expect("record");
        assert_eq!(digest, booking.fingerprint().expect("fingerprint"));

        let read = history.get(&booking.id()).expect("get").expect("found");
        assert_eq!(read, booking);
        assert_eq!(read.pricing().final_price, 22_500);
    }

    #[test]
    fn price_beyond_sqlite_integer_is_rejected() {
        let config = AppConfig::default();
        let engine = PricingEngine::new(
            vec![(60, u64::MAX)],
            DiscountTable::new(Vec::<(WalkType, u32)>::new()).expect("table"),
        )
        .expect("engine");
        let mut wizard = WizardController::with_draft(&config, engine, BookingDraft::new(&config));
        wizard
            .update(
                DraftUpdate::new()
                    .with_duration(60)
                    .with_walk_type(WalkType::Single)
                    .with_insurance_agreed(true),
            )
            .expect("update");
        let booking = wizard.finalize().expect("finalize");

        let history = BookingHistory::open_in_memory().expect("open in-memory db");
        assert!(matches!(
            history.record(&booking),
            Err(PetmilyError::Database(msg)) if msg.contains("out of range")
        ));
        assert_eq!(history.count().expect("count"), 0);
    }

    #[test]
    fn missing_booking_is_none() {
        let history = BookingHistory::open_in_memory().expect("open in-memory db");
        assert!(history.get(&BookingId::new()).expect("get").is_none());
    }

    #[test]
    fn tampered_row_fails_verification() {
        let history = BookingHistory::open_in_memory().expect("open in-memory db");
        let booking = confirmed(30, WalkType::Single);
        history.record(&booking).expect("record");
        history
            .conn
            .execute(
                "UPDATE bookings SET payload = replace(payload, '15000', '1500')",
                [],
            )
            .expect("tamper");
        assert!(matches!(
            history.get(&booking.id()),
            Err(PetmilyError::IntegrityMismatch { .. })
        ));
    }

    #[test]
    fn all_lists_newest_first_and_delete_removes() {
        let history = BookingHistory::open_in_memory().expect("open in-memory db");
        let first = confirmed(30, WalkType::Single);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = confirmed(90, WalkType::Package);
        history.record(&first).expect("record");
        history.record(&second).expect("record");

        let ids: Vec<BookingId> = history.all().expect("all").iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec![second.id(), first.id()]);

        history.delete(&first.id()).expect("delete");
        history.delete(&first.id()).expect("delete twice");
        assert_eq!(history.count().expect("count"), 1);
    }

    #[test]
    fn file_backed_history_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.db");
        let booking = confirmed(90, WalkType::Single);
        {
            let history = BookingHistory::open(&path).expect("open");
            history.record(&booking).expect("record");
        }
        let history = BookingHistory::open(&path).expect("reopen");
        assert_eq!(history.all().expect("all"), vec![booking]);
    }
}
