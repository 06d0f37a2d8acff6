//! Daily attendance register.
//!
//! The register is rebuilt from the student list every session with everyone
//! present. Committing appends a date-stamped copy to the ledger slot; the
//! ledger is never read back into the register.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{AttendanceRecord, AttendanceStatus, Student};
use crate::storage::{self, keys, KeyValueStore};

/// One committed day of the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The day the register was taken.
    pub date: NaiveDate,
    /// The register as committed.
    pub records: Vec<AttendanceRecord>,
}

/// The in-memory register for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceRegister {
    records: Vec<AttendanceRecord>,
}

impl AttendanceRegister {
    /// Build a register with every student present, in list order.
    #[must_use]
    pub fn from_students(students: &[Student]) -> Self {
        let records = students
            .iter()
            .map(|s| AttendanceRecord {
                student_id: s.id.clone(),
                student_name: s.name.clone(),
                status: AttendanceStatus::Present,
            })
            .collect();
        Self { records }
    }

    /// Rebuild a register from committed rows.
    #[must_use]
    pub fn from_records(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }

    /// The register rows.
    #[must_use]
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Flip one student between present and absent. Late becomes present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the student is not on the register.
    pub fn toggle(&mut self, student_id: &str) -> Result<AttendanceStatus> {
        let record = self.record_mut(student_id)?;
        record.status = record.status.toggled();
        debug!("Toggled {} to {}", student_id, record.status);
        Ok(record.status)
    }

    /// Set one student's status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the student is not on the register.
    pub fn set_status(&mut self, student_id: &str, status: AttendanceStatus) -> Result<()> {
        self.record_mut(student_id)?.status = status;
        Ok(())
    }

    /// Mark every student present.
    pub fn mark_all_present(&mut self) {
        for record in &mut self.records {
            record.status = AttendanceStatus::Present;
        }
    }

    /// Number of students marked present.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.count(AttendanceStatus::Present)
    }

    /// Number of students with `status`.
    #[must_use]
    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Present students as a rounded percentage; 0 for an empty register.
    #[must_use]
    pub fn rate(&self) -> u32 {
        let total = self.records.len();
        if total == 0 {
            return 0;
        }
        // half rounds up
        let scaled = self.present_count() * 200 / total;
        u32::try_from(scaled.div_ceil(2)).unwrap_or(100)
    }

    /// Append this register to the ledger under `date`, replacing any entry
    /// already recorded for that day.
    ///
    /// An unreadable ledger is left as it is rather than replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the stored ledger cannot be read,
    /// or [`Error::StorageWrite`] if it cannot be written.
    pub fn commit(&self, store: &dyn KeyValueStore, date: NaiveDate) -> Result<()> {
        let mut ledger: Vec<LedgerEntry> =
            storage::adapter::try_load(store, keys::ATTENDANCE_LEDGER)?.unwrap_or_default();
        ledger.retain(|entry| entry.date != date);
        ledger.push(LedgerEntry {
            date,
            records: self.records.clone(),
        });
        ledger.sort_by_key(|entry| entry.date);

        storage::save(store, keys::ATTENDANCE_LEDGER, &ledger)?;
        info!(
            "Committed attendance for {} ({}% present)",
            date,
            self.rate()
        );
        Ok(())
    }

    fn record_mut(&mut self, student_id: &str) -> Result<&mut AttendanceRecord> {
        self.records
            .iter_mut()
            .find(|r| r.student_id == student_id)
            .ok_or_else(|| Error::not_found("student", student_id))
    }
}

/// Read the committed ledger, oldest first. Unreadable ledgers read as empty.
#[must_use]
pub fn load_ledger(store: &dyn KeyValueStore) -> Vec<LedgerEntry> {
    storage::load(store, keys::ATTENDANCE_LEDGER, Vec::new())
}
