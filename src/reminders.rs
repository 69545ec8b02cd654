//! Medication reminders — schedule computation and dispatch.
//!
//! The schedule is derived, never edited: `ReminderSchedule::rebuild`
//! drops every pending entry and re-derives one entry per medication per
//! reminder time, repeating daily at hour:minute. Rebuilt on startup and
//! after every medication mutation.
//!
//! Delivery sits behind `NotificationSink`; the platform notification
//! layer is out of scope, so the default sink writes to the log. Sink
//! failures are logged and skipped, they never abort a dispatch round.

use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::medication::ReminderTime;

/// One pending reminder: a medication at one of its daily times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderEntry {
    pub medication_id: String,
    pub name: String,
    pub dosage: String,
    pub time: ReminderTime,
}

/// A reminder paired with its next concrete fire time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingReminder {
    pub medication_id: String,
    pub name: String,
    pub dosage: String,
    pub time: ReminderTime,
    pub fire_at: NaiveDateTime,
}

/// The full pending reminder set, one entry per medication × time.
#[derive(Debug, Clone, Default)]
pub struct ReminderSchedule {
    entries: Vec<ReminderEntry>,
}

impl ReminderSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Clear-and-rebuild: discards all pending entries and re-derives the
    /// schedule from the current medication list.
    pub fn rebuild(conn: &Connection) -> Result<Self, DatabaseError> {
        let mut stmt = conn.prepare(
            "SELECT m.id, m.name, m.dosage, t.hour, t.minute
             FROM medications m
             JOIN medication_times t ON t.medication_id = m.id
             ORDER BY t.hour ASC, t.minute ASC, m.name ASC",
        )?;
        let entries = stmt
            .query_map([], |row| {
                Ok(ReminderEntry {
                    medication_id: row.get(0)?,
                    name: row.get(1)?,
                    dosage: row.get(2)?,
                    time: ReminderTime {
                        hour: row.get::<_, i32>(3)? as u8,
                        minute: row.get::<_, i32>(4)? as u8,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ReminderEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries with an occurrence in the half-open window (start, end].
    pub fn due_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&ReminderEntry> {
        self.entries
            .iter()
            .filter(|entry| next_occurrence(entry.time, start) <= end)
            .collect()
    }

    /// The next `limit` reminders after `now`, soonest first.
    pub fn upcoming(&self, now: NaiveDateTime, limit: usize) -> Vec<UpcomingReminder> {
        let mut upcoming: Vec<UpcomingReminder> = self
            .entries
            .iter()
            .map(|entry| UpcomingReminder {
                medication_id: entry.medication_id.clone(),
                name: entry.name.clone(),
                dosage: entry.dosage.clone(),
                time: entry.time,
                fire_at: next_occurrence(entry.time, now),
            })
            .collect();
        upcoming.sort_by_key(|r| r.fire_at);
        upcoming.truncate(limit);
        upcoming
    }
}

/// The first occurrence of a daily hour:minute strictly after `after`.
pub fn next_occurrence(time: ReminderTime, after: NaiveDateTime) -> NaiveDateTime {
    let today = after
        .date()
        .and_hms_opt(time.hour as u32, time.minute as u32, 0)
        .unwrap_or(after);
    if today > after {
        today
    } else {
        today + Duration::days(1)
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Delivery seam for reminder notifications.
pub trait NotificationSink {
    fn deliver(&self, entry: &ReminderEntry, fire_at: NaiveDateTime) -> Result<(), NotifyError>;
}

/// Default sink: writes the reminder to the log.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, entry: &ReminderEntry, fire_at: NaiveDateTime) -> Result<(), NotifyError> {
        tracing::info!(
            medication = %entry.name,
            dosage = %entry.dosage,
            time = %entry.time,
            %fire_at,
            "Medication reminder: time to take {} - {}",
            entry.name,
            entry.dosage
        );
        Ok(())
    }
}

/// Delivers every reminder due in (start, end] to the sink. Failures are
/// logged only; returns the number delivered.
pub fn dispatch_due(
    schedule: &ReminderSchedule,
    sink: &dyn NotificationSink,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> usize {
    let mut delivered = 0;
    for entry in schedule.due_between(start, end) {
        let fire_at = next_occurrence(entry.time, start);
        match sink.deliver(entry, fire_at) {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::warn!(medication = %entry.name, "Failed to deliver reminder: {e}");
            }
        }
    }
    delivered
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
