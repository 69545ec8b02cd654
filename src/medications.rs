//! Medication tracker — backend types and repository functions.
//!
//! Medications are independent records with one or more daily reminder
//! times; the reminder schedule is derived from them (see `reminders`).

use chrono::Local;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::medication::ReminderTime;

// ═══════════════════════════════════════════
// View types — serialised to frontend
// ═══════════════════════════════════════════

/// Input for adding a medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub times: Vec<ReminderTime>,
}

/// Stored medication for list display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMedication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub times: Vec<ReminderTime>,
    pub created_at: String,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

/// Adds a medication with its reminder times. Returns the generated UUID.
pub fn add_medication(conn: &Connection, input: &MedicationInput) -> Result<Uuid, DatabaseError> {
    if input.times.is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "At least one reminder time is required".into(),
        ));
    }
    for time in &input.times {
        if !time.is_valid() {
            return Err(DatabaseError::ConstraintViolation(format!(
                "Invalid reminder time: {}:{}",
                time.hour, time.minute
            )));
        }
    }

    let medication_id = Uuid::new_v4();
    let now = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    conn.execute(
        "INSERT INTO medications (id, name, dosage, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![medication_id.to_string(), input.name, input.dosage, now],
    )?;

    for time in &input.times {
        conn.execute(
            "INSERT INTO medication_times (id, medication_id, hour, minute)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                Uuid::new_v4().to_string(),
                medication_id.to_string(),
                time.hour as i32,
                time.minute as i32,
            ],
        )?;
    }

    Ok(medication_id)
}

/// Fetches all medications with their reminder times, newest first.
/// Times are sorted chronologically within each medication.
pub fn fetch_medications(conn: &Connection) -> Result<Vec<StoredMedication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dosage, created_at
         FROM medications
         ORDER BY created_at DESC, name ASC",
    )?;
    let mut medications = stmt
        .query_map([], |row| {
            Ok(StoredMedication {
                id: row.get(0)?,
                name: row.get(1)?,
                dosage: row.get(2)?,
                times: Vec::new(), // filled below
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut time_stmt = conn.prepare(
        "SELECT hour, minute
         FROM medication_times
         WHERE medication_id = ?1
         ORDER BY hour ASC, minute ASC",
    )?;
    for medication in medications.iter_mut() {
        medication.times = time_stmt
            .query_map(params![medication.id], |row| {
                Ok(ReminderTime {
                    hour: row.get::<_, i32>(0)? as u8,
                    minute: row.get::<_, i32>(1)? as u8,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
    }

    Ok(medications)
}

/// Hard-deletes a medication; its reminder times cascade.
pub fn delete_medication(conn: &Connection, medication_id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM medications WHERE id = ?1",
        params![medication_id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Medication".into(),
            id: medication_id.to_string(),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
