//! Mood journal — backend types and repository functions.
//!
//! View types for the daily mood journal (recording, history, calendar
//! month grid), plus query functions over the mood_entries table. One
//! entry per calendar day; recording replaces any existing entry for
//! that day.

use chrono::{Datelike, Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::Mood;

// ═══════════════════════════════════════════
// Constants — symptom tag vocabulary
// ═══════════════════════════════════════════

pub const SYMPTOM_TAGS: &[&str] = &[
    "Tremors",
    "Stiffness",
    "Fatigue",
    "Headache",
    "Dizziness",
    "Nausea",
    "Anxiety",
    "Brain Fog",
    "Joint Pain",
    "Weakness",
];

// ═══════════════════════════════════════════
// View types — serialised to frontend
// ═══════════════════════════════════════════

/// Input for recording a mood entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntryInput {
    pub date: String, // YYYY-MM-DD
    pub mood: u8,     // 0 (very sad) .. 4 (very happy)
    pub notes: String,
    pub symptoms: Vec<String>,
}

/// Stored mood entry for history and detail display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMoodEntry {
    pub id: String,
    pub date: String,
    pub mood: u8,
    pub mood_label: String,
    pub notes: String,
    pub symptoms: Vec<String>,
    pub recorded_at: String,
}

/// One cell of the calendar month grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: String,
    pub mood: Option<u8>,
    /// Future days cannot be selected yet.
    pub locked: bool,
}

/// Calendar month view data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

/// Records a mood entry for a day, replacing any existing entry for that
/// day. Returns the generated UUID.
pub fn record_mood(conn: &Connection, input: &MoodEntryInput) -> Result<Uuid, DatabaseError> {
    let date = parse_date(&input.date)?;
    let mood = Mood::from_index(input.mood).ok_or_else(|| {
        DatabaseError::ConstraintViolation(format!("Mood out of range: {}", input.mood))
    })?;

    let entry_id = Uuid::new_v4();
    let now = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let symptoms_json = serde_json::to_string(&input.symptoms)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid symptoms: {e}")))?;

    // Replace semantics: drop the old entry for the day, then insert fresh.
    conn.execute(
        "DELETE FROM mood_entries WHERE entry_date = ?1",
        params![date.to_string()],
    )?;
    conn.execute(
        "INSERT INTO mood_entries (id, entry_date, mood, notes, symptoms, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry_id.to_string(),
            date.to_string(),
            mood.index() as i32,
            input.notes,
            symptoms_json,
            now,
        ],
    )?;

    Ok(entry_id)
}

/// Fetches mood history, newest day first.
pub fn fetch_entries(conn: &Connection) -> Result<Vec<StoredMoodEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, entry_date, mood, notes, symptoms, recorded_at
         FROM mood_entries
         ORDER BY entry_date DESC",
    )?;
    let rows = stmt
        .query_map([], map_entry_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Fetches the entry for one calendar day, if recorded.
pub fn fetch_entry_for_date(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Option<StoredMoodEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, entry_date, mood, notes, symptoms, recorded_at
         FROM mood_entries
         WHERE entry_date = ?1",
    )?;
    let entry = stmt
        .query_row(params![date.to_string()], map_entry_row)
        .optional()?;
    Ok(entry)
}

/// Hard-deletes the entry for one calendar day.
pub fn delete_entry(conn: &Connection, date: NaiveDate) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM mood_entries WHERE entry_date = ?1",
        params![date.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "MoodEntry".into(),
            id: date.to_string(),
        });
    }
    Ok(())
}

/// Builds the calendar grid for a month: one cell per day, carrying the
/// recorded mood ordinal if any. Days after `today` are locked.
pub fn month_view(
    conn: &Connection,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthView, DatabaseError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        DatabaseError::ConstraintViolation(format!("Invalid month: {year}-{month}"))
    })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| DatabaseError::ConstraintViolation(format!("Invalid month: {year}-{month}")))?;

    let mut stmt = conn.prepare(
        "SELECT entry_date, mood
         FROM mood_entries
         WHERE entry_date >= ?1 AND entry_date < ?2",
    )?;
    let moods: Vec<(String, u8)> = stmt
        .query_map(params![first.to_string(), next_month.to_string()], |row| {
            Ok((row.get(0)?, row.get::<_, i32>(1)? as u8))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut days = Vec::new();
    let mut date = first;
    while date < next_month {
        let date_str = date.to_string();
        let mood = moods
            .iter()
            .find(|(d, _)| *d == date_str)
            .map(|(_, m)| *m);
        days.push(CalendarDay {
            day: date.day(),
            date: date_str,
            mood,
            locked: date > today,
        });
        date = date.succ_opt().ok_or_else(|| {
            DatabaseError::ConstraintViolation("Date overflow building month view".into())
        })?;
    }

    Ok(MonthView { year, month, days })
}

fn parse_date(raw: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid date: {e}")))
}

fn map_entry_row(row: &rusqlite::Row<'_>) -> Result<StoredMoodEntry, rusqlite::Error> {
    let mood_index = row.get::<_, i32>(2)? as u8;
    let symptoms_raw: String = row.get(4)?;
    Ok(StoredMoodEntry {
        id: row.get(0)?,
        date: row.get(1)?,
        mood: mood_index,
        mood_label: Mood::from_index(mood_index)
            .map(|m| m.label().to_string())
            .unwrap_or_default(),
        notes: row.get(3)?,
        symptoms: serde_json::from_str(&symptoms_raw).unwrap_or_default(),
        recorded_at: row.get(5)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
