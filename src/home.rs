//! Dashboard — types and a single-fetch aggregation for the home screen.

use chrono::{Duration, NaiveDateTime};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;
use crate::games::tapping;
use crate::models::screening::ScreeningRecord;
use crate::reminders::{ReminderSchedule, UpcomingReminder};
use crate::screening;

/// Mood widget data: today's status plus a 7-day strip ending today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSummary {
    pub logged_today: bool,
    pub entry_count: u32,
    /// One cell per day, oldest first, today last.
    pub last_seven_days: Vec<Option<u8>>,
}

/// Medication widget data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationSummary {
    pub total: u32,
    pub next_reminder: Option<UpcomingReminder>,
}

/// Home screen data — single fetch for all dashboard widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub mood: MoodSummary,
    pub medications: MedicationSummary,
    pub latest_screening: Option<ScreeningRecord>,
    pub tapping_high_score: u32,
}

/// Fetches all dashboard widgets in one pass.
pub fn fetch_dashboard(
    conn: &Connection,
    schedule: &ReminderSchedule,
    now: NaiveDateTime,
) -> Result<DashboardData, DatabaseError> {
    let today = now.date();

    let entry_count: u32 = conn.query_row("SELECT COUNT(*) FROM mood_entries", [], |row| {
        row.get(0)
    })?;

    let window_start = today - Duration::days(6);
    let mut stmt = conn.prepare(
        "SELECT entry_date, mood FROM mood_entries
         WHERE entry_date >= ?1 AND entry_date <= ?2",
    )?;
    let recent: Vec<(String, u8)> = stmt
        .query_map(params![window_start.to_string(), today.to_string()], |row| {
            Ok((row.get(0)?, row.get::<_, i32>(1)? as u8))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let last_seven_days: Vec<Option<u8>> = (0..7)
        .map(|offset| {
            let day = (window_start + Duration::days(offset)).to_string();
            recent.iter().find(|(d, _)| *d == day).map(|(_, m)| *m)
        })
        .collect();
    let logged_today = last_seven_days[6].is_some();

    let total_medications: u32 =
        conn.query_row("SELECT COUNT(*) FROM medications", [], |row| row.get(0))?;

    Ok(DashboardData {
        mood: MoodSummary {
            logged_today,
            entry_count,
            last_seven_days,
        },
        medications: MedicationSummary {
            total: total_medications,
            next_reminder: schedule.upcoming(now, 1).into_iter().next(),
        },
        latest_screening: screening::latest(conn)?,
        tapping_high_score: tapping::load_high_score(conn)?,
    })
}
