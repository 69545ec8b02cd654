//! Shared application state.
//!
//! One `AppState` is built at startup, wrapped in `Arc`, and shared by
//! the API handlers and the reminder dispatch loop. Handlers open a
//! fresh SQLite connection per request; the reminder schedule lives
//! behind an `RwLock` and is rebuilt after every medication mutation.

use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

use crate::classifier::{ModelRegistry, RiskModel};
use crate::db::{self, DatabaseError};
use crate::models::enums::TestKind;
use crate::reminders::ReminderSchedule;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Internal lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub struct AppState {
    db_path: PathBuf,
    schedule: RwLock<ReminderSchedule>,
    models: ModelRegistry,
}

impl AppState {
    pub fn new(db_path: PathBuf, models: ModelRegistry) -> Self {
        Self {
            db_path,
            schedule: RwLock::new(ReminderSchedule::empty()),
            models,
        }
    }

    /// Open a database connection. Most common operation in handlers.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }

    /// The risk classifier for one test kind.
    pub fn model_for(&self, kind: TestKind) -> &dyn RiskModel {
        self.models.for_kind(kind)
    }

    /// Snapshot of the current reminder schedule.
    pub fn schedule(&self) -> Result<ReminderSchedule, CoreError> {
        let guard = self.schedule.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Clear-and-rebuild the reminder schedule from the medication list.
    /// Returns the number of pending entries.
    pub fn rebuild_reminders(&self) -> Result<usize, CoreError> {
        let conn = self.open_db()?;
        let rebuilt = ReminderSchedule::rebuild(&conn)?;
        let count = rebuilt.len();
        let mut guard = self.schedule.write().map_err(|_| CoreError::LockPoisoned)?;
        *guard = rebuilt;
        tracing::debug!(pending = count, "Reminder schedule rebuilt");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FixedScoreModel;
    use crate::medications::{add_medication, MedicationInput};
    use crate::models::medication::ReminderTime;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("chiron.db");
        // Run migrations up front so handlers see a ready schema.
        db::open_database(&db_path).unwrap();
        let models = ModelRegistry::new(
            Box::new(FixedScoreModel::new(0.9)),
            Box::new(FixedScoreModel::new(0.1)),
        );
        (AppState::new(db_path, models), dir)
    }

    #[test]
    fn schedule_starts_empty_and_rebuilds() {
        let (state, _dir) = test_state();
        assert!(state.schedule().unwrap().is_empty());

        let conn = state.open_db().unwrap();
        add_medication(
            &conn,
            &MedicationInput {
                name: "Levodopa".into(),
                dosage: "100mg".into(),
                times: vec![
                    ReminderTime { hour: 8, minute: 0 },
                    ReminderTime { hour: 20, minute: 0 },
                ],
            },
        )
        .unwrap();

        assert_eq!(state.rebuild_reminders().unwrap(), 2);
        assert_eq!(state.schedule().unwrap().len(), 2);
    }

    #[test]
    fn model_registry_routes_by_kind() {
        let (state, _dir) = test_state();
        let raster = crate::screening::rasterize(&crate::screening::Drawing { strokes: vec![] });
        assert_eq!(
            state.model_for(TestKind::Spiral).predict(&raster).unwrap(),
            0.9
        );
        assert_eq!(
            state.model_for(TestKind::Wave).predict(&raster).unwrap(),
            0.1
        );
    }
}
