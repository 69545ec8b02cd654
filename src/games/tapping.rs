//! Falling-dot tapping game engine.
//!
//! Pure state machine driven by the frontend's timer: dots spawn at the
//! top at a random x, fall a fixed step per tick, and are removed when
//! tapped. A dot crossing the bottom edge ends the game. Dots fall
//! faster and spawn quicker as the score grows. Pausing stops the
//! tick/spawn chain; the high score lives in the preferences table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DatabaseError;

pub const DOT_MIN_SIZE: f64 = 40.0;
pub const DOT_MAX_SIZE: f64 = 100.0;
/// Dots spawn at least this far from the side edges.
pub const SPAWN_MARGIN: f64 = 50.0;

/// Fall step per tick, before the score bonus.
pub const BASE_SPEED: f64 = 2.0;
pub const SPEED_PER_POINT: f64 = 0.005;

/// Spawn interval shrinks with the score, down to a floor.
pub const SPAWN_BASE_SECS: f64 = 0.8;
pub const SPAWN_DECAY_SECS: f64 = 0.02;
pub const SPAWN_MIN_SECS: f64 = 0.3;

/// Tick period the movement loop is tuned for.
pub const TICK_SECS: f64 = 0.03;

const HIGH_SCORE_KEY: &str = "tapping_high_score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Ready,
    Running,
    Paused,
    Over,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dot {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
}

pub struct TappingGame {
    width: f64,
    height: f64,
    phase: GamePhase,
    score: u32,
    dots: Vec<Dot>,
    rng: StdRng,
}

impl TappingGame {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f64, height: f64, rng: StdRng) -> Self {
        Self {
            width,
            height,
            phase: GamePhase::Ready,
            score: 0,
            dots: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Resets and starts a fresh round with one spawned dot.
    pub fn start(&mut self) {
        self.score = 0;
        self.dots.clear();
        self.phase = GamePhase::Running;
        self.spawn_dot();
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Seconds until the next spawn at the current score.
    pub fn spawn_interval(&self) -> f64 {
        (SPAWN_BASE_SECS - f64::from(self.score) * SPAWN_DECAY_SECS).max(SPAWN_MIN_SECS)
    }

    /// Fall step at the current score.
    pub fn dot_speed(&self) -> f64 {
        BASE_SPEED + f64::from(self.score) * SPEED_PER_POINT
    }

    /// Spawns one dot above the field. No-op unless running.
    pub fn spawn_dot(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let x_max = (self.width - SPAWN_MARGIN).max(SPAWN_MARGIN + 1.0);
        let dot = Dot {
            id: Uuid::new_v4(),
            x: self.rng.gen_range(SPAWN_MARGIN..x_max),
            y: 0.0,
            size: self.rng.gen_range(DOT_MIN_SIZE..=DOT_MAX_SIZE),
            speed: self.dot_speed(),
        };
        self.dots.push(dot);
    }

    /// Advances every dot one step. Returns true when a dot crossed the
    /// bottom edge and ended the game.
    pub fn tick(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        for dot in self.dots.iter_mut() {
            dot.y += dot.speed;
        }
        let height = self.height;
        let escaped = self.dots.iter().any(|d| d.y > height);
        if escaped {
            self.dots.retain(|d| d.y <= height);
            self.phase = GamePhase::Over;
        }
        escaped
    }

    /// Pops a dot; scores a point when it was still on the field.
    pub fn tap(&mut self, dot_id: Uuid) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let before = self.dots.len();
        self.dots.retain(|d| d.id != dot_id);
        let hit = self.dots.len() < before;
        if hit {
            self.score += 1;
        }
        hit
    }
}

// ═══════════════════════════════════════════
// High score persistence
// ═══════════════════════════════════════════

/// Loads the stored high score (0 when none recorded yet).
pub fn load_high_score(conn: &Connection) -> Result<u32, DatabaseError> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            params![HIGH_SCORE_KEY],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
}

/// Records a finished round's score; keeps the stored high score if it
/// is still higher. Returns the current high score.
pub fn record_score(conn: &Connection, score: u32) -> Result<u32, DatabaseError> {
    let current = load_high_score(conn)?;
    if score > current {
        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![HIGH_SCORE_KEY, score.to_string()],
        )?;
        return Ok(score);
    }
    Ok(current)
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
