//! Session state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; the RNG is owned by the
//! caller so the state stays plain data.

use serde::{Deserialize, Serialize};

use super::object::{Category, MovingObject};
use super::spawner::Difficulty;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, waiting for `start`
    NotStarted,
    /// Ticking
    Running,
    /// Ran out of time or lives
    GameOver,
    /// Torn down by the host before it ended
    Aborted,
}

impl GamePhase {
    /// No further ticks or taps will be processed
    pub fn is_finished(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Aborted)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    OutOfLives,
}

/// Things that happened during a tick or tap, drained by the session controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned { wave: u32, count: u32, speed: f32 },
    /// Object removed by a tap; pests cost a life
    Tapped { category: Category, points: u32 },
    /// Object fell off the bottom; only point objects cost a life
    Escaped { category: Category, life_lost: bool },
    Ended { reason: EndReason },
}

/// Screen size in pixels, supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: i32,
    /// Ticks processed while running
    pub time_ticks: u64,
    /// Simulated milliseconds since start
    pub elapsed_ms: u64,
    pub session_duration_ms: u64,
    pub tick_ms: u64,
    pub difficulty: Difficulty,
    /// Set when the session reaches `GameOver`
    pub end_reason: Option<EndReason>,
    /// Live falling objects
    pub objects: Vec<MovingObject>,
    /// Pending events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh, not yet started state
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            lives: settings.starting_lives,
            time_ticks: 0,
            elapsed_ms: 0,
            session_duration_ms: settings.session_duration_ms,
            tick_ms: settings.tick_ms.max(1),
            difficulty: Difficulty::new(&settings.difficulty),
            end_reason: None,
            objects: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Reset all counters and enter `Running`
    pub fn begin(&mut self, settings: &Settings) {
        *self = Self::new(settings);
        self.phase = GamePhase::Running;
    }

    pub fn time_remaining_ms(&self) -> u64 {
        self.session_duration_ms.saturating_sub(self.elapsed_ms)
    }

    /// Any fruit or flower still on screen
    pub fn has_point_objects(&self) -> bool {
        self.objects.iter().any(MovingObject::is_point_object)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
