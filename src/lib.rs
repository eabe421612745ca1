//! Fruit Tap - a falling-fruit tap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (objects, collisions, waves, tick)
//! - `session`: Session controller with injected collaborators
//! - `platform`: Native tick driver
//! - `persistence`: JSON high-score file
//! - `settings`: Data-driven game balance and preferences

pub mod assets;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioManager, AudioNotifier};
pub use error::Error;
pub use highscores::{HighScoreStore, MemoryHighScore};
pub use session::{Collaborators, GameSummary, Presenter, Session, SessionHandle};
pub use settings::{DifficultySettings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed tick period in milliseconds
    pub const TICK_MS: u64 = 50;
    /// Session length (2 minutes)
    pub const SESSION_DURATION_MS: u64 = 2 * 60 * 1000;
    pub const STARTING_LIVES: i32 = 3;

    /// Object box side length (diameter) in pixels
    pub const OBJECT_SIZE: f32 = 150.0;
    /// Touch forgiveness margin around an object's circle
    pub const TAP_BUFFER: f32 = 10.0;

    pub const FRUIT_POINTS: u32 = 1;
    pub const FLOWER_POINTS: u32 = 5;

    /// Image variants shipped per category
    pub const FRUIT_VARIANTS: usize = 8;
    pub const FLOWER_VARIANTS: usize = 3;
    pub const PEST_VARIANTS: usize = 3;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Unit direction for an angle in degrees measured from +x, with +y pointing down the screen
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
