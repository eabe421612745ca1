//! Game settings and balance
//!
//! Loaded from a JSON file next to the binary; every field has a default so
//! partial files work.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Difficulty schedule applied each time a wave spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    /// Objects in the first wave
    pub initial_per_wave: u32,
    /// Objects added to a wave every `per_wave_interval` waves
    pub per_wave_step: u32,
    pub per_wave_interval: u32,
    pub max_per_wave: u32,

    /// Fall speed of the first wave (pixels/tick)
    pub initial_speed: f32,
    /// Added to the wave speed on every spawn, uncapped
    pub speed_step: f32,

    pub initial_pest_probability: f32,
    pub pest_probability_step: f32,
    pub max_pest_probability: f32,

    /// Chance that a non-pest object is a flower
    pub flower_chance: f32,
    /// Pests fall this much faster than the wave speed, straight down
    pub pest_speed_multiplier: f32,
    /// Fruit/flower heading cone, degrees from +x (screen y points down)
    pub cone_min_degrees: f32,
    pub cone_max_degrees: f32,
    /// Spin is drawn uniformly from [-max, +max) degrees/tick
    pub max_rotation_speed: f32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            initial_per_wave: 3,
            per_wave_step: 2,
            per_wave_interval: 3,
            max_per_wave: 8,

            initial_speed: 20.0,
            speed_step: 2.5,

            initial_pest_probability: 0.15,
            pest_probability_step: 0.002,
            max_pest_probability: 0.5,

            flower_chance: 0.10,
            pest_speed_multiplier: 1.5,
            cone_min_degrees: 45.0,
            cone_max_degrees: 135.0,
            max_rotation_speed: 5.0,
        }
    }
}

/// Volume preferences handed to the audio layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tick period in milliseconds
    pub tick_ms: u64,
    /// Session length in milliseconds
    pub session_duration_ms: u64,
    pub starting_lives: i32,
    /// Object diameter in pixels
    pub object_size: f32,
    /// Extra tap radius around each object
    pub tap_buffer: f32,
    /// Dragging a finger across objects taps them too
    pub drag_taps: bool,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    pub difficulty: DifficultySettings,
    pub audio: AudioSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            session_duration_ms: SESSION_DURATION_MS,
            starting_lives: STARTING_LIVES,
            object_size: OBJECT_SIZE,
            tap_buffer: TAP_BUFFER,
            drag_taps: true,
            seed: None,
            difficulty: DifficultySettings::default(),
            audio: AudioSettings::default(),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "fruit_tap.json";

    /// Tick period as a `Duration` (never zero)
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
