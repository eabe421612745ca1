//! Read-only view of a session handed to the presentation layer each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::object::{Category, MovingObject};
use super::state::GameState;

/// What the presenter needs to draw one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    /// Top-left of the bounding box
    pub position: Vec2,
    pub size: f32,
    /// Degrees
    pub rotation: f32,
    pub category: Category,
    pub variant: usize,
}

impl From<&MovingObject> for ObjectView {
    fn from(obj: &MovingObject) -> Self {
        Self {
            position: obj.pos,
            size: obj.size,
            rotation: obj.rotation,
            category: obj.category,
            variant: obj.variant,
        }
    }
}

/// One drawable frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub objects: Vec<ObjectView>,
    pub score: u32,
    pub lives: i32,
    pub time_remaining_ms: u64,
    pub wave: u32,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            objects: state.objects.iter().map(ObjectView::from).collect(),
            score: state.score,
            lives: state.lives,
            time_remaining_ms: state.time_remaining_ms(),
            wave: state.difficulty.wave_count,
        }
    }

    /// Time remaining as `MM:SS`
    pub fn clock_text(&self) -> String {
        let secs = self.time_remaining_ms / 1000;
        format!("{:02}:{:02}", (secs / 60) % 60, secs % 60)
    }
}
