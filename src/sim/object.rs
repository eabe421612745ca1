//! Falling circular objects
//!
//! Positions are the top-left corner of the object's bounding box; the
//! circle is inscribed in that box.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FLOWER_POINTS, FRUIT_POINTS};
use crate::settings::DifficultySettings;
use crate::{direction_from_degrees, wrap_degrees};

/// What kind of object is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fruit,
    /// Worth more and passes through fruit
    Flower,
    /// Penalty object: tapping it costs a life
    Pest,
}

impl Category {
    /// Score awarded for tapping (pests award nothing)
    pub fn points(self) -> u32 {
        match self {
            Category::Fruit => FRUIT_POINTS,
            Category::Flower => FLOWER_POINTS,
            Category::Pest => 0,
        }
    }

    pub fn is_penalty(self) -> bool {
        self == Category::Pest
    }
}

/// A falling object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingObject {
    /// Top-left of the bounding box
    pub pos: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Pixels per tick
    pub vel: Vec2,
    pub category: Category,
    /// Degrees, in [0, 360)
    pub rotation: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
    /// Image variant within the category
    #[serde(default)]
    pub variant: usize,
}

impl MovingObject {
    pub fn new(category: Category, pos: Vec2, size: f32, vel: Vec2, rotation_speed: f32) -> Self {
        debug_assert!(size > 0.0, "object size must be positive");
        Self {
            pos,
            size,
            vel,
            category,
            rotation: 0.0,
            rotation_speed,
            variant: 0,
        }
    }

    /// Spawn a fruit or flower heading somewhere inside the downward cone
    pub fn falling<R: Rng + ?Sized>(
        rng: &mut R,
        category: Category,
        pos: Vec2,
        size: f32,
        speed: f32,
        tuning: &DifficultySettings,
    ) -> Self {
        let heading = tuning.cone_min_degrees
            + rng.random::<f32>() * (tuning.cone_max_degrees - tuning.cone_min_degrees);
        let vel = direction_from_degrees(heading) * speed;
        Self::new(category, pos, size, vel, random_spin(rng, tuning))
    }

    /// Spawn a pest falling straight down, faster than the wave
    pub fn pest<R: Rng + ?Sized>(
        rng: &mut R,
        pos: Vec2,
        size: f32,
        speed: f32,
        tuning: &DifficultySettings,
    ) -> Self {
        let vel = Vec2::new(0.0, speed * tuning.pest_speed_multiplier);
        Self::new(Category::Pest, pos, size, vel, random_spin(rng, tuning))
    }

    pub fn with_variant(mut self, variant: usize) -> Self {
        self.variant = variant;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius())
    }

    pub fn points(&self) -> u32 {
        self.category.points()
    }

    /// Move one tick and spin
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.rotation = wrap_degrees(self.rotation + self.rotation_speed);
    }

    /// Padded circular hit test
    pub fn contains_point(&self, point: Vec2, buffer: f32) -> bool {
        let reach = self.radius() + buffer;
        point.distance_squared(self.center()) <= reach * reach
    }

    pub fn is_penalty(&self) -> bool {
        self.category.is_penalty()
    }

    /// Fruit and flowers must be cleared before a new wave spawns
    pub fn is_point_object(&self) -> bool {
        !self.is_penalty()
    }
}

fn random_spin<R: Rng + ?Sized>(rng: &mut R, tuning: &DifficultySettings) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * tuning.max_rotation_speed
}
