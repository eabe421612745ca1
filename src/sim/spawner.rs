//! Wave spawning and the difficulty schedule

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::object::{Category, MovingObject};
use crate::settings::DifficultySettings;

/// Number of image variants available per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCounts {
    pub fruit: usize,
    pub flower: usize,
    pub pest: usize,
}

impl Default for VariantCounts {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            fruit: FRUIT_VARIANTS,
            flower: FLOWER_VARIANTS,
            pest: PEST_VARIANTS,
        }
    }
}

impl VariantCounts {
    pub fn for_category(&self, category: Category) -> usize {
        match category {
            Category::Fruit => self.fruit,
            Category::Flower => self.flower,
            Category::Pest => self.pest,
        }
    }
}

/// Everything a single wave needs besides the RNG
#[derive(Debug, Clone)]
pub struct WaveSpec<'a> {
    pub count: u32,
    pub speed: f32,
    pub pest_probability: f32,
    pub screen_width: f32,
    pub object_size: f32,
    pub variants: VariantCounts,
    pub tuning: &'a DifficultySettings,
}

/// Roll a fresh wave; every object is decided independently
pub fn spawn_wave<R: Rng + ?Sized>(rng: &mut R, spec: &WaveSpec<'_>) -> Vec<MovingObject> {
    let max_x = spec.screen_width - spec.object_size;
    (0..spec.count)
        .map(|_| {
            let x = if max_x > 0.0 {
                rng.random_range(0.0..=max_x)
            } else {
                0.0
            };
            let pos = Vec2::new(x, 0.0);

            let obj = if rng.random::<f32>() < spec.pest_probability {
                MovingObject::pest(rng, pos, spec.object_size, spec.speed, spec.tuning)
            } else {
                let category = if rng.random::<f32>() < spec.tuning.flower_chance {
                    Category::Flower
                } else {
                    Category::Fruit
                };
                MovingObject::falling(rng, category, pos, spec.object_size, spec.speed, spec.tuning)
            };

            let variants = spec.variants.for_category(obj.category);
            let variant = if variants > 1 {
                rng.random_range(0..variants)
            } else {
                0
            };
            obj.with_variant(variant)
        })
        .collect()
}

/// Difficulty state that escalates on every wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Waves spawned so far
    pub wave_count: u32,
    pub squares_per_wave: u32,
    /// Pixels per tick for the next wave
    pub wave_speed: f32,
    pub pest_probability: f32,
}

impl Difficulty {
    pub fn new(tuning: &DifficultySettings) -> Self {
        Self {
            wave_count: 0,
            squares_per_wave: tuning.initial_per_wave,
            wave_speed: tuning.initial_speed,
            pest_probability: tuning.initial_pest_probability.clamp(0.0, 1.0),
        }
    }

    /// Apply the post-spawn schedule
    pub fn escalate(&mut self, tuning: &DifficultySettings) {
        self.wave_speed += tuning.speed_step;
        self.wave_count += 1;

        if tuning.per_wave_interval > 0 && self.wave_count % tuning.per_wave_interval == 0 {
            self.squares_per_wave =
                (self.squares_per_wave + tuning.per_wave_step).min(tuning.max_per_wave);
        }

        self.pest_probability = (self.pest_probability + tuning.pest_probability_step)
            .min(tuning.max_pest_probability)
            .clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn wave<'a>(tuning: &'a DifficultySettings, count: u32, pest: f32, width: f32) -> WaveSpec<'a> {
        WaveSpec {
            count,
            speed: 20.0,
            pest_probability: pest,
            screen_width: width,
            object_size: 150.0,
            variants: VariantCounts::default(),
            tuning,
        }
    }

    #[test]
    fn test_wave_layout() {
        let tuning = DifficultySettings::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let objects = spawn_wave(&mut rng, &wave(&tuning, 8, 0.15, 1080.0));
        assert_eq!(objects.len(), 8);
        for obj in &objects {
            assert_eq!(obj.pos.y, 0.0);
            assert!(obj.pos.x >= 0.0 && obj.pos.x <= 930.0);
            assert_eq!(obj.size, 150.0);
            assert!(obj.variant < VariantCounts::default().for_category(obj.category));
        }
    }

    #[test]
    fn test_no_pests_at_zero_probability() {
        let tuning = DifficultySettings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let objects = spawn_wave(&mut rng, &wave(&tuning, 200, 0.0, 1080.0));
        assert!(objects.iter().all(|o| o.is_point_object()));
    }

    #[test]
    fn test_all_pests_at_full_probability() {
        let tuning = DifficultySettings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let objects = spawn_wave(&mut rng, &wave(&tuning, 50, 1.0, 1080.0));
        assert!(objects.iter().all(|o| o.is_penalty()));
        assert!(objects.iter().all(|o| o.vel == Vec2::new(0.0, 30.0)));
    }

    #[test]
    fn test_flower_share_is_roughly_ten_percent() {
        let tuning = DifficultySettings::default();
        let mut rng = Pcg32::seed_from_u64(77);
        let objects = spawn_wave(&mut rng, &wave(&tuning, 5000, 0.0, 1080.0));
        let flowers = objects.iter().filter(|o| o.category == Category::Flower).count();
        assert!((350..650).contains(&flowers), "flowers = {flowers}");
    }

    #[test]
    fn test_narrow_screen_clamps_to_zero() {
        let tuning = DifficultySettings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let objects = spawn_wave(&mut rng, &wave(&tuning, 10, 0.2, 100.0));
        assert!(objects.iter().all(|o| o.pos.x == 0.0));
    }

    #[test]
    fn test_difficulty_schedule() {
        let tuning = DifficultySettings::default();
        let mut difficulty = Difficulty::new(&tuning);
        assert_eq!(difficulty.squares_per_wave, 3);

        let mut squares = Vec::new();
        for _ in 0..9 {
            difficulty.escalate(&tuning);
            squares.push(difficulty.squares_per_wave);
        }
        assert_eq!(squares, vec![3, 3, 5, 5, 5, 7, 7, 7, 8]);
        assert!((difficulty.wave_speed - 42.5).abs() < 1e-4);
        assert!((difficulty.pest_probability - 0.168).abs() < 1e-4);
    }

    #[test]
    fn test_difficulty_monotonic_and_capped() {
        let tuning = DifficultySettings::default();
        let mut difficulty = Difficulty::new(&tuning);
        for _ in 0..500 {
            let before = difficulty.clone();
            difficulty.escalate(&tuning);
            assert!(difficulty.squares_per_wave >= before.squares_per_wave);
            assert!(difficulty.squares_per_wave <= 8);
            assert!(difficulty.pest_probability >= before.pest_probability);
            assert!(difficulty.pest_probability <= 0.5);
            assert!((difficulty.wave_speed - before.wave_speed - 2.5).abs() < 1e-3);
        }
        assert_eq!(difficulty.squares_per_wave, 8);
        assert_eq!(difficulty.pest_probability, 0.5);
    }
}
