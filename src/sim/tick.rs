//! Fixed timestep simulation tick
//!
//! Advances a running session by one tick and resolves pointer taps. Both
//! record what happened in `GameState::events`.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_tick;
use super::spawner::{VariantCounts, WaveSpec, spawn_wave};
use super::state::{EndReason, GameEvent, GamePhase, GameState, Screen};
use crate::settings::Settings;

/// Per-tick environment supplied by the session
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub screen: Screen,
    pub settings: &'a Settings,
    pub variants: VariantCounts,
}

/// Advance the session by one fixed tick
///
/// Returns `true` while the session is still running afterwards.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, ctx: &TickContext<'_>) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }

    state.time_ticks += 1;
    state.elapsed_ms = state.time_ticks * state.tick_ms;

    // Termination
    let reason = if state.lives <= 0 {
        Some(EndReason::OutOfLives)
    } else if state.elapsed_ms >= state.session_duration_ms {
        Some(EndReason::TimeUp)
    } else {
        None
    };
    if let Some(reason) = reason {
        state.phase = GamePhase::GameOver;
        state.end_reason = Some(reason);
        state.events.push(GameEvent::Ended { reason });
        return false;
    }

    // New wave once every fruit and flower is gone
    if !state.has_point_objects() {
        spawn_next_wave(state, rng, ctx);
    }

    // Movement, then drop anything whose top edge left the bottom of the screen
    for obj in &mut state.objects {
        obj.advance();
    }
    let height = ctx.screen.height;
    let (fallen, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.objects)
        .into_iter()
        .partition(|obj| obj.pos.y > height);
    state.objects = remaining;
    for obj in fallen {
        let life_lost = obj.is_point_object();
        if life_lost {
            state.lives -= 1;
        }
        log::debug!("{:?} fell off screen (life lost: {life_lost})", obj.category);
        state.events.push(GameEvent::Escaped {
            category: obj.category,
            life_lost,
        });
    }

    resolve_tick(&mut state.objects, ctx.screen.width, ctx.screen.height);

    true
}

/// Spawn a wave from the current difficulty, then escalate it
pub fn spawn_next_wave<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, ctx: &TickContext<'_>) {
    let tuning = &ctx.settings.difficulty;
    let spec = WaveSpec {
        count: state.difficulty.squares_per_wave,
        speed: state.difficulty.wave_speed,
        pest_probability: state.difficulty.pest_probability,
        screen_width: ctx.screen.width,
        object_size: ctx.settings.object_size,
        variants: ctx.variants,
        tuning,
    };
    let wave = spawn_wave(rng, &spec);
    let count = wave.len() as u32;
    state.objects.extend(wave);

    state.difficulty.escalate(tuning);
    log::info!(
        "Wave {}: {} objects at speed {:.1} (pest chance {:.3})",
        state.difficulty.wave_count,
        count,
        spec.speed,
        spec.pest_probability
    );
    state.events.push(GameEvent::WaveSpawned {
        wave: state.difficulty.wave_count,
        count,
        speed: spec.speed,
    });
}

/// Resolve a pointer press: every object under the point is tapped
///
/// Returns the number of objects removed.
pub fn pointer_hit(state: &mut GameState, point: Vec2, buffer: f32) -> usize {
    if state.phase != GamePhase::Running {
        return 0;
    }

    let hits: Vec<usize> = state
        .objects
        .iter()
        .enumerate()
        .filter(|(_, obj)| obj.contains_point(point, buffer))
        .map(|(index, _)| index)
        .collect();

    // Remove back to front so earlier indices stay valid
    for &index in hits.iter().rev() {
        let obj = state.objects.remove(index);
        let points = obj.points();
        if obj.is_penalty() {
            state.lives -= 1;
        } else {
            state.score += points;
        }
        log::debug!("Tapped {:?} at ({:.0}, {:.0})", obj.category, point.x, point.y);
        state.events.push(GameEvent::Tapped {
            category: obj.category,
            points,
        });
    }

    hits.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::object::{Category, MovingObject};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SCREEN: Screen = Screen {
        width: 1080.0,
        height: 1920.0,
    };

    fn running(settings: &Settings) -> GameState {
        let mut state = GameState::new(settings);
        state.begin(settings);
        state
    }

    fn still(category: Category, x: f32, y: f32) -> MovingObject {
        MovingObject::new(category, Vec2::new(x, y), 150.0, Vec2::ZERO, 0.0)
    }

    fn ctx(settings: &Settings) -> TickContext<'_> {
        TickContext {
            screen: SCREEN,
            settings,
            variants: VariantCounts::default(),
        }
    }

    #[test]
    fn test_first_tick_spawns_wave_and_escalates() {
        let settings = Settings::default();
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(1);

        assert!(tick(&mut state, &mut rng, &ctx(&settings)));
        assert_eq!(state.objects.len(), 3);
        assert_eq!(state.difficulty.wave_count, 1);
        assert_eq!(state.difficulty.wave_speed, 22.5);
        assert!(matches!(
            state.events[0],
            GameEvent::WaveSpawned { wave: 1, count: 3, .. }
        ));
    }

    #[test]
    fn test_pests_do_not_block_next_wave() {
        let settings = Settings::default();
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(2);
        state.objects.push(still(Category::Pest, 0.0, 100.0));
        state.objects.push(still(Category::Pest, 400.0, 100.0));

        tick(&mut state, &mut rng, &ctx(&settings));
        assert_eq!(state.difficulty.wave_count, 1);
        assert_eq!(state.objects.len(), 5);
    }

    #[test]
    fn test_live_fruit_blocks_next_wave() {
        let settings = Settings::default();
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(3);
        state.objects.push(still(Category::Fruit, 0.0, 100.0));

        tick(&mut state, &mut rng, &ctx(&settings));
        assert_eq!(state.difficulty.wave_count, 0);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_falling_off_bottom() {
        let settings = Settings::default();
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut fruit = still(Category::Fruit, 0.0, 1915.0);
        fruit.vel = Vec2::new(0.0, 10.0);
        let mut pest = still(Category::Pest, 500.0, 1915.0);
        pest.vel = Vec2::new(0.0, 10.0);
        // keeps the wave from respawning
        let keeper = still(Category::Flower, 800.0, 500.0);
        state.objects = vec![fruit, pest, keeper];

        tick(&mut state, &mut rng, &ctx(&settings));
        assert_eq!(state.lives, 2);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].category, Category::Flower);
        let escaped: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Escaped { .. }))
            .collect();
        assert_eq!(escaped.len(), 2);
    }

    #[test]
    fn test_object_exactly_at_bottom_stays() {
        let settings = Settings::default();
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(4);
        state.objects.push(still(Category::Fruit, 0.0, 1920.0));
        tick(&mut state, &mut rng, &ctx(&settings));
        assert_eq!(state.lives, 3);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_tap_accounting() {
        let settings = Settings::default();
        let mut state = running(&settings);
        state.objects = vec![
            still(Category::Fruit, 0.0, 0.0),
            still(Category::Flower, 400.0, 0.0),
            still(Category::Pest, 800.0, 0.0),
        ];

        assert_eq!(pointer_hit(&mut state, Vec2::new(75.0, 75.0), 10.0), 1);
        assert_eq!((state.score, state.lives), (1, 3));

        assert_eq!(pointer_hit(&mut state, Vec2::new(475.0, 75.0), 10.0), 1);
        assert_eq!((state.score, state.lives), (6, 3));

        assert_eq!(pointer_hit(&mut state, Vec2::new(875.0, 75.0), 10.0), 1);
        assert_eq!((state.score, state.lives), (6, 2));
        assert!(state.objects.is_empty());

        // Off-screen tap hits nothing
        assert_eq!(pointer_hit(&mut state, Vec2::new(-500.0, -500.0), 10.0), 0);
    }

    #[test]
    fn test_tap_removes_every_overlapping_object() {
        let settings = Settings::default();
        let mut state = running(&settings);
        state.objects = vec![
            still(Category::Fruit, 0.0, 0.0),
            still(Category::Fruit, 40.0, 0.0),
            still(Category::Pest, 20.0, 20.0),
            still(Category::Fruit, 900.0, 900.0),
        ];

        assert_eq!(pointer_hit(&mut state, Vec2::new(100.0, 90.0), 10.0), 3);
        assert_eq!(state.score, 2);
        assert_eq!(state.lives, 2);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos, Vec2::new(900.0, 900.0));
    }

    #[test]
    fn test_session_times_out() {
        let settings = Settings {
            session_duration_ms: 500,
            ..Default::default()
        };
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(6);

        let mut ticks = 0;
        while tick(&mut state, &mut rng, &ctx(&settings)) {
            ticks += 1;
            // keep lives topped up so only time ends it
            state.lives = 3;
        }
        assert_eq!(ticks, 9);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::Ended {
                reason: EndReason::TimeUp
            })
        );
        assert!(!tick(&mut state, &mut rng, &ctx(&settings)));
        assert_eq!(state.time_ticks, 10);
    }

    #[test]
    fn test_no_lives_ends_session() {
        let settings = Settings::default();
        let mut state = running(&settings);
        let mut rng = Pcg32::seed_from_u64(7);
        state.lives = 0;
        assert!(!tick(&mut state, &mut rng, &ctx(&settings)));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.objects.is_empty());

        state.objects.push(still(Category::Fruit, 0.0, 0.0));
        assert_eq!(pointer_hit(&mut state, Vec2::new(75.0, 75.0), 10.0), 0);
        assert_eq!(state.score, 0);
    }
}
