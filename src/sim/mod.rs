//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Caller-owned seeded RNG only
//! - Removals never happen while iterating the live collection
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod object;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{WallHits, circles_overlap, collide_pair, pair_exempt, resolve_tick, resolve_walls};
pub use object::{Category, MovingObject};
pub use snapshot::{Frame, ObjectView};
pub use spawner::{Difficulty, VariantCounts, WaveSpec, spawn_wave};
pub use state::{EndReason, GameEvent, GamePhase, GameState, Screen};
pub use tick::{TickContext, pointer_hit, spawn_next_wave, tick};
