//! Session controller
//!
//! Owns the game state, the seeded RNG and the injected collaborators
//! (presenter, audio, high-score store). `SessionHandle` shares one session
//! between the tick driver and pointer input behind a single lock.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioCue, AudioNotifier};
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{
    Category, EndReason, Frame, GameEvent, GamePhase, GameState, Screen, TickContext,
    VariantCounts, pointer_hit, tick,
};

/// Final result of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u32,
    /// Best score after this session was recorded
    pub high_score: u32,
    pub new_high_score: bool,
    pub reason: EndReason,
    pub waves: u32,
    pub elapsed_ms: u64,
}

/// Draws frames and the game-over screen
pub trait Presenter: Send {
    fn present(&mut self, frame: &Frame);
    fn game_over(&mut self, summary: &GameSummary);
}

/// External capabilities handed to a session at construction
pub struct Collaborators {
    pub presenter: Box<dyn Presenter>,
    pub audio: Box<dyn AudioNotifier>,
    pub high_scores: Box<dyn HighScoreStore>,
}

impl Collaborators {
    pub fn new(
        presenter: impl Presenter + 'static,
        audio: impl AudioNotifier + 'static,
        high_scores: impl HighScoreStore + 'static,
    ) -> Self {
        Self {
            presenter: Box::new(presenter),
            audio: Box::new(audio),
            high_scores: Box::new(high_scores),
        }
    }
}

/// One play session
pub struct Session {
    settings: Settings,
    state: GameState,
    seed: u64,
    rng: Pcg32,
    screen: Screen,
    variants: VariantCounts,
    collaborators: Collaborators,
    summary: Option<GameSummary>,
}

impl Session {
    pub fn new(settings: Settings, screen: Screen, collaborators: Collaborators) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        Self {
            state: GameState::new(&settings),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen,
            variants: VariantCounts::default(),
            collaborators,
            summary: None,
        }
    }

    /// Use the host catalog's variant counts when picking images
    pub fn with_variants(mut self, variants: VariantCounts) -> Self {
        self.variants = variants;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Host reports a new screen size; used from the next tick on
    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state)
    }

    /// Enter `Running` with fresh counters; only valid once
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::NotStarted {
            log::warn!("Ignoring start in phase {:?}", self.state.phase);
            return false;
        }
        self.state.begin(&self.settings);
        self.rng = Pcg32::seed_from_u64(self.seed);
        log::info!(
            "Session started (seed {}, screen {}x{})",
            self.seed,
            self.screen.width,
            self.screen.height
        );
        true
    }

    /// Run one fixed tick; returns whether the session is still running
    pub fn tick(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }

        let ctx = TickContext {
            screen: self.screen,
            settings: &self.settings,
            variants: self.variants,
        };
        let running = tick(&mut self.state, &mut self.rng, &ctx);
        self.dispatch_events();

        if running {
            let frame = Frame::capture(&self.state);
            self.collaborators.presenter.present(&frame);
        } else if self.state.phase == GamePhase::GameOver {
            self.finish();
        }
        running
    }

    /// Pointer pressed at screen coordinates; returns how many objects were tapped
    pub fn pointer_down(&mut self, x: f32, y: f32) -> usize {
        if self.state.phase != GamePhase::Running {
            return 0;
        }
        let hits = pointer_hit(&mut self.state, Vec2::new(x, y), self.settings.tap_buffer);
        self.dispatch_events();
        hits
    }

    /// Pointer dragged; taps like a press when `drag_taps` is enabled
    pub fn pointer_drag(&mut self, x: f32, y: f32) -> usize {
        if !self.settings.drag_taps {
            return 0;
        }
        self.pointer_down(x, y)
    }

    /// Stop the session for good and drop all objects; safe to call at any time
    pub fn teardown(&mut self) {
        if !self.state.phase.is_finished() {
            log::info!("Session torn down at tick {}", self.state.time_ticks);
            self.state.phase = GamePhase::Aborted;
        }
        self.state.objects.clear();
        self.state.events.clear();
    }

    fn dispatch_events(&mut self) {
        for event in self.state.take_events() {
            let cue = match event {
                GameEvent::Tapped { category, .. } => Some(match category {
                    Category::Pest => AudioCue::PestTapped,
                    Category::Flower => AudioCue::FlowerTapped,
                    Category::Fruit => AudioCue::FruitTapped,
                }),
                GameEvent::Ended { .. } => Some(AudioCue::SessionEnded),
                GameEvent::WaveSpawned { .. } | GameEvent::Escaped { .. } => None,
            };
            if let Some(cue) = cue {
                self.collaborators.audio.notify(cue);
            }
        }
    }

    /// Record the final score once and show the game-over screen
    fn finish(&mut self) {
        if self.summary.is_some() {
            return;
        }
        let score = self.state.score;
        let high_scores = &mut self.collaborators.high_scores;
        let new_high_score = high_scores.update_high_score(score);
        let summary = GameSummary {
            score,
            high_score: high_scores.high_score(),
            new_high_score,
            reason: self.state.end_reason.unwrap_or(EndReason::TimeUp),
            waves: self.state.difficulty.wave_count,
            elapsed_ms: self.state.elapsed_ms,
        };
        log::info!(
            "Game over ({:?}): score {}, best {}, {} waves",
            summary.reason,
            summary.score,
            summary.high_score,
            summary.waves
        );
        self.collaborators.presenter.game_over(&summary);
        self.summary = Some(summary);
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Shared, lock-guarded session used by the tick driver and input handlers
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn start(&self) -> bool {
        self.inner.lock().start()
    }

    pub fn tick(&self) -> bool {
        self.inner.lock().tick()
    }

    pub fn pointer_down(&self, x: f32, y: f32) -> usize {
        self.inner.lock().pointer_down(x, y)
    }

    pub fn pointer_drag(&self, x: f32, y: f32) -> usize {
        self.inner.lock().pointer_drag(x, y)
    }

    pub fn teardown(&self) {
        self.inner.lock().teardown();
    }

    pub fn phase(&self) -> GamePhase {
        self.inner.lock().phase()
    }

    pub fn frame(&self) -> Frame {
        self.inner.lock().frame()
    }

    /// Run a closure with the session locked
    pub fn with<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
