//! Fruit Tap entry point
//!
//! Native demo: runs one session on the tick thread and plays it with a
//! simple auto-tapper, logging frames and printing the final summary.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::Duration;

    use fruit_tap::persistence::JsonHighScoreFile;
    use fruit_tap::platform::Ticker;
    use fruit_tap::sim::{Frame, Screen};
    use fruit_tap::{
        AudioCue, AudioManager, Collaborators, GameSummary, Presenter, Session, SessionHandle,
        Settings,
    };

    /// Portrait phone-sized playfield
    const SCREEN: Screen = Screen {
        width: 1080.0,
        height: 1920.0,
    };
    /// Ticks between auto-taps
    const TAP_EVERY: u32 = 4;
    /// Frames between HUD log lines
    const HUD_EVERY: u64 = 20;

    /// Logs a HUD line every few frames
    struct LogPresenter {
        frames: u64,
    }

    impl Presenter for LogPresenter {
        fn present(&mut self, frame: &Frame) {
            self.frames += 1;
            if self.frames % HUD_EVERY == 0 {
                log::info!(
                    "{} | score {} | lives {} | wave {} | {} objects",
                    frame.clock_text(),
                    frame.score,
                    frame.lives,
                    frame.wave,
                    frame.objects.len()
                );
            }
        }

        fn game_over(&mut self, summary: &GameSummary) {
            log::info!("Game over: {:?}", summary.reason);
        }
    }

    fn playback(cue: AudioCue, volume: f32) {
        log::debug!("Play {cue:?} at volume {volume:.2}");
    }

    /// Center of the point object closest to the bottom edge
    fn lowest_target(handle: &SessionHandle) -> Option<(f32, f32)> {
        handle.with(|session| {
            session
                .state()
                .objects
                .iter()
                .filter(|obj| obj.is_point_object())
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|obj| {
                    let center = obj.center();
                    (center.x, center.y)
                })
        })
    }

    pub fn run() {
        env_logger::init();

        let mut settings = Settings::load_or_default(Path::new(Settings::FILE_NAME));
        if let Some(arg) = std::env::args().nth(1) {
            match arg.parse::<u64>() {
                Ok(seed) => settings.seed = Some(seed),
                Err(e) => log::warn!("Ignoring seed argument {arg:?}: {e}"),
            }
        }
        let period = settings.tick_period();
        let audio = AudioManager::new(&settings.audio, Box::new(playback));
        let store = JsonHighScoreFile::open(JsonHighScoreFile::FILE_NAME);

        let session = Session::new(
            settings,
            SCREEN,
            Collaborators::new(LogPresenter { frames: 0 }, audio, store),
        );
        log::info!("Fruit Tap (native) starting with seed {}", session.seed());

        let handle = SessionHandle::new(session);
        handle.start();
        let ticker = Ticker::spawn(handle.clone(), period);

        let mut taps = 0usize;
        while !handle.phase().is_finished() {
            std::thread::sleep(period * TAP_EVERY);
            if let Some((x, y)) = lowest_target(&handle) {
                taps += handle.pointer_down(x, y);
            }
        }
        let ticks = ticker.stop();

        match handle.with(|session| session.summary().cloned()) {
            Some(summary) => {
                println!("Reason:     {:?}", summary.reason);
                println!("Score:      {}", summary.score);
                println!(
                    "High score: {}{}",
                    summary.high_score,
                    if summary.new_high_score { " (new!)" } else { "" }
                );
                println!("Waves:      {}", summary.waves);
                println!("Time:       {:.1}s", summary.elapsed_ms as f64 / 1000.0);
                println!("Taps:       {taps} over {ticks} ticks");
            }
            None => println!("Session ended without a summary"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `fruit_tap::SessionHandle` directly
}
