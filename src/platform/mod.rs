//! Platform layer
//!
//! Native tick driver: a background thread that ticks a shared session at a
//! fixed period until the session stops running or the ticker is stopped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::session::SessionHandle;

/// Background tick loop for one session
pub struct Ticker {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<u64>>,
}

impl Ticker {
    /// Start ticking `session` every `period`
    pub fn spawn(session: SessionHandle, period: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let thread = std::thread::spawn(move || run(&session, period, &flag));
        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// The session stopped running on its own
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop ticking and wait for the thread; returns the number of ticks run
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.stop.store(true, Ordering::Release);
        match self.thread.take().map(JoinHandle::join) {
            Some(Ok(ticks)) => ticks,
            Some(Err(_)) => {
                log::warn!("Tick thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(session: &SessionHandle, period: Duration, stop: &AtomicBool) -> u64 {
    let mut ticks = 0;
    let mut next = Instant::now() + period;
    loop {
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        }
        // Checked after sleeping so a stop during the wait skips the tick
        if stop.load(Ordering::Acquire) {
            break;
        }
        if !session.tick() {
            break;
        }
        ticks += 1;
        // Late ticks run back to back instead of drifting
        next += period;
    }
    log::debug!("Tick loop exited after {ticks} ticks");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use crate::highscores::MemoryHighScore;
    use crate::session::{Collaborators, GameSummary, Presenter, Session};
    use crate::settings::Settings;
    use crate::sim::{Frame, GamePhase, Screen};

    struct Quiet;

    impl Presenter for Quiet {
        fn present(&mut self, _frame: &Frame) {}
        fn game_over(&mut self, _summary: &GameSummary) {}
    }

    fn handle(settings: Settings) -> SessionHandle {
        SessionHandle::new(Session::new(
            settings,
            Screen::new(720.0, 1280.0),
            Collaborators::new(Quiet, CueRecorder::new(), MemoryHighScore::new()),
        ))
    }

    #[test]
    fn test_ticker_runs_until_session_ends() {
        let session = handle(Settings {
            tick_ms: 1,
            session_duration_ms: 20,
            seed: Some(1),
            ..Default::default()
        });
        session.start();
        let ticker = Ticker::spawn(session.clone(), Duration::from_millis(1));
        let deadline = Instant::now() + Duration::from_secs(5);
        while !ticker.is_finished() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(ticker.stop(), 19);
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_teardown_stops_ticker() {
        let session = handle(Settings {
            seed: Some(2),
            ..Default::default()
        });
        session.start();
        let ticker = Ticker::spawn(session.clone(), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        session.teardown();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !ticker.is_finished() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(ticker.is_finished());
        ticker.stop();
        assert_eq!(session.phase(), GamePhase::Aborted);
        assert!(session.frame().objects.is_empty());
    }

    #[test]
    fn test_stop_before_session_ends() {
        let session = handle(Settings {
            seed: Some(3),
            ..Default::default()
        });
        session.start();
        let ticker = Ticker::spawn(session.clone(), Duration::from_secs(60));
        ticker.stop();
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.with(|s| s.state().time_ticks), 0);
    }
}
