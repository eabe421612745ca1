//! Sound cue notifications
//!
//! The core never plays audio itself; it emits cues that a host sound layer
//! maps to playback.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::settings::AudioSettings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Fruit tapped
    FruitTapped,
    /// Flower tapped
    FlowerTapped,
    /// Pest tapped, a life is lost
    PestTapped,
    /// Time ran out or lives hit zero
    SessionEnded,
}

/// Receives cues from the session controller
pub trait AudioNotifier: Send {
    fn notify(&mut self, cue: AudioCue);
}

/// Playback callback: cue plus effective volume in (0, 1]
pub type Playback = Box<dyn FnMut(AudioCue, f32) + Send>;

/// Applies volume preferences before handing cues to a playback backend
pub struct AudioManager {
    playback: Option<Playback>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &AudioSettings, playback: Playback) -> Self {
        let mut manager = Self::silent();
        manager.playback = Some(playback);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Manager with no backend; cues are only logged
    pub fn silent() -> Self {
        Self {
            playback: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioNotifier for AudioManager {
    fn notify(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        log::debug!("Audio cue {cue:?} (volume {vol:.2})");
        if vol <= 0.0 {
            return;
        }
        if let Some(playback) = self.playback.as_mut() {
            playback(cue, vol);
        }
    }
}

/// Collects cues in a shared list; clone it before handing it to a session
#[derive(Debug, Clone, Default)]
pub struct CueRecorder {
    cues: Arc<Mutex<Vec<AudioCue>>>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues.lock().clone()
    }
}

impl AudioNotifier for CueRecorder {
    fn notify(&mut self, cue: AudioCue) {
        self.cues.lock().push(cue);
    }
}
