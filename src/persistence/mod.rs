//! On-disk best score
//!
//! Features:
//! - Versioned JSON envelope
//! - Write to a temp file, then rename over the old one
//! - Corrupt or unreadable files are treated as "no best score" and logged

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::highscores::HighScoreStore;

/// Current envelope version
pub const FORMAT_VERSION: u32 = 1;

/// Stored best score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    best: Option<HighScoreRecord>,
}

/// High score kept in a JSON file
#[derive(Debug)]
pub struct JsonHighScoreFile {
    path: PathBuf,
    best: Option<HighScoreRecord>,
}

impl JsonHighScoreFile {
    /// Default file name
    pub const FILE_NAME: &'static str = "fruit_tap_highscore.json";

    /// Open the store, reading any existing record
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match read_record(&path) {
            Ok(best) => best,
            Err(err) => {
                log::warn!("Ignoring high score file: {err}");
                None
            }
        };
        if let Some(record) = &best {
            log::info!("Loaded high score {} from {}", record.score, path.display());
        }
        Self { path, best }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> Option<&HighScoreRecord> {
        self.best.as_ref()
    }

    fn save(&self) -> Result<()> {
        let envelope = Envelope {
            version: FORMAT_VERSION,
            best: self.best.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| Error::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HighScoreStore for JsonHighScoreFile {
    fn high_score(&self) -> u32 {
        self.best.as_ref().map(|r| r.score).unwrap_or(0)
    }

    fn update_high_score(&mut self, score: u32) -> bool {
        if score <= self.high_score() {
            return false;
        }
        let previous = self.best.replace(HighScoreRecord {
            score,
            timestamp_ms: now_ms(),
        });
        match self.save() {
            Ok(()) => {
                log::info!("New high score {score} saved to {}", self.path.display());
                true
            }
            Err(err) => {
                log::warn!("High score not saved: {err}");
                self.best = previous;
                false
            }
        }
    }
}

fn read_record(path: &Path) -> Result<Option<HighScoreRecord>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let envelope: Envelope = serde_json::from_str(&json).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if envelope.version != FORMAT_VERSION {
        return Err(Error::Version {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(envelope.best)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
