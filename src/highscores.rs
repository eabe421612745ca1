//! Best-score storage
//!
//! The session reads and updates the best score exactly once, when it ends.

use std::sync::Arc;

use parking_lot::Mutex;

/// Persisted best score
pub trait HighScoreStore: Send {
    /// Current best score (0 when nothing is stored)
    fn high_score(&self) -> u32;

    /// Store `score` if it beats the current best; returns whether it did
    fn update_high_score(&mut self, score: u32) -> bool;
}

#[derive(Debug, Default)]
struct MemoryInner {
    best: u32,
    updates: usize,
}

/// In-process store; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        let store = Self::default();
        store.inner.lock().best = best;
        store
    }

    /// Number of `update_high_score` calls received
    pub fn update_calls(&self) -> usize {
        self.inner.lock().updates
    }
}

impl HighScoreStore for MemoryHighScore {
    fn high_score(&self) -> u32 {
        self.inner.lock().best
    }

    fn update_high_score(&mut self, score: u32) -> bool {
        let mut inner = self.inner.lock();
        inner.updates += 1;
        if score > inner.best {
            inner.best = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_strictly_greater_scores_stick() {
        let mut store = MemoryHighScore::with_best(10);
        assert!(!store.update_high_score(10));
        assert!(!store.update_high_score(3));
        assert_eq!(store.high_score(), 10);
        assert!(store.update_high_score(11));
        assert_eq!(store.high_score(), 11);
        assert_eq!(store.update_calls(), 3);
    }

    #[test]
    fn test_clones_share_best() {
        let store = MemoryHighScore::new();
        let mut session_side = store.clone();
        assert!(session_side.update_high_score(4));
        assert_eq!(store.high_score(), 4);
    }

    #[test]
    fn test_zero_never_beats_empty_store() {
        let mut store = MemoryHighScore::new();
        assert!(!store.update_high_score(0));
    }
}
