//! High score tracking
//!
//! A single best score, backed by a `ScoreStore`. The store contract is
//! infallible: implementations log and swallow their own failures.

/// Persistent home of the high score
pub trait ScoreStore {
    /// Stored best score; 0 when absent or unreadable
    fn load_high_score(&mut self) -> u64;

    fn save_high_score(&mut self, value: u64);
}

/// In-memory store, for tests and sessions without a data directory
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: u64,
    /// Number of saves performed
    pub saves: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load_high_score(&mut self) -> u64 {
        self.value
    }

    fn save_high_score(&mut self, value: u64) {
        self.value = value;
        self.saves += 1;
    }
}

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn load(store: &mut dyn ScoreStore) -> Self {
        let best = store.load_high_score();
        log::info!("High score loaded: {}", best);
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run; persists and returns true when it set a new best
    pub fn record(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        store.save_high_score(score);
        log::info!("New high score: {}", score);
        true
    }
}
