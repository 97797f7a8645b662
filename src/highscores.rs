//! Best score persistence
//!
//! A single integer, kept in LocalStorage under the `highScore` key.

/// Where the best score lives. Reads default to 0 when nothing is stored.
pub trait HighScoreStore {
    fn get(&self) -> u64;
    fn set(&mut self, score: u64);
}

/// In-memory store (tests, native demo)
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    best: u64,
    /// Every value written, oldest first
    pub writes: Vec<u64>,
}

impl MemoryHighScore {
    pub fn with_best(best: u64) -> Self {
        Self {
            best,
            writes: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
        self.writes.push(score);
    }
}

/// Best score backed by LocalStorage (WASM) with an in-memory cache
#[derive(Debug, Clone, Default)]
pub struct LocalHighScore {
    cached: u64,
}

impl LocalHighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highScore";

    /// Parse a stored value; anything unreadable counts as no record
    pub fn parse(raw: &str) -> u64 {
        let raw = raw.trim();
        raw.parse::<u64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().map(|v| v.max(0.0).floor() as u64))
            .unwrap_or_else(|| {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                0
            })
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let cached = Self::parse(&raw);
                log::info!("Loaded high score {}", cached);
                return Self { cached };
            }
        } else {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }

        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage
                .set_item(Self::STORAGE_KEY, &self.cached.to_string())
                .is_err()
            {
                log::warn!("Failed to save high score");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        // No-op for native
    }
}

impl HighScoreStore for LocalHighScore {
    fn get(&self) -> u64 {
        self.cached
    }

    fn set(&mut self, score: u64) {
        self.cached = score;
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let store = MemoryHighScore::default();
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryHighScore::with_best(10);
        store.set(42);
        assert_eq!(store.get(), 42);
        assert_eq!(store.writes, vec![42]);
    }

    #[test]
    fn test_parse_stored_values() {
        assert_eq!(LocalHighScore::parse("42"), 42);
        assert_eq!(LocalHighScore::parse(" 17 "), 17);
        assert_eq!(LocalHighScore::parse("12.9"), 12);
        assert_eq!(LocalHighScore::parse("garbage"), 0);
        assert_eq!(LocalHighScore::parse(""), 0);
    }

    #[test]
    fn test_local_store_caches() {
        let mut store = LocalHighScore::load();
        assert_eq!(store.get(), 0);
        store.set(99);
        assert_eq!(store.get(), 99);
    }
}
