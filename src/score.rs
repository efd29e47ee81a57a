//! High-score persistence.
//!
//! The store is a plain-text integer in a single file. Reads and writes are
//! best-effort: a missing or malformed file loads as 0, and a failed write
//! is ignored, so persistence can never interrupt gameplay.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Store backed by the platform data directory, falling back to the
    /// working directory when no home can be resolved.
    pub fn new() -> Self {
        let path = ProjectDirs::from("", "", "dino-dash")
            .map(|dirs| dirs.data_dir().join("highscore"))
            .unwrap_or_else(|| PathBuf::from(".dino_dash_highscore"));
        Self { path }
    }

    /// Store backed by an explicit file, for tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, score.to_string());
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}
