//! High score persistence: a single decimal number in a text file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored high score; 0 on missing, unreadable or non-numeric content.
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| content.trim().parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// Overwrite the file with `score`. Creates the parent directory if needed.
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("write high score to {}", self.path.display()))?;
        Ok(())
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}
