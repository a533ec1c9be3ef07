use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the persisted high score, next to the binary's
/// working directory.
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// Loads and saves the best score as a bare JSON integer.
///
/// Persistence is best-effort: a missing or corrupt file loads as zero
/// and a failed write only warns. Losing a high score never takes the
/// game down with it.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) {
        if let Err(err) = self.try_save(score) {
            eprintln!(
                "warning: could not save high score to {}: {err}",
                self.path.display()
            );
        }
    }

    fn try_save(&self, score: u32) -> color_eyre::Result<()> {
        let json = serde_json::to_string(&score)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}
