use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a score store.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistent record of finished games.
///
/// The store owns the running maximum; callers only append final scores.
pub trait ScoreStore {
    /// Returns the best recorded score, or 0 when nothing has been recorded.
    fn high_score(&self) -> Result<u32, ScoreError>;

    /// Appends the final score of one finished game.
    fn record(&mut self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScoreFile {
    scores: Vec<u32>,
}

/// Append-only score store backed by a JSON file.
///
/// Every `record` writes through. Only persisted scores count towards the
/// high score; a score whose write failed is held back and retried once more
/// when the store is dropped.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    file: ScoreFile,
    pending: Vec<u32>,
}

impl JsonScoreStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ScoreError> {
        let path = path.into();
        let file = load_score_file(&path)?;
        log::info!(
            "opened score store {} ({} records)",
            path.display(),
            file.scores.len()
        );

        Ok(Self {
            path,
            file,
            pending: Vec::new(),
        })
    }

    /// Returns all persisted scores in the order they were appended.
    #[must_use]
    pub fn records(&self) -> &[u32] {
        &self.file.scores
    }

    /// Returns scores whose write failed and that await the retry on drop.
    #[must_use]
    pub fn pending(&self) -> &[u32] {
        &self.pending
    }

    fn flush_pending(&mut self) -> Result<(), ScoreError> {
        let mut file = self.file.clone();
        file.scores.extend_from_slice(&self.pending);
        save_score_file(&self.path, &file)?;

        self.file = file;
        self.pending.clear();
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn high_score(&self) -> Result<u32, ScoreError> {
        Ok(self.file.scores.iter().copied().max().unwrap_or(0))
    }

    fn record(&mut self, score: u32) -> Result<(), ScoreError> {
        let mut file = self.file.clone();
        file.scores.push(score);

        if let Err(error) = save_score_file(&self.path, &file) {
            self.pending.push(score);
            return Err(error);
        }

        self.file = file;
        Ok(())
    }
}

impl Drop for JsonScoreStore {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            let count = self.pending.len();
            match self.flush_pending() {
                Ok(()) => {
                    log::info!("saved {count} held-back scores to {}", self.path.display());
                }
                Err(error) => {
                    log::error!("failed to save scores to {}: {error}", self.path.display());
                }
            }
        }
        log::info!("closed score store {}", self.path.display());
    }
}

/// Score store kept in memory only.
///
/// Used when the score file cannot be opened, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: Vec<u32>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_scores(scores: Vec<u32>) -> Self {
        Self { scores }
    }

    #[must_use]
    pub fn records(&self) -> &[u32] {
        &self.scores
    }
}

impl ScoreStore for MemoryScoreStore {
    fn high_score(&self) -> Result<u32, ScoreError> {
        Ok(self.scores.iter().copied().max().unwrap_or(0))
    }

    fn record(&mut self, score: u32) -> Result<(), ScoreError> {
        self.scores.push(score);
        Ok(())
    }
}

fn load_score_file(path: &Path) -> Result<ScoreFile, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
        Err(error) => return Err(error.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_score_file(path: &Path, file: &ScoreFile) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(file)?;
    fs::write(path, json)?;
    Ok(())
}
