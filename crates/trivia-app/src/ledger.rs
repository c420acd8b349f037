//! Durable high-score ledger.
//!
//! One JSON file holds the top entries. Reads never fail: a missing or
//! unreadable payload is an empty ledger, logged and moved past. Writes go
//! through a temp file and rename, last-writer-wins.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use trivia_core::highscores::{merge_entry, HighScoreEntry};
use trivia_core::session::QuizSession;

const LEDGER_FILE: &str = "high_scores.json";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ScoreLedger {
    path: PathBuf,
}

impl ScoreLedger {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(LEDGER_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current top entries, best first. Corrupt or absent storage reads as
    /// empty and is never an error.
    pub fn load(&self) -> Vec<HighScoreEntry> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(payload) => payload,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&payload) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable high-score payload, treating ledger as empty"
                );
                Vec::new()
            }
        }
    }

    /// Folds a completed session into the ledger and persists the result.
    /// A session that is not completed is a no-op (nothing written).
    pub fn record(&self, session: &QuizSession) -> Result<Vec<HighScoreEntry>, LedgerError> {
        let Some(score) = session.score() else {
            return Ok(self.load());
        };

        let entry = HighScoreEntry {
            score,
            total_questions: session.questions().len() as u32,
            difficulty: session.difficulty(),
            date: chrono::Utc::now().to_rfc3339(),
        };

        let merged = merge_entry(self.load(), entry);
        self.persist(&merged)?;
        Ok(merged)
    }

    fn persist(&self, entries: &[HighScoreEntry]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(entries)?;
        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, payload)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}
