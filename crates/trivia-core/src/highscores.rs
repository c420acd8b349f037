//! High-score merge rules.
//!
//! The ledger itself (the durable JSON file) lives in `trivia-app`; this
//! module owns the pure part: entry shape and the append/sort/truncate
//! discipline that keeps the list capped at [`MAX_HIGH_SCORES`].

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, MAX_HIGH_SCORES};

/// One completed session, as persisted.
///
/// `date` is an ISO-8601 timestamp string, written once when the entry is
/// created and never reinterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub score: u32,
    pub total_questions: u32,
    pub difficulty: Difficulty,
    pub date: String,
}

/// Merges a new entry into the list: sort descending by score, cap at
/// [`MAX_HIGH_SCORES`]. Equal scores order most-recent-first, which falls
/// out of prepending the new entry before the stable sort.
pub fn merge_entry(mut entries: Vec<HighScoreEntry>, entry: HighScoreEntry) -> Vec<HighScoreEntry> {
    entries.insert(0, entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32, date: &str) -> HighScoreEntry {
        HighScoreEntry {
            score,
            total_questions: 10,
            difficulty: Difficulty::Easy,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_sorted_descending_and_capped() {
        let mut entries = Vec::new();
        for score in [3, 9, 1, 7, 5, 8, 2] {
            entries = merge_entry(entries, entry(score, "2026-01-01T00:00:00Z"));
        }
        let scores: Vec<u32> = entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, [9, 8, 7, 5, 3]);
        assert_eq!(entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_ties_order_most_recent_first() {
        let mut entries = Vec::new();
        entries = merge_entry(entries, entry(6, "2026-01-01T00:00:00Z"));
        entries = merge_entry(entries, entry(6, "2026-01-02T00:00:00Z"));
        entries = merge_entry(entries, entry(6, "2026-01-03T00:00:00Z"));

        let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            [
                "2026-01-03T00:00:00Z",
                "2026-01-02T00:00:00Z",
                "2026-01-01T00:00:00Z"
            ]
        );
    }

    #[test]
    fn test_persisted_layout() {
        let json = serde_json::to_value(entry(10, "2026-08-30T12:00:00Z")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 10,
                "totalQuestions": 10,
                "difficulty": "easy",
                "date": "2026-08-30T12:00:00Z"
            })
        );
    }
}
