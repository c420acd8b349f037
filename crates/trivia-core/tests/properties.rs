//! Property-Based Tests for the quiz domain logic
//!
//! Tests the following invariants:
//! - Normalization is a permutation: option multiset is preserved
//! - The decoded correct answer always appears in the shuffled options
//! - Question ids are positional
//! - The high-score list never exceeds its cap and stays sorted descending
//!   under any sequence of writes

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use trivia_core::highscores::{merge_entry, HighScoreEntry};
use trivia_core::question::{normalize_questions, RawQuestion};
use trivia_core::types::{Difficulty, MAX_HIGH_SCORES};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ?!']{1,40}"
}

fn arb_raw_question() -> impl Strategy<Value = RawQuestion> {
    (
        arb_text(),
        arb_text(),
        prop::collection::vec(arb_text(), 0..5),
    )
        .prop_map(|(question, correct_answer, incorrect_answers)| RawQuestion {
            category: Some("General".to_string()),
            question_type: Some("multiple".to_string()),
            difficulty: Some("easy".to_string()),
            question,
            correct_answer,
            incorrect_answers,
        })
}

fn arb_entry() -> impl Strategy<Value = HighScoreEntry> {
    ((0u32..=10), (0u32..=3_000_000u32)).prop_map(|(score, stamp)| HighScoreEntry {
        score,
        total_questions: 10,
        difficulty: Difficulty::Easy,
        date: format!("2026-01-01T00:00:{stamp:02}Z"),
    })
}

fn multiset(items: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.as_str()).or_insert(0) += 1;
    }
    counts
}

// ============================================================================
// Normalizer properties
// ============================================================================

proptest! {
    #[test]
    fn shuffle_is_a_permutation(batch in prop::collection::vec(arb_raw_question(), 1..12), seed in any::<u64>()) {
        let expected: Vec<Vec<String>> = batch
            .iter()
            .map(|raw| {
                let mut all = vec![raw.correct_answer.clone()];
                all.extend(raw.incorrect_answers.iter().cloned());
                all
            })
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let questions = normalize_questions(batch, &mut rng);

        prop_assert_eq!(questions.len(), expected.len());
        for (question, original) in questions.iter().zip(expected.iter()) {
            // The generated texts contain no HTML entities, so decoding is
            // the identity and the multisets must match exactly.
            prop_assert_eq!(multiset(&question.options), multiset(original));
            prop_assert!(question.options.contains(&question.answer));
        }
    }

    #[test]
    fn ids_are_positional(batch in prop::collection::vec(arb_raw_question(), 1..12), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let questions = normalize_questions(batch, &mut rng);
        for (index, question) in questions.iter().enumerate() {
            prop_assert_eq!(&question.id, &format!("question-{index}"));
        }
    }
}

// ============================================================================
// Ledger properties
// ============================================================================

proptest! {
    #[test]
    fn ledger_capped_and_sorted(writes in prop::collection::vec(arb_entry(), 0..25)) {
        let mut entries = Vec::new();
        for entry in writes {
            entries = merge_entry(entries, entry);

            prop_assert!(entries.len() <= MAX_HIGH_SCORES);
            prop_assert!(entries.windows(2).all(|pair| pair[0].score >= pair[1].score));
        }
    }
}
