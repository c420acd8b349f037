//! Question normalization.
//!
//! The trivia API delivers HTML-entity-encoded text with the correct answer
//! split from the incorrect ones. Normalization decodes every text field,
//! merges the answers into a single option set, shuffles that set once with
//! a uniform Fisher–Yates permutation, and assigns a positional identifier.
//! The option order is fixed for the rest of the session.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One multiple-choice record as delivered by the question source.
///
/// All text fields may contain HTML character entities.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

/// A normalized, immutable question.
///
/// Invariant: `answer` is always an element of `options`. The `id` is
/// positional and unique within one session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub question_type: Option<String>,
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Turns a raw batch into session-ready questions.
///
/// The caller supplies the random source; production code passes
/// `rand::thread_rng()`, tests pass a seeded generator.
pub fn normalize_questions<R: Rng + ?Sized>(raw: Vec<RawQuestion>, rng: &mut R) -> Vec<Question> {
    raw.into_iter()
        .enumerate()
        .map(|(index, item)| {
            let answer = decode(&item.correct_answer);
            let mut options = Vec::with_capacity(item.incorrect_answers.len() + 1);
            options.push(answer.clone());
            options.extend(item.incorrect_answers.iter().map(|text| decode(text)));
            options.shuffle(rng);

            Question {
                id: format!("question-{index}"),
                text: decode(&item.question),
                options,
                answer,
                category: item.category,
                difficulty: item.difficulty,
                question_type: item.question_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn raw(question: &str, correct: &str, incorrect: &[&str]) -> RawQuestion {
        RawQuestion {
            category: Some("General Knowledge".to_string()),
            question_type: Some("multiple".to_string()),
            difficulty: Some("easy".to_string()),
            question: question.to_string(),
            correct_answer: correct.to_string(),
            incorrect_answers: incorrect.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_decodes_entities_everywhere() {
        let batch = vec![raw(
            "Who said &quot;veni, vidi, vici&quot;?",
            "Julius Caesar",
            &["Brutus &amp; Cassius", "Pompey", "Mark Antony"],
        )];
        let questions = normalize_questions(batch, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(questions[0].text, "Who said \"veni, vidi, vici\"?");
        assert!(questions[0]
            .options
            .contains(&"Brutus & Cassius".to_string()));
    }

    #[test]
    fn test_answer_present_in_options() {
        let batch = vec![raw("Q?", "right", &["a", "b", "c"])];
        let questions = normalize_questions(batch, &mut ChaCha8Rng::seed_from_u64(7));

        assert_eq!(questions[0].answer, "right");
        assert_eq!(questions[0].options.len(), 4);
        assert_eq!(
            questions[0]
                .options
                .iter()
                .filter(|o| *o == "right")
                .count(),
            1
        );
    }

    #[test]
    fn test_positional_ids() {
        let batch = vec![raw("a?", "1", &[]), raw("b?", "2", &[]), raw("c?", "3", &[])];
        let questions = normalize_questions(batch, &mut ChaCha8Rng::seed_from_u64(3));
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["question-0", "question-1", "question-2"]);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // With 4 options over many trials, each option should land in each
        // position about 1/4 of the time. Bounds are loose on purpose.
        const TRIALS: usize = 8_000;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [[0usize; 4]; 4];

        for _ in 0..TRIALS {
            let batch = vec![raw("Q?", "0", &["1", "2", "3"])];
            let questions = normalize_questions(batch, &mut rng);
            for (position, option) in questions[0].options.iter().enumerate() {
                let which: usize = option.parse().unwrap();
                counts[position][which] += 1;
            }
        }

        let expected = TRIALS as f64 / 4.0;
        for row in counts {
            for count in row {
                let ratio = count as f64 / expected;
                assert!(
                    (0.85..1.15).contains(&ratio),
                    "position frequency off: {counts:?}"
                );
            }
        }
    }

    #[test]
    fn test_wire_deserialization() {
        let payload = r#"{
            "category": "Science",
            "type": "multiple",
            "difficulty": "hard",
            "question": "What is 2+2?",
            "correct_answer": "4",
            "incorrect_answers": ["3", "5", "22"]
        }"#;
        let raw: RawQuestion = serde_json::from_str(payload).unwrap();
        assert_eq!(raw.question_type.as_deref(), Some("multiple"));
        assert_eq!(raw.incorrect_answers.len(), 3);
    }
}
