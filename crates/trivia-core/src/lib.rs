//! Pure domain logic for the trivia quiz.
//!
//! Everything in this crate is synchronous and I/O-free: the question
//! normalizer, the quiz session state machine, and the high-score merge
//! rules. Fetching questions, timers, and persistence live in `trivia-app`.

pub mod highscores;
pub mod question;
pub mod session;
pub mod types;

pub use highscores::{merge_entry, HighScoreEntry};
pub use question::{normalize_questions, Question, RawQuestion};
pub use session::{QuizAction, QuizPhase, QuizSession, TransitionError};
pub use types::{Difficulty, MAX_HIGH_SCORES, QUESTION_COUNT, QUESTION_TIME_SECS};
