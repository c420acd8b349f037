//! The quiz session state machine.
//!
//! One `QuizSession` covers one attempt from start to completion or reset.
//! All mutation goes through [`QuizSession::apply`], which enforces the
//! per-action phase preconditions. Navigation is non-destructive: answers
//! stay visible and replaceable when the user returns to an earlier
//! question, and the score is computed once at `Finish` rather than
//! incrementally, so it is defined exactly when the session is completed.

use thiserror::Error;

use crate::question::Question;
use crate::types::{Difficulty, QUESTION_TIME_SECS};

/// Lifecycle phase of a session: `Idle → Loading → InProgress → Completed`,
/// with `Idle` re-entry on reset or load failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    Idle,
    Loading,
    InProgress,
    Completed,
}

impl QuizPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            QuizPhase::Idle => "IDLE",
            QuizPhase::Loading => "LOADING",
            QuizPhase::InProgress => "IN_PROGRESS",
            QuizPhase::Completed => "COMPLETED",
        }
    }
}

/// Every state transition, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizAction {
    /// Discard any prior state and begin loading at the given difficulty.
    Start { difficulty: Difficulty },
    /// Seed the session with a normalized question batch.
    QuestionsLoaded { questions: Vec<Question> },
    /// The batch could not be fetched; the session must not proceed to
    /// the question view.
    LoadFailed { message: String },
    /// Record (or replace) the answer at the current position.
    SelectAnswer { answer: String },
    Next,
    Previous,
    Finish,
    ResetTimer,
    DecrementTimer,
    Reset,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("action '{action}' is not allowed in phase {phase:?}")]
    InvalidAction {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error("an empty question batch cannot start a quiz")]
    EmptyBatch,
}

/// One quiz attempt.
///
/// Fields are private; reads go through the accessors and writes through
/// [`QuizSession::apply`].
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    phase: QuizPhase,
    difficulty: Difficulty,
    questions: Vec<Question>,
    current_index: Option<usize>,
    answers: Vec<Option<String>>,
    score: Option<u32>,
    time_left: u32,
    error: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: QuizAction) -> Result<(), TransitionError> {
        match action {
            QuizAction::Start { difficulty } => {
                *self = Self {
                    phase: QuizPhase::Loading,
                    difficulty,
                    time_left: QUESTION_TIME_SECS,
                    ..Self::default()
                };
                Ok(())
            }
            QuizAction::QuestionsLoaded { questions } => {
                self.expect_phase(QuizPhase::Loading, "questions_loaded")?;
                if questions.is_empty() {
                    return Err(TransitionError::EmptyBatch);
                }
                self.answers = vec![None; questions.len()];
                self.questions = questions;
                self.current_index = Some(0);
                self.time_left = QUESTION_TIME_SECS;
                self.error = None;
                self.phase = QuizPhase::InProgress;
                Ok(())
            }
            QuizAction::LoadFailed { message } => {
                self.expect_phase(QuizPhase::Loading, "load_failed")?;
                self.error = Some(message);
                self.phase = QuizPhase::Idle;
                Ok(())
            }
            QuizAction::SelectAnswer { answer } => {
                self.expect_phase(QuizPhase::InProgress, "select_answer")?;
                if let Some(index) = self.current_index {
                    self.answers[index] = Some(answer);
                }
                Ok(())
            }
            QuizAction::Next => {
                self.expect_phase(QuizPhase::InProgress, "next")?;
                if let Some(index) = self.current_index {
                    let last = self.questions.len().saturating_sub(1);
                    self.current_index = Some((index + 1).min(last));
                }
                self.time_left = QUESTION_TIME_SECS;
                Ok(())
            }
            QuizAction::Previous => {
                self.expect_phase(QuizPhase::InProgress, "previous")?;
                if let Some(index) = self.current_index {
                    self.current_index = Some(index.saturating_sub(1));
                }
                self.time_left = QUESTION_TIME_SECS;
                Ok(())
            }
            QuizAction::Finish => {
                self.expect_phase(QuizPhase::InProgress, "finish")?;
                self.score = Some(self.correct_count());
                self.phase = QuizPhase::Completed;
                Ok(())
            }
            // Timer actions outside InProgress are deliberate no-ops: a
            // stale tick after navigation or completion must not error.
            QuizAction::ResetTimer => {
                if self.phase == QuizPhase::InProgress {
                    self.time_left = QUESTION_TIME_SECS;
                }
                Ok(())
            }
            QuizAction::DecrementTimer => {
                if self.phase == QuizPhase::InProgress {
                    self.time_left = self.time_left.saturating_sub(1);
                }
                Ok(())
            }
            QuizAction::Reset => {
                *self = Self::default();
                Ok(())
            }
        }
    }

    fn expect_phase(
        &self,
        expected: QuizPhase,
        action: &'static str,
    ) -> Result<(), TransitionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TransitionError::InvalidAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn correct_count(&self) -> u32 {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .filter(|(question, answer)| answer.as_deref() == Some(question.answer.as_str()))
            .count() as u32
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index.and_then(|index| self.questions.get(index))
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    /// The recorded answer at the current position, if any.
    pub fn current_answer(&self) -> Option<&str> {
        self.current_index
            .and_then(|index| self.answers.get(index))
            .and_then(|slot| slot.as_deref())
    }

    /// Defined only after `Finish`; `None` in every other phase.
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QuizPhase::Loading
    }

    pub fn is_completed(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index == Some(self.questions.len() - 1)
    }
}
