//! The session boundary handed to the presentation layer.
//!
//! `QuizService` composes the state machine with the question source, the
//! countdown timer and the ledger. Every timer arm bumps a monotonically
//! increasing epoch; timer events and fetched batches carrying an older
//! epoch belong to a superseded session or question and are dropped.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use trivia_core::highscores::HighScoreEntry;
use trivia_core::question::normalize_questions;
use trivia_core::session::{QuizAction, QuizSession, TransitionError};
use trivia_core::types::{Difficulty, QUESTION_TIME_SECS};

use crate::ledger::ScoreLedger;
use crate::source::QuestionSource;
use crate::timer::{QuestionTimer, TimerEvent};

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct QuizService<S> {
    session: QuizSession,
    source: S,
    ledger: ScoreLedger,
    epoch: u64,
    timer: Option<QuestionTimer>,
    events: mpsc::Sender<TimerEvent>,
}

impl<S: QuestionSource> QuizService<S> {
    /// Builds the service and the event stream the presentation layer must
    /// drain and feed back through [`QuizService::handle_timer_event`].
    pub fn new(source: S, ledger: ScoreLedger) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (events, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let service = Self {
            session: QuizSession::new(),
            source,
            ledger,
            epoch: 0,
            timer: None,
            events,
        };
        (service, receiver)
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn high_scores(&self) -> Vec<HighScoreEntry> {
        self.ledger.load()
    }

    /// Starts a fresh session: discards prior state, fetches one batch,
    /// and either enters the quiz or records a user-facing error. A batch
    /// arriving for an epoch that has moved on is discarded.
    pub async fn start(&mut self, difficulty: Difficulty) -> Result<(), TransitionError> {
        self.disarm_timer();
        self.session.apply(QuizAction::Start { difficulty })?;

        let epoch = self.epoch;
        info!(%difficulty, "starting quiz");

        match self.source.fetch(difficulty).await {
            Ok(batch) if epoch == self.epoch => {
                let questions = normalize_questions(batch, &mut rand::thread_rng());
                self.session.apply(QuizAction::QuestionsLoaded { questions })?;
                self.arm_timer();
            }
            Ok(_) => {
                debug!(epoch, current = self.epoch, "discarding stale question batch");
            }
            Err(err) if epoch == self.epoch => {
                warn!(error = %err, "question fetch failed");
                self.session.apply(QuizAction::LoadFailed {
                    message: err.user_message(),
                })?;
            }
            Err(err) => {
                debug!(error = %err, "stale fetch failure ignored");
            }
        }

        Ok(())
    }

    pub fn select_answer(&mut self, answer: impl Into<String>) -> Result<(), TransitionError> {
        self.session.apply(QuizAction::SelectAnswer {
            answer: answer.into(),
        })
    }

    pub fn next(&mut self) -> Result<(), TransitionError> {
        self.session.apply(QuizAction::Next)?;
        self.disarm_timer();
        self.arm_timer();
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), TransitionError> {
        self.session.apply(QuizAction::Previous)?;
        self.disarm_timer();
        self.arm_timer();
        Ok(())
    }

    /// Restarts the current question's countdown from the full duration.
    pub fn reset_timer(&mut self) -> Result<(), TransitionError> {
        self.session.apply(QuizAction::ResetTimer)?;
        self.disarm_timer();
        self.arm_timer();
        Ok(())
    }

    /// Completes the session, computes the score and writes the ledger.
    pub fn finish(&mut self) -> Result<(), TransitionError> {
        self.session.apply(QuizAction::Finish)?;
        self.disarm_timer();

        if let Err(err) = self.ledger.record(&self.session) {
            // Losing a high score is not worth failing the finish over.
            warn!(error = %err, "high-score write failed");
        }

        info!(score = ?self.session.score(), "quiz completed");
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.disarm_timer();
        self.session.apply(QuizAction::Reset)
    }

    /// Feeds one countdown event back into the session. Events from a
    /// superseded epoch are no-ops. Expiry advances to the next question,
    /// or finishes the quiz when the last question timed out.
    pub fn handle_timer_event(&mut self, event: TimerEvent) -> Result<(), TransitionError> {
        if event.epoch() != self.epoch {
            debug!(event = ?event, current = self.epoch, "stale timer event dropped");
            return Ok(());
        }

        match event {
            TimerEvent::Tick { .. } => self.session.apply(QuizAction::DecrementTimer),
            TimerEvent::Expired { .. } => {
                debug!("question timed out");
                if self.session.is_last_question() {
                    self.finish()
                } else {
                    self.next()
                }
            }
        }
    }

    /// Invalidates any armed countdown and everything queued under the old
    /// epoch.
    fn disarm_timer(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn arm_timer(&mut self) {
        self.timer = Some(QuestionTimer::start(
            self.epoch,
            QUESTION_TIME_SECS,
            self.events.clone(),
        ));
    }
}
