//! Composition crate for the trivia quiz: configuration, logging, the Open
//! Trivia question source, the per-question countdown, the high-score
//! ledger, and the [`service::QuizService`] session boundary consumed by
//! the presentation layer.

pub mod config;
pub mod ledger;
pub mod logging;
pub mod service;
pub mod source;
pub mod timer;
