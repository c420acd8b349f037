//! The remote question source.
//!
//! One GET per quiz start against the Open Trivia endpoint. The body
//! carries its own `response_code` on top of the HTTP status; anything but
//! code 0 with a full batch means no usable questions, and the caller gets
//! an error instead of a partial result.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use trivia_core::question::RawQuestion;
use trivia_core::types::{Difficulty, QUESTION_COUNT};

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}")]
    HttpStatus { status: reqwest::StatusCode },
    #[error("trivia API returned response code {code}")]
    Api { code: i64 },
    #[error("no questions for difficulty '{difficulty}' (got {got}, wanted {wanted})")]
    NoQuestions {
        difficulty: Difficulty,
        got: usize,
        wanted: usize,
    },
}

impl SourceError {
    /// Message shown on the start screen when a load fails.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::NoQuestions { difficulty, .. } => format!(
                "No questions available for '{difficulty}' right now. Try another difficulty."
            ),
            SourceError::Api { .. } => {
                "The trivia service could not produce a question batch. Try again.".to_string()
            }
            SourceError::Request(_) | SourceError::HttpStatus { .. } => {
                "Could not reach the trivia service. Check your connection and try again."
                    .to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

/// Seam between the session service and whatever produces question batches;
/// tests substitute a canned implementation.
pub trait QuestionSource {
    async fn fetch(&self, difficulty: Difficulty) -> Result<Vec<RawQuestion>, SourceError>;
}

#[derive(Debug, Clone)]
pub struct OpenTriviaClient {
    client: reqwest::Client,
    api_url: String,
}

impl OpenTriviaClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

impl QuestionSource for OpenTriviaClient {
    async fn fetch(&self, difficulty: Difficulty) -> Result<Vec<RawQuestion>, SourceError> {
        debug!(%difficulty, url = %self.api_url, "fetching question batch");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("amount", QUESTION_COUNT.to_string()),
                ("difficulty", difficulty.to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus { status });
        }

        let body: ApiResponse = response.json().await?;
        validate_batch(difficulty, body)
    }
}

/// Applies the source contract to a decoded body: code 0 and a full batch,
/// or no batch at all.
fn validate_batch(
    difficulty: Difficulty,
    body: ApiResponse,
) -> Result<Vec<RawQuestion>, SourceError> {
    if body.response_code != 0 {
        return Err(SourceError::Api {
            code: body.response_code,
        });
    }
    if body.results.len() != QUESTION_COUNT {
        return Err(SourceError::NoQuestions {
            difficulty,
            got: body.results.len(),
            wanted: QUESTION_COUNT,
        });
    }
    Ok(body.results)
}
