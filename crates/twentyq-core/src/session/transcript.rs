//! The question/answer turn log.

use serde::{Deserialize, Serialize};

/// One answered question.
///
/// Records the question that was on screen and the answer the player sent
/// for it, with an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The question text the player was answering.
    pub question: String,
    /// The answer token that was sent to the backend.
    pub answer: String,
    /// Timestamp when the answer was submitted (ISO 8601 format).
    pub asked_at: String,
}

impl TurnRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
