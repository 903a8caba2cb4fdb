//! The backend seam.
//!
//! Declared here rather than in the HTTP crate so the driver (and its
//! tests) depend only on the trait; the reqwest implementation lives in
//! `twentyq-backend`.

use async_trait::async_trait;

use crate::error::BackendError;
use twentyq_types::TurnResponse;

/// The one operation the game consumes from its backend collaborator.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Sends one answer token and returns the backend's next turn.
    async fn ask(&self, answer: &str) -> Result<TurnResponse, BackendError>;
}
