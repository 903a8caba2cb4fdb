//! The client-side session aggregate.

use tracing::debug;

use super::ledger::{RequestLedger, RequestTicket};
use super::phase::{GamePhase, PhaseEvent};
use super::transcript::TurnRecord;

/// In-memory state of one game session.
///
/// Holds the authoritative phase, the request ledger, the turn transcript,
/// and the question currently awaiting an answer. Nothing here touches the
/// screen; the driver projects this state onto a `GameView`.
#[derive(Debug, Default)]
pub struct GameSession {
    phase: GamePhase,
    ledger: RequestLedger,
    transcript: Vec<TurnRecord>,
    /// Question currently on screen, paired with the next answer into the
    /// transcript. `None` before the first question and after a reset.
    pending_question: Option<String>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Applies a phase event through the single transition function.
    pub fn apply(&mut self, event: PhaseEvent) -> GamePhase {
        let next = self.phase.transition(event);
        if next != self.phase {
            debug!(from = ?self.phase, to = ?next, ?event, "phase transition");
        }
        self.phase = next;
        next
    }

    /// Starts a new request, superseding any outstanding one.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.ledger.begin()
    }

    /// True while `ticket` has not been superseded.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.ledger.is_current(ticket)
    }

    /// Records the answer to the question currently on screen, if any.
    ///
    /// The `start` submission has no preceding question and records
    /// nothing, mirroring how the backend only logs turns once a question
    /// has been asked.
    pub fn record_answer(&mut self, answer: &str) {
        if let Some(question) = self.pending_question.take() {
            self.transcript.push(TurnRecord::new(question, answer));
        }
    }

    /// Remembers the question the player is now answering.
    pub fn set_pending_question(&mut self, question: impl Into<String>) {
        self.pending_question = Some(question.into());
    }

    pub fn transcript(&self) -> &[TurnRecord] {
        &self.transcript
    }

    /// Returns the session to its blank state. The request ledger keeps
    /// counting so tickets issued before the reset stay superseded.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.transcript.clear();
        self.pending_question = None;
    }
}
