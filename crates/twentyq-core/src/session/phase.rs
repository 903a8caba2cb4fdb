//! The game-phase state machine.
//!
//! The phase is one authoritative value and every widget state (node
//! highlights, button visibility, busy markers) is a pure projection of
//! it; `transition` is the only way it changes.

use serde::{Deserialize, Serialize};

/// Where the session currently is in one question/answer cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running yet; waiting for `start`.
    #[default]
    Idle,
    /// An answer was submitted; the question area shows the busy
    /// placeholder.
    Thinking,
    /// The network call is in flight.
    BackendPending,
    /// The backend reported `ai_used`; the AI node is dwelling lit.
    AiHighlight,
    /// A question is on screen; waiting for the next answer.
    Rendered,
    /// The backend delivered its final guess; the final panel is up.
    Final,
}

/// Events that drive phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    SubmitStarted,
    BackendCalled,
    AiPulse,
    ResponseRendered,
    FinalShown,
    RoundFailed,
    Reset,
}

impl GamePhase {
    /// Applies an event, returning the next phase.
    ///
    /// Invalid combinations leave the phase unchanged; the caller decides
    /// whether that is worth a log line.
    pub fn transition(self, event: PhaseEvent) -> GamePhase {
        use GamePhase::*;
        use PhaseEvent::*;

        match (self, event) {
            (_, Reset) => Idle,
            (Idle | Rendered, SubmitStarted) => Thinking,
            (Thinking, BackendCalled) => BackendPending,
            (BackendPending, AiPulse) => AiHighlight,
            (BackendPending | AiHighlight, ResponseRendered) => Rendered,
            (BackendPending | AiHighlight, FinalShown) => Final,
            (Thinking | BackendPending | AiHighlight, RoundFailed) => Rendered,
            _ => self,
        }
    }

    /// The input-wait indicator is lit exactly in these phases.
    pub fn input_waiting(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Rendered | GamePhase::Final)
    }

    /// Answer controls accept input only in these phases. `Final` is
    /// excluded: after the final guess only `start` (a fresh game) is
    /// meaningful.
    pub fn controls_enabled(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Rendered)
    }

    /// True while a round is being worked on.
    pub fn busy(self) -> bool {
        matches!(
            self,
            GamePhase::Thinking | GamePhase::BackendPending | GamePhase::AiHighlight
        )
    }
}
