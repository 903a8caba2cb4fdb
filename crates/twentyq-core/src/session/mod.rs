//! Session domain module.
//!
//! Everything that makes up the client-side state of one game session:
//!
//! - `phase`: the explicit game-phase state machine (`GamePhase`,
//!   `PhaseEvent`) and its widget projections
//! - `ledger`: request supersession bookkeeping (`RequestLedger`,
//!   `RequestTicket`)
//! - `transcript`: the question/answer turn log (`TurnRecord`)
//! - `model`: the `GameSession` aggregate tying the three together

mod ledger;
mod model;
mod phase;
mod transcript;

pub use ledger::{RequestLedger, RequestTicket};
pub use model::GameSession;
pub use phase::{GamePhase, PhaseEvent};
pub use transcript::TurnRecord;
