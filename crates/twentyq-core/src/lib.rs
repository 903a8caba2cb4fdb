pub mod backend;
pub mod dashboard;
pub mod driver;
pub mod error;
pub mod session;
pub mod view;

// Re-export the pieces almost every consumer needs
pub use backend::AnswerBackend;
pub use dashboard::DashboardModel;
pub use driver::{FlowTiming, GameDriver, RoundOutcome};
pub use error::BackendError;
pub use session::{GamePhase, GameSession, PhaseEvent};
pub use view::{FlowNode, GameView};
