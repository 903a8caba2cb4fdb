//! The view seam and the flow-diagram vocabulary.
//!
//! `GameView` is the bundle of widget handles the driver paints through.
//! The concrete terminal view lives in the frontend crate; tests substitute
//! recording implementations. Every method has a no-op default, so a view
//! that lacks a widget simply ignores the call.

use std::time::Duration;

use crate::dashboard::DashboardModel;
use twentyq_types::FinalGuess;

/// The four stages of the simulated data-flow pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowNode {
    Input,
    Frontend,
    Backend,
    Ai,
}

impl FlowNode {
    pub fn label(self) -> &'static str {
        match self {
            FlowNode::Input => "input",
            FlowNode::Frontend => "frontend",
            FlowNode::Backend => "backend",
            FlowNode::Ai => "ai",
        }
    }
}

/// Widget handles the driver projects session state onto.
///
/// Constructed once at startup and passed in explicitly; renderers never
/// reach for ambient state.
pub trait GameView {
    /// Persistent highlight on the input node ("your turn").
    fn set_input_waiting(&mut self, _active: bool) {}

    /// Persistent highlight on the backend node while a call is in flight.
    fn set_backend_waiting(&mut self, _active: bool) {}

    /// Raw node toggle used by the timed pulses.
    fn set_node_active(&mut self, _node: FlowNode, _active: bool) {}

    /// Replaces the question area text.
    fn show_question(&mut self, _text: &str) {}

    /// Marks the question area visually busy (the "thinking" state).
    fn set_thinking(&mut self, _active: bool) {}

    /// Reveals or hides the answer controls hint.
    fn show_controls(&mut self, _visible: bool) {}

    /// Repaints the dashboard from a normalized model.
    fn render_dashboard(&mut self, _model: &DashboardModel) {}

    /// Surfaces the backend's AI reasoning text in the side panel.
    fn show_reasoning(&mut self, _text: &str) {}

    fn clear_reasoning(&mut self) {}

    /// Shows the final-guess panel.
    fn show_final(&mut self, _guess: &FinalGuess) {}

    /// Hides the final-guess panel if it is up.
    fn hide_final(&mut self) {}

    /// Replaces the question area with an error message.
    fn show_error(&mut self, _message: &str) {}
}

/// Marks a node active, dwells, then clears it.
///
/// This is the whole of the flow-visualizer animation utility; persistent
/// states go through `set_input_waiting` / `set_backend_waiting` instead.
pub async fn flash_node<V: GameView>(view: &mut V, node: FlowNode, duration: Duration) {
    view.set_node_active(node, true);
    tokio::time::sleep(duration).await;
    view.set_node_active(node, false);
}
