//! Terminal rendering of the game widgets.
//!
//! `TerminalView` is the concrete view-handle bundle: it keeps the current
//! widget states and paints them to stdout as colored blocks. Formatting is
//! split into plain-string helpers so the shapes are testable without ANSI
//! noise; color is applied only at paint time.

use colored::Colorize;

use twentyq_core::dashboard::{DashboardModel, GuessRow};
use twentyq_core::view::{FlowNode, GameView};
use twentyq_types::FinalGuess;

const BAR_CELLS: usize = 20;

/// Stateful terminal view.
///
/// Node toggles repaint the flow line, so a round's choreography shows up
/// as a short animation in the scrollback; the heavier blocks (dashboard,
/// final panel, reasoning) are printed when the driver pushes them.
pub struct TerminalView {
    node_active: [bool; 4],
    input_waiting: bool,
    backend_waiting: bool,
    thinking: bool,
    controls_shown: bool,
    final_shown: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            node_active: [false; 4],
            input_waiting: true,
            backend_waiting: false,
            thinking: false,
            controls_shown: false,
            final_shown: false,
        }
    }

    /// Effective highlight state of the four nodes, combining the timed
    /// pulses with the persistent waiting states.
    fn flow_states(&self) -> [bool; 4] {
        [
            self.node_active[0] || self.input_waiting,
            self.node_active[1],
            self.node_active[2] || self.backend_waiting,
            self.node_active[3],
        ]
    }

    fn paint_flow(&self) {
        let states = self.flow_states();
        let line = [FlowNode::Input, FlowNode::Frontend, FlowNode::Backend, FlowNode::Ai]
            .iter()
            .zip(states)
            .map(|(node, active)| {
                let label = format!("[{}]", node.label());
                if active {
                    label.bright_yellow().bold().to_string()
                } else {
                    label.bright_black().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" → ");
        println!("  {line}");
    }

    fn node_index(node: FlowNode) -> usize {
        match node {
            FlowNode::Input => 0,
            FlowNode::Frontend => 1,
            FlowNode::Backend => 2,
            FlowNode::Ai => 3,
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView for TerminalView {
    fn set_input_waiting(&mut self, active: bool) {
        if self.input_waiting != active {
            self.input_waiting = active;
            self.paint_flow();
        }
    }

    fn set_backend_waiting(&mut self, active: bool) {
        if self.backend_waiting != active {
            self.backend_waiting = active;
            self.paint_flow();
        }
    }

    fn set_node_active(&mut self, node: FlowNode, active: bool) {
        let index = Self::node_index(node);
        if self.node_active[index] != active {
            self.node_active[index] = active;
            self.paint_flow();
        }
    }

    fn show_question(&mut self, text: &str) {
        if self.thinking {
            println!("\n{}", text.yellow().italic());
        } else {
            println!("\n{}", text.bright_cyan().bold());
        }
    }

    fn set_thinking(&mut self, active: bool) {
        self.thinking = active;
    }

    fn show_controls(&mut self, visible: bool) {
        if visible && !self.controls_shown {
            println!(
                "{}",
                "Answer with yes / no / maybe / dontknow".bright_black()
            );
        }
        self.controls_shown = visible;
    }

    fn render_dashboard(&mut self, model: &DashboardModel) {
        println!("{}", "── Dashboard ──────────────────────────".bright_black());
        println!(
            "  Confidence  {} {}",
            confidence_bar(model.confidence).bright_green(),
            format_percent(model.confidence).bright_green().bold()
        );
        println!("  Remaining   {}", model.remaining.bright_white());
        println!("  Guesses");
        for (index, row) in model.guesses.iter().enumerate() {
            if row.is_placeholder() {
                println!("    {}", row.name.bright_black().italic());
            } else {
                println!("    {}", guess_row_line(index, row).bright_white());
            }
        }
        println!("{}", "───────────────────────────────────────".bright_black());
    }

    fn show_reasoning(&mut self, text: &str) {
        println!("{}", "AI reasoning:".bright_magenta());
        for line in text.lines() {
            println!("  {}", line.bright_black());
        }
    }

    fn clear_reasoning(&mut self) {}

    fn show_final(&mut self, guess: &FinalGuess) {
        self.final_shown = true;
        let confidence = guess
            .confidence
            .map(format_percent)
            .unwrap_or_else(|| "?".to_string());
        println!();
        println!("{}", "╔═══════════════════════════════════╗".bright_green());
        println!(
            "{}  {} {}",
            "║".bright_green(),
            "FINAL GUESS:".bright_green().bold(),
            format!("{} ({confidence})", guess.name).bright_white().bold()
        );
        println!("{}", "╚═══════════════════════════════════╝".bright_green());
        println!(
            "{}",
            "Type 'start' to play again, or 'quit' to leave.".bright_black()
        );
    }

    fn hide_final(&mut self) {
        if self.final_shown {
            println!("{}", "(final guess dismissed)".bright_black());
        }
        self.final_shown = false;
    }

    fn show_error(&mut self, message: &str) {
        println!("\n{}", message.red().bold());
    }
}

/// `[########------------]`
fn confidence_bar(confidence: f64) -> String {
    let filled = ((confidence / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}

/// `42` -> `"42%"`, `42.5` -> `"42.5%"`.
fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}%", value as i64)
    } else {
        format!("{value}%")
    }
}

fn guess_row_line(index: usize, row: &GuessRow) -> String {
    match row.confidence {
        Some(confidence) => format!("{}. {}  {}", index + 1, row.name, format_percent(confidence)),
        None => format!("{}. {}", index + 1, row.name),
    }
}
