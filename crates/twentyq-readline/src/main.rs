//! twentyq — terminal front end for the 20 Questions guessing backend.
//!
//! The REPL reads one answer per line, drives a full request/response
//! round through the `GameDriver`, and paints the dashboard, flow diagram,
//! and final panel through the `TerminalView`. All game logic lives in the
//! backend; a round trip is one `POST /ask`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use tracing::info;
use tracing_subscriber::EnvFilter;

use twentyq_backend::{ClientConfig, HttpAnswerBackend};
use twentyq_core::driver::FlowTiming;
use twentyq_core::session::{GamePhase, TurnRecord};
use twentyq_core::GameDriver;

mod helper;
mod input;
mod view;

use helper::ReplHelper;
use input::{PlayerInput, classify};
use view::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "twentyq", version, about = "Terminal client for the 20 Questions backend")]
struct Args {
    /// Backend origin, e.g. http://127.0.0.1:5000
    #[arg(long)]
    backend_url: Option<String>,

    /// Bound on one round trip, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Alternate config file (default: ~/.config/twentyq/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the data-flow animation dwell times
    #[arg(long)]
    no_animation: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the painted widgets.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("twentyq=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::resolve_from(args.config.as_deref());
    if let Some(backend_url) = args.backend_url {
        config.base_url = backend_url.trim_end_matches('/').to_string();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    let timing = if args.no_animation {
        FlowTiming::zero()
    } else {
        config.flow_timing()
    };

    info!(backend = %config.base_url, timeout_secs = config.timeout_secs, "client configured");

    let backend = HttpAnswerBackend::from_config(&config);
    let mut driver = GameDriver::new(backend, TerminalView::new(), timing);

    println!("{}", "=== twentyq ===".bright_magenta().bold());
    println!(
        "{}",
        "Think of an object. Type 'start' to begin; answer with yes / no / maybe / dontknow."
            .bright_black()
    );
    println!(
        "{}",
        "'/history' shows this game's turns, '/help' lists commands, 'quit' exits.".bright_black()
    );
    println!("{}", format!("Backend: {}", config.base_url).bright_black());
    println!();

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match classify(trimmed) {
                    PlayerInput::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    PlayerInput::Help => print_help(),
                    PlayerInput::History => print_history(driver.transcript()),
                    PlayerInput::Start => {
                        if driver.phase() == GamePhase::Idle {
                            driver.start_game().await;
                        } else {
                            driver.restart_game().await;
                        }
                    }
                    PlayerInput::Answer(answer) => match driver.phase() {
                        GamePhase::Idle => {
                            println!("{}", "Type 'start' to begin a game.".bright_black());
                        }
                        GamePhase::Final => {
                            println!(
                                "{}",
                                "The game is over. Type 'start' to play again.".bright_black()
                            );
                        }
                        phase if !phase.controls_enabled() => {
                            // A round is still settling; don't race it.
                            println!("{}", "Hold on, still thinking...".bright_black());
                        }
                        _ => {
                            driver.submit_answer(&answer).await;
                        }
                    },
                    PlayerInput::UnknownCommand(command) => {
                        println!(
                            "{}",
                            format!("Unknown command: {command} (try /help)").bright_black()
                        );
                    }
                    PlayerInput::Empty => {}
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("{}", "Commands:".bright_white().bold());
    println!("  {}        start (or restart) a game", "start".green());
    println!(
        "  {}  answer the current question",
        "yes / no / maybe / dontknow".green()
    );
    println!("  {}     show this game's questions and answers", "/history".bright_cyan());
    println!("  {}        this summary", "/help".bright_cyan());
    println!("  {}         leave", "quit".green());
}

fn print_history(transcript: &[TurnRecord]) {
    if transcript.is_empty() {
        println!("{}", "No turns yet.".bright_black());
        return;
    }
    println!("{}", "This game so far:".bright_white().bold());
    for (index, record) in transcript.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            format!("{}.", index + 1).bright_black(),
            record.question.bright_cyan(),
            "->".bright_black(),
            record.answer.green()
        );
    }
}
