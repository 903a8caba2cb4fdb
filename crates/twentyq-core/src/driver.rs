//! The game driver: one request/response cycle per user action.
//!
//! `GameDriver` owns the session state and the view bundle, and sequences
//! the choreography of a round: busy placeholder, frontend pulse, backend
//! call, optional AI dwell, dashboard repaint, final panel. Whatever
//! happens — success, application error, transport fault — the round
//! settles with the input-wait indicator restored and the busy marker
//! cleared.

use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::AnswerBackend;
use crate::dashboard::DashboardModel;
use crate::error::BackendError;
use crate::session::{GameSession, PhaseEvent, TurnRecord};
use crate::view::{FlowNode, GameView, flash_node};
use twentyq_types::TurnResponse;

/// Fixed text shown in the question area while a round is in flight.
pub const THINKING_PLACEHOLDER: &str = "Analyzing the answer...";

/// Shown when a 2xx response carries no question and no final guess.
pub const QUESTION_FALLBACK: &str = "No question received.";

/// The answer token that starts a fresh game.
pub const START_ANSWER: &str = "start";

/// Dwell times for the simulated data-flow animation.
#[derive(Debug, Clone, Copy)]
pub struct FlowTiming {
    /// Length of a frontend node pulse.
    pub frontend_pulse: Duration,
    /// Minimum time the AI node stays lit when the backend used the model.
    pub ai_dwell: Duration,
}

impl Default for FlowTiming {
    fn default() -> Self {
        Self {
            frontend_pulse: Duration::from_millis(300),
            ai_dwell: Duration::from_secs(1),
        }
    }
}

impl FlowTiming {
    /// All-zero timings, for tests and `--no-animation` runs.
    pub fn zero() -> Self {
        Self {
            frontend_pulse: Duration::ZERO,
            ai_dwell: Duration::ZERO,
        }
    }
}

/// How a settled round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A new question is on screen.
    Question,
    /// The backend delivered its final guess.
    Final,
    /// Application-level failure (non-2xx); server text shown.
    BackendRejected,
    /// Transport-level failure or timeout; connectivity text shown.
    ConnectionFailed,
    /// A newer submission superseded this one; nothing was repainted.
    Superseded,
}

/// Drives one game session against a backend, painting through a view.
pub struct GameDriver<B, V> {
    backend: B,
    view: V,
    session: GameSession,
    timing: FlowTiming,
}

impl<B: AnswerBackend, V: GameView> GameDriver<B, V> {
    pub fn new(backend: B, view: V, timing: FlowTiming) -> Self {
        Self {
            backend,
            view,
            session: GameSession::new(),
            timing,
        }
    }

    pub fn phase(&self) -> crate::session::GamePhase {
        self.session.phase()
    }

    pub fn transcript(&self) -> &[TurnRecord] {
        self.session.transcript()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Starts a new game: zeroes every widget, then submits `start`.
    pub async fn start_game(&mut self) -> RoundOutcome {
        self.reset_widgets();
        self.submit_answer(START_ANSWER).await
    }

    /// Restarts after (or during) a game, additionally dismissing any
    /// lingering final panel before the fresh `start` round.
    pub async fn restart_game(&mut self) -> RoundOutcome {
        self.start_game().await
    }

    /// Submits one answer and settles the round.
    ///
    /// Guaranteed to leave the input-wait indicator active and the busy
    /// marker cleared, whichever way the round ends.
    pub async fn submit_answer(&mut self, answer: &str) -> RoundOutcome {
        let ticket = self.session.begin_request();
        self.session.apply(PhaseEvent::SubmitStarted);

        self.view.set_input_waiting(false);
        self.view.set_thinking(true);
        self.view.show_question(THINKING_PLACEHOLDER);
        self.view.show_controls(true);

        flash_node(&mut self.view, FlowNode::Frontend, self.timing.frontend_pulse).await;

        self.session.apply(PhaseEvent::BackendCalled);
        self.view.set_backend_waiting(true);

        let result = self.backend.ask(answer).await;

        if !self.session.is_current(ticket) {
            debug!(answer, "round superseded; dropping completion");
            return RoundOutcome::Superseded;
        }

        match result {
            Ok(turn) => self.apply_turn(answer, turn).await,
            Err(err) => self.apply_failure(err),
        }
    }

    async fn apply_turn(&mut self, answer: &str, turn: TurnResponse) -> RoundOutcome {
        self.view.set_backend_waiting(false);
        self.view.set_thinking(false);

        if turn.ai_used {
            self.session.apply(PhaseEvent::AiPulse);
            match turn.reasoning.as_deref() {
                Some(reasoning) => self.view.show_reasoning(reasoning),
                None => self.view.clear_reasoning(),
            }
            flash_node(&mut self.view, FlowNode::Ai, self.timing.ai_dwell).await;
        } else {
            self.view.clear_reasoning();
        }

        flash_node(&mut self.view, FlowNode::Frontend, self.timing.frontend_pulse).await;

        self.view.render_dashboard(&DashboardModel::project(&turn));
        self.session.record_answer(answer);

        if turn.final_round {
            if let Some(final_guess) = &turn.final_guess {
                self.view.show_final(final_guess);
                self.session.apply(PhaseEvent::FinalShown);
                self.view.set_input_waiting(true);
                return RoundOutcome::Final;
            }
        }

        // Not a (usable) final round: make sure no stale panel lingers.
        self.view.hide_final();

        match turn.question.as_deref() {
            Some(question) => {
                self.view.show_question(question);
                self.session.set_pending_question(question);
            }
            None => self.view.show_question(QUESTION_FALLBACK),
        }

        self.session.apply(PhaseEvent::ResponseRendered);
        self.view.set_input_waiting(true);
        RoundOutcome::Question
    }

    fn apply_failure(&mut self, err: BackendError) -> RoundOutcome {
        warn!(error = %err, "answer round failed");

        self.view.set_backend_waiting(false);
        self.view.set_thinking(false);
        self.view.show_error(&err.user_message());
        self.session.apply(PhaseEvent::RoundFailed);
        self.view.set_input_waiting(true);

        if err.is_connectivity() {
            RoundOutcome::ConnectionFailed
        } else {
            RoundOutcome::BackendRejected
        }
    }

    /// Returns every widget to its zero state: confidence 0, remaining
    /// unknown, placeholder guess row, hidden panels.
    fn reset_widgets(&mut self) {
        self.session.reset();
        self.view.hide_final();
        self.view.clear_reasoning();
        self.view.show_controls(false);
        self.view.set_thinking(false);
        self.view.set_backend_waiting(false);
        self.view.render_dashboard(&DashboardModel::zero());
        self.view.set_input_waiting(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GamePhase;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use twentyq_types::FinalGuess;

    struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<TurnResponse, BackendError>>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<TurnResponse, BackendError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    #[async_trait]
    impl AnswerBackend for ScriptedBackend {
        async fn ask(&self, _answer: &str) -> Result<TurnResponse, BackendError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("backend asked more times than scripted")
        }
    }

    #[derive(Default)]
    struct RecordingView {
        input_waiting: bool,
        backend_waiting: bool,
        thinking: bool,
        controls: bool,
        question: String,
        errors: Vec<String>,
        dashboards: Vec<DashboardModel>,
        reasoning: Option<String>,
        final_guess: Option<FinalGuess>,
        pulses: Vec<(FlowNode, bool)>,
    }

    impl GameView for RecordingView {
        fn set_input_waiting(&mut self, active: bool) {
            self.input_waiting = active;
        }
        fn set_backend_waiting(&mut self, active: bool) {
            self.backend_waiting = active;
        }
        fn set_node_active(&mut self, node: FlowNode, active: bool) {
            self.pulses.push((node, active));
        }
        fn show_question(&mut self, text: &str) {
            self.question = text.to_string();
        }
        fn set_thinking(&mut self, active: bool) {
            self.thinking = active;
        }
        fn show_controls(&mut self, visible: bool) {
            self.controls = visible;
        }
        fn render_dashboard(&mut self, model: &DashboardModel) {
            self.dashboards.push(model.clone());
        }
        fn show_reasoning(&mut self, text: &str) {
            self.reasoning = Some(text.to_string());
        }
        fn clear_reasoning(&mut self) {
            self.reasoning = None;
        }
        fn show_final(&mut self, guess: &FinalGuess) {
            self.final_guess = Some(guess.clone());
        }
        fn hide_final(&mut self) {
            self.final_guess = None;
        }
        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
            self.question = message.to_string();
        }
    }

    fn driver(
        replies: Vec<Result<TurnResponse, BackendError>>,
    ) -> GameDriver<ScriptedBackend, RecordingView> {
        GameDriver::new(
            ScriptedBackend::new(replies),
            RecordingView::default(),
            FlowTiming::zero(),
        )
    }

    fn turn(json: &str) -> TurnResponse {
        serde_json::from_str(json).unwrap()
    }

    fn assert_settled(view: &RecordingView) {
        assert!(view.input_waiting, "input-wait must be restored");
        assert!(!view.thinking, "busy marker must be cleared");
        assert!(!view.backend_waiting);
    }

    #[tokio::test]
    async fn plain_round_renders_question_and_dashboard() {
        let mut driver = driver(vec![Ok(turn(
            r#"{"question": "Is it alive?", "confidence": 42, "remaining": 512,
                "guesses": ["Cat", "Dog"], "ai_used": false}"#,
        ))]);

        let outcome = driver.submit_answer("yes").await;

        assert_eq!(outcome, RoundOutcome::Question);
        let view = driver.view();
        assert_eq!(view.question, "Is it alive?");
        let dash = view.dashboards.last().unwrap();
        assert_eq!(dash.confidence, 42.0);
        assert_eq!(dash.remaining, "512");
        assert_eq!(dash.guesses.len(), 2);
        assert_eq!(dash.guesses[0].name, "Cat");
        assert_eq!(dash.guesses[0].confidence, None);
        assert_eq!(dash.guesses[1].name, "Dog");
        // Frontend pulsed before and after the call; the AI node never lit.
        assert_eq!(
            view.pulses,
            vec![
                (FlowNode::Frontend, true),
                (FlowNode::Frontend, false),
                (FlowNode::Frontend, true),
                (FlowNode::Frontend, false),
            ]
        );
        assert_settled(view);
        assert_eq!(driver.phase(), GamePhase::Rendered);
    }

    #[tokio::test]
    async fn ai_round_dwells_on_the_ai_node_and_surfaces_reasoning() {
        let mut driver = driver(vec![Ok(turn(
            r#"{"question": "Is it a scientist?", "ai_used": true,
                "reasoning": "Narrowed to historical figures."}"#,
        ))]);

        driver.submit_answer("yes").await;

        let view = driver.view();
        assert!(view.pulses.contains(&(FlowNode::Ai, true)));
        assert!(view.pulses.contains(&(FlowNode::Ai, false)));
        assert_eq!(
            view.reasoning.as_deref(),
            Some("Narrowed to historical figures.")
        );
        assert_settled(view);
    }

    #[tokio::test]
    async fn final_round_shows_the_panel_and_placeholder_list() {
        let mut driver = driver(vec![Ok(turn(
            r#"{"final": true, "final_guess": {"name": "Einstein", "confidence": 97},
                "confidence": 97, "remaining": 1, "guesses": []}"#,
        ))]);

        let outcome = driver.submit_answer("yes").await;

        assert_eq!(outcome, RoundOutcome::Final);
        let view = driver.view();
        let final_guess = view.final_guess.as_ref().unwrap();
        assert_eq!(final_guess.name, "Einstein");
        assert_eq!(final_guess.confidence, Some(97.0));
        let dash = view.dashboards.last().unwrap();
        assert_eq!(dash.confidence, 97.0);
        assert_eq!(dash.guesses.len(), 1);
        assert!(dash.guesses[0].is_placeholder());
        assert_settled(view);
        assert_eq!(driver.phase(), GamePhase::Final);
    }

    #[tokio::test]
    async fn final_flag_without_guess_renders_as_a_normal_turn() {
        let mut driver = driver(vec![Ok(turn(
            r#"{"final": true, "question": "Is it a person?"}"#,
        ))]);

        let outcome = driver.submit_answer("yes").await;

        assert_eq!(outcome, RoundOutcome::Question);
        assert!(driver.view().final_guess.is_none());
        assert_eq!(driver.phase(), GamePhase::Rendered);
    }

    #[tokio::test]
    async fn backend_rejection_shows_server_text_and_skips_the_dashboard() {
        let mut driver = driver(vec![Err(BackendError::Api {
            status: 400,
            message: Some("Session expired".to_string()),
        })]);

        let outcome = driver.submit_answer("yes").await;

        assert_eq!(outcome, RoundOutcome::BackendRejected);
        let view = driver.view();
        assert_eq!(view.question, "Session expired");
        assert!(view.dashboards.is_empty(), "no dashboard repaint on error");
        assert_settled(view);
    }

    #[tokio::test]
    async fn transport_failure_shows_the_connectivity_message() {
        let mut driver = driver(vec![Err(BackendError::transport("connection refused"))]);

        let outcome = driver.submit_answer("yes").await;

        assert_eq!(outcome, RoundOutcome::ConnectionFailed);
        let view = driver.view();
        assert_eq!(view.question, crate::error::CONNECTIVITY_MESSAGE);
        assert!(view.dashboards.is_empty());
        assert_settled(view);
    }

    #[tokio::test]
    async fn every_outcome_settles_with_input_waiting() {
        let replies = vec![
            Ok(turn(r#"{"question": "Q1"}"#)),
            Err(BackendError::Api {
                status: 500,
                message: None,
            }),
            Err(BackendError::Timeout { seconds: 30 }),
        ];
        let mut driver = driver(replies);

        for _ in 0..3 {
            driver.submit_answer("maybe").await;
            assert_settled(driver.view());
            assert!(driver.phase().input_waiting());
        }
    }

    #[tokio::test]
    async fn start_game_zeroes_widgets_before_the_first_round() {
        let mut driver = driver(vec![Ok(turn(r#"{"question": "Think of an object. Ready?"}"#))]);

        let outcome = driver.start_game().await;

        assert_eq!(outcome, RoundOutcome::Question);
        let view = driver.view();
        // First repaint is the zero state, then the projected response.
        assert_eq!(view.dashboards.len(), 2);
        assert_eq!(view.dashboards[0], DashboardModel::zero());
        assert!(view.controls);
        // "start" had no preceding question, so nothing is in the log yet.
        assert!(driver.transcript().is_empty());
    }

    #[tokio::test]
    async fn answers_accumulate_in_the_transcript() {
        let mut driver = driver(vec![
            Ok(turn(r#"{"question": "Is it alive?"}"#)),
            Ok(turn(r#"{"question": "Is it a mammal?"}"#)),
        ]);

        driver.start_game().await;
        driver.submit_answer("yes").await;

        let transcript = driver.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].question, "Is it alive?");
        assert_eq!(transcript[0].answer, "yes");
    }

    #[tokio::test]
    async fn restart_dismisses_the_final_panel_and_clears_the_log() {
        let mut driver = driver(vec![
            Ok(turn(r#"{"question": "Is it alive?"}"#)),
            Ok(turn(
                r#"{"final": true, "final_guess": {"name": "Einstein", "confidence": 97}}"#,
            )),
            Ok(turn(r#"{"question": "Think of an object. Ready?"}"#)),
        ]);

        driver.start_game().await;
        driver.submit_answer("yes").await;
        assert!(driver.view().final_guess.is_some());

        let outcome = driver.restart_game().await;

        assert_eq!(outcome, RoundOutcome::Question);
        assert!(driver.view().final_guess.is_none());
        assert!(driver.transcript().is_empty());
        assert_eq!(driver.phase(), GamePhase::Rendered);
    }

    #[tokio::test]
    async fn a_following_non_final_render_hides_the_panel() {
        // Defensive path: the backend reported final, the player kept going.
        let mut driver = driver(vec![
            Ok(turn(
                r#"{"final": true, "final_guess": {"name": "Cat", "confidence": 99}}"#,
            )),
            Ok(turn(r#"{"question": "Is it bigger than a breadbox?"}"#)),
        ]);

        driver.start_game().await;
        assert!(driver.view().final_guess.is_some());

        driver.start_game().await;
        assert!(driver.view().final_guess.is_none());
    }

    #[tokio::test]
    async fn empty_success_body_still_renders_something() {
        let mut driver = driver(vec![Ok(TurnResponse::default())]);

        let outcome = driver.submit_answer("yes").await;

        assert_eq!(outcome, RoundOutcome::Question);
        let view = driver.view();
        assert_eq!(view.question, QUESTION_FALLBACK);
        let dash = view.dashboards.last().unwrap();
        assert_eq!(dash.confidence, 0.0);
        assert_eq!(dash.remaining, "Unknown");
        assert_settled(view);
    }
}
