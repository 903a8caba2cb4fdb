//! The `/ask` HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use twentyq_core::backend::AnswerBackend;
use twentyq_core::error::BackendError;
use twentyq_types::{AnswerRequest, ErrorBody, TurnResponse};

/// `AnswerBackend` implementation over HTTP.
///
/// One POST per answer, no retries: a failed round simply re-arms the UI
/// for another attempt. The configured timeout bounds the whole round trip
/// so a hung server can never leave the client thinking forever.
pub struct HttpAnswerBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAnswerBackend {
    /// Creates a client for the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(ClientConfig::default().timeout_secs),
        }
    }

    /// Overrides the round-trip timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone()).with_timeout(config.timeout())
    }

    fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url)
    }

    fn map_transport(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            BackendError::transport(err)
        }
    }
}

#[async_trait]
impl AnswerBackend for HttpAnswerBackend {
    async fn ask(&self, answer: &str) -> Result<TurnResponse, BackendError> {
        let url = self.ask_url();
        debug!(url = %url, answer, "submitting answer");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&AnswerRequest::new(answer))
            .send()
            .await
            .map_err(|err| self.map_transport(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.map_transport(err))?;

        if !status.is_success() {
            // Any body shape is tolerated; only a string `error` field is
            // ever surfaced.
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: parsed.error,
            });
        }

        match serde_json::from_str::<TurnResponse>(&body) {
            Ok(turn) => {
                debug!(
                    final_round = turn.final_round,
                    ai_used = turn.ai_used,
                    "turn received"
                );
                Ok(turn)
            }
            Err(err) => {
                // Malformed 2xx body degrades to the empty turn rather than
                // failing the round.
                warn!(error = %err, "malformed response body; treating as empty");
                Ok(TurnResponse::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let backend = HttpAnswerBackend::new("http://127.0.0.1:5000/");
        assert_eq!(backend.ask_url(), "http://127.0.0.1:5000/ask");
    }

    #[test]
    fn config_carries_url_and_timeout() {
        let config = ClientConfig {
            base_url: "http://game.local:8080/".to_string(),
            timeout_secs: 5,
            ..ClientConfig::default()
        };
        let backend = HttpAnswerBackend::from_config(&config);
        assert_eq!(backend.ask_url(), "http://game.local:8080/ask");
        assert_eq!(backend.timeout, Duration::from_secs(5));
    }
}
