//! Error types shared across the twentyq workspace.

use thiserror::Error;

/// Fixed message shown for any connectivity-level fault. The client never
/// surfaces transport internals to the player.
pub const CONNECTIVITY_MESSAGE: &str =
    "Cannot reach the backend. Check the connection and try again.";

/// Fallback message for an application-level failure whose body carried no
/// usable `error` string.
pub const GENERIC_BACKEND_ERROR: &str = "Backend error";

/// Failure of one `/ask` round trip.
///
/// Every failure is terminal for its round; there are no retries. The enum
/// distinguishes the three taxonomy levels (transport, timeout,
/// application) so the driver can log them apart, while `user_message`
/// collapses them into the two strings the player ever sees.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network-level fault: unreachable host, refused connection, broken
    /// stream.
    #[error("request failed: {0}")]
    Transport(String),

    /// The round trip exceeded the configured bound.
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {status}")]
    Api {
        status: u16,
        /// Server-supplied `error` string, when the body carried one.
        message: Option<String>,
    },
}

impl BackendError {
    /// Creates a transport error from any displayable source.
    pub fn transport(source: impl std::fmt::Display) -> Self {
        Self::Transport(source.to_string())
    }

    /// The text to show in the question area for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => CONNECTIVITY_MESSAGE.to_string(),
            Self::Api {
                message: Some(text),
                ..
            } => text.clone(),
            Self::Api { message: None, .. } => GENERIC_BACKEND_ERROR.to_string(),
        }
    }

    /// True for connectivity-level faults (transport or timeout).
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }
}
