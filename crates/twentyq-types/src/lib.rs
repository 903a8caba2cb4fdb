//! Wire contract between the twentyq client and the guessing backend.
//!
//! The backend owns every piece of game logic; these types only describe the
//! JSON it exchanges with the client over `POST /ask`. The server guarantees
//! no field of its response, so decoding is deliberately lenient: absent
//! fields take defaults and a mistyped value degrades to its default rather
//! than failing the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body of `POST /ask`.
///
/// The answer value is a free-form token; validation of the vocabulary
/// (`start`, `yes`, `no`, `maybe`, `dontknow`) is the server's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

impl AnswerRequest {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

/// One turn of the game as reported by the backend.
///
/// `final` is a reserved word in Rust, so the terminal-round flag lives in
/// `final_round` and is renamed on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub question: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub remaining: Option<f64>,
    #[serde(deserialize_with = "lenient_guesses")]
    pub guesses: Vec<GuessEntry>,
    #[serde(deserialize_with = "lenient_flag")]
    pub ai_used: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub reasoning: Option<String>,
    #[serde(rename = "final", deserialize_with = "lenient_flag")]
    pub final_round: bool,
    #[serde(deserialize_with = "lenient_final_guess")]
    pub final_guess: Option<FinalGuess>,
    #[serde(deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

/// One entry of the ranked guess list.
///
/// Early backend revisions sent bare labels, later ones objects with a name
/// and confidence. Anything else still decodes (as `Opaque`) so a single
/// odd entry never poisons the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuessEntry {
    Label(String),
    Detailed(GuessDetail),
    Opaque(Value),
}

/// Object form of a guess entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessDetail {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
}

/// The backend's terminal answer to the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalGuess {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
}

/// Shape of a non-2xx response body. Any other shape is tolerated via the
/// defaults, yielding `error: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    #[serde(deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Truthy-flag decoding: the backend may send a boolean, a number, or a
/// string here. Non-zero and non-empty count as set.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn lenient_guesses<'de, D>(deserializer: D) -> Result<Vec<GuessEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_else(|_| GuessEntry::Opaque(Value::Null)))
        .collect())
}

fn lenient_final_guess<'de, D>(deserializer: D) -> Result<Option<FinalGuess>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
