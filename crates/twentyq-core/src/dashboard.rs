//! Dashboard normalization.
//!
//! `DashboardModel::project` turns whatever the backend sent into the exact
//! values the widgets display: confidence clamped into [0, 100], the
//! remaining-candidates label grouped or `"Unknown"`, and the guess list
//! normalized row by row. The projection is a pure function, so repainting
//! from the same payload always yields the same screen.

use twentyq_types::{GuessEntry, TurnResponse};

/// Label shown when `remaining` is absent or not a number.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Name substituted for a guess entry with no readable name.
pub const UNKNOWN_GUESS: &str = "Unknown";

/// The single row rendered while the guess list is empty.
pub const PLACEHOLDER_ROW: &str = "Waiting for data...";

/// Normalized dashboard state, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    /// Confidence percentage, clamped into [0, 100].
    pub confidence: f64,
    /// Remaining-candidates label: grouped decimal or `"Unknown"`.
    pub remaining: String,
    /// Guess rows in backend order; never empty (see [`GuessRow::is_placeholder`]).
    pub guesses: Vec<GuessRow>,
}

/// One rendered row of the guess list.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessRow {
    pub name: String,
    /// Per-guess confidence, shown as a percentage suffix when present.
    pub confidence: Option<f64>,
}

impl GuessRow {
    fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_ROW.to_string(),
            confidence: None,
        }
    }

    /// True for the "no data yet" affordance row.
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_ROW && self.confidence.is_none()
    }

    fn from_entry(entry: &GuessEntry) -> Self {
        match entry {
            GuessEntry::Label(name) if !name.trim().is_empty() => Self {
                name: name.clone(),
                confidence: None,
            },
            GuessEntry::Detailed(detail) => Self {
                name: detail
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(UNKNOWN_GUESS)
                    .to_string(),
                confidence: detail.confidence.map(clamp_percent),
            },
            GuessEntry::Label(_) | GuessEntry::Opaque(_) => Self {
                name: UNKNOWN_GUESS.to_string(),
                confidence: None,
            },
        }
    }
}

impl DashboardModel {
    /// The zero state shown before the first response and on game reset.
    pub fn zero() -> Self {
        Self {
            confidence: 0.0,
            remaining: UNKNOWN_LABEL.to_string(),
            guesses: vec![GuessRow::placeholder()],
        }
    }

    /// Projects a backend response onto the dashboard.
    pub fn project(turn: &TurnResponse) -> Self {
        let guesses = if turn.guesses.is_empty() {
            vec![GuessRow::placeholder()]
        } else {
            turn.guesses.iter().map(GuessRow::from_entry).collect()
        };

        Self {
            confidence: clamp_percent(turn.confidence.unwrap_or(0.0)),
            remaining: turn
                .remaining
                .map(group_thousands)
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            guesses,
        }
    }
}

/// Clamps a percentage into [0, 100]; non-finite input collapses to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Formats a count with comma thousands separators: `12000` -> `"12,000"`,
/// `1234.5` -> `"1,234.5"`.
pub fn group_thousands(value: f64) -> String {
    let raw = format!("{value}");
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    // Exponent forms (absurdly large counts) pass through untouched.
    if int_part.is_empty() || int_part.bytes().any(|b| !b.is_ascii_digit()) {
        return raw;
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twentyq_types::{GuessDetail, GuessEntry};

    fn turn(json: &str) -> TurnResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn confidence_is_clamped_into_range() {
        assert_eq!(DashboardModel::project(&turn(r#"{"confidence": 142}"#)).confidence, 100.0);
        assert_eq!(DashboardModel::project(&turn(r#"{"confidence": -7}"#)).confidence, 0.0);
        assert_eq!(DashboardModel::project(&turn(r#"{"confidence": 42}"#)).confidence, 42.0);
        assert_eq!(DashboardModel::project(&turn("{}")).confidence, 0.0);
    }

    #[test]
    fn remaining_groups_or_degrades() {
        assert_eq!(DashboardModel::project(&turn(r#"{"remaining": 12000}"#)).remaining, "12,000");
        assert_eq!(DashboardModel::project(&turn(r#"{"remaining": 512}"#)).remaining, "512");
        assert_eq!(
            DashboardModel::project(&turn(r#"{"remaining": "many"}"#)).remaining,
            UNKNOWN_LABEL
        );
        assert_eq!(DashboardModel::project(&turn("{}")).remaining, UNKNOWN_LABEL);
    }

    #[test]
    fn grouping_handles_edges() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(-12000.0), "-12,000");
    }

    #[test]
    fn empty_guess_list_renders_one_placeholder_row() {
        let model = DashboardModel::project(&turn(r#"{"guesses": []}"#));
        assert_eq!(model.guesses.len(), 1);
        assert!(model.guesses[0].is_placeholder());
        assert_eq!(model.guesses[0].name, PLACEHOLDER_ROW);
    }

    #[test]
    fn guess_rows_preserve_order_and_normalize_shapes() {
        let model = DashboardModel::project(&turn(
            r#"{"guesses": ["Cat", {"name": "Dog", "confidence": 30}, 42, {"confidence": 20}]}"#,
        ));
        assert_eq!(model.guesses.len(), 4);
        assert_eq!(model.guesses[0].name, "Cat");
        assert_eq!(model.guesses[0].confidence, None);
        assert_eq!(model.guesses[1].name, "Dog");
        assert_eq!(model.guesses[1].confidence, Some(30.0));
        assert_eq!(model.guesses[2].name, UNKNOWN_GUESS);
        assert_eq!(model.guesses[3].name, UNKNOWN_GUESS);
        assert_eq!(model.guesses[3].confidence, Some(20.0));
        assert!(model.guesses.iter().all(|row| !row.is_placeholder()));
    }

    #[test]
    fn projection_is_idempotent() {
        let payload = turn(
            r#"{"question": "Is it alive?", "confidence": 42, "remaining": 512,
                "guesses": ["Cat", "Dog"], "ai_used": false}"#,
        );
        assert_eq!(DashboardModel::project(&payload), DashboardModel::project(&payload));
    }

    #[test]
    fn zero_state_matches_reset_widgets() {
        let zero = DashboardModel::zero();
        assert_eq!(zero.confidence, 0.0);
        assert_eq!(zero.remaining, UNKNOWN_LABEL);
        assert_eq!(zero.guesses.len(), 1);
        assert!(zero.guesses[0].is_placeholder());
    }

    #[test]
    fn per_guess_confidence_is_clamped() {
        let entry = GuessEntry::Detailed(GuessDetail {
            name: Some("Cat".to_string()),
            confidence: Some(250.0),
        });
        assert_eq!(GuessRow::from_entry(&entry).confidence, Some(100.0));
    }
}
