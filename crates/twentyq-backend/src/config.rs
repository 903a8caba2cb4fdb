//! Client configuration.
//!
//! Resolution order, lowest to highest: built-in defaults, then
//! `~/.config/twentyq/config.json` (partial files fine, unknown keys
//! ignored), then environment variables (`TWENTYQ_BACKEND_URL`,
//! `TWENTYQ_TIMEOUT_SECS`). CLI flags are applied on top by the binary.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use twentyq_core::driver::FlowTiming;

/// Loopback origin of the stock backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_AI_DWELL_MS: u64 = 1000;
const DEFAULT_FRONTEND_PULSE_MS: u64 = 300;

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, no trailing slash.
    pub base_url: String,
    /// Bound on one `/ask` round trip.
    pub timeout_secs: u64,
    /// Minimum time the AI node stays lit after an `ai_used` turn.
    pub ai_dwell_ms: u64,
    /// Length of one frontend node pulse.
    pub frontend_pulse_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ai_dwell_ms: DEFAULT_AI_DWELL_MS,
            frontend_pulse_ms: DEFAULT_FRONTEND_PULSE_MS,
        }
    }
}

/// On-disk shape: every key optional so a partial file overlays cleanly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    ai_dwell_ms: Option<u64>,
    frontend_pulse_ms: Option<u64>,
}

impl ClientConfig {
    /// Resolves the configuration from the default file location and the
    /// environment.
    pub fn resolve() -> Self {
        Self::resolve_from(None)
    }

    /// Like [`ClientConfig::resolve`], with an explicit config file path.
    pub fn resolve_from(path: Option<&Path>) -> Self {
        let mut config = Self::default();

        let file_path = path.map(Path::to_path_buf).or_else(default_config_path);
        if let Some(file_path) = file_path {
            match std::fs::read_to_string(&file_path) {
                Ok(content) => match serde_json::from_str::<FileConfig>(&content) {
                    Ok(file) => config.apply_file(file),
                    Err(err) => {
                        warn!(path = %file_path.display(), error = %err,
                            "ignoring unparseable config file");
                    }
                },
                // Absent file is the normal case.
                Err(_) => debug!(path = %file_path.display(), "no config file"),
            }
        }

        config.apply_env();
        config.normalize();
        config
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(ai_dwell_ms) = file.ai_dwell_ms {
            self.ai_dwell_ms = ai_dwell_ms;
        }
        if let Some(frontend_pulse_ms) = file.frontend_pulse_ms {
            self.frontend_pulse_ms = frontend_pulse_ms;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(base_url) = env::var("TWENTYQ_BACKEND_URL") {
            if !base_url.is_empty() {
                self.base_url = base_url;
            }
        }
        if let Ok(raw) = env::var("TWENTYQ_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(timeout_secs) => self.timeout_secs = timeout_secs,
                Err(_) => warn!(value = %raw, "ignoring non-numeric TWENTYQ_TIMEOUT_SECS"),
            }
        }
    }

    fn normalize(&mut self) {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Animation dwell times for the driver.
    pub fn flow_timing(&self) -> FlowTiming {
        FlowTiming {
            frontend_pulse: Duration::from_millis(self.frontend_pulse_ms),
            ai_dwell: Duration::from_millis(self.ai_dwell_ms),
        }
    }
}

/// `~/.config/twentyq/config.json`
fn default_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("twentyq").join("config.json"))
}
