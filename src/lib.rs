//! Browser-driven UI checks for the YouTube front end
//!
//! Harness primitives (session lifecycle, bounded waits, interaction steps,
//! assertions, screenshot artifacts) over chromiumoxide, plus flow modules
//! encoding the canonical user journeys the suite exercises. Live-site flows
//! are driven from the ignored integration tests in `tests/`.

pub mod assertions;
pub mod browser_setup;
mod element;
mod error;
pub mod flows;
mod locator;
pub mod screenshot;
mod session;
pub mod wait;

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use element::UiElement;
pub use error::{HarnessError, HarnessResult};
pub use locator::Locator;
pub use session::Session;
pub use wait::{WaitCondition, WaitOptions, pause};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Landing page every script starts from.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default)]
    pub window: WindowConfig,

    /// Bounded-wait timeout applied by `Session` wait helpers.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Poll interval between condition probes.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Where screenshot artifacts land.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    #[serde(default)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

/// Account credentials for sign-in flows.
///
/// Never committed to config files in practice; the environment overrides in
/// `load_config` are the intended source.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_wait_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headless: default_headless(),
            window: WindowConfig::default(),
            wait_timeout_ms: default_wait_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            artifacts_dir: default_artifacts_dir(),
            credentials: Credentials::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Config {
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::from_millis(self.wait_timeout_ms, self.poll_interval_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Apply environment overrides on top of whatever the file provided.
    /// Credentials in particular are expected to arrive this way.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TUBECHECK_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(headless) = std::env::var("TUBECHECK_HEADLESS") {
            self.headless = headless != "0" && !headless.eq_ignore_ascii_case("false");
        }
        if let Ok(email) = std::env::var("TUBECHECK_EMAIL") {
            self.credentials.email = Some(email);
        }
        if let Ok(password) = std::env::var("TUBECHECK_PASSWORD") {
            self.credentials.password = Some(password);
        }
    }
}

/// Load config from `config.yaml` in the crate root, falling back to
/// defaults, then apply environment overrides.
pub fn load_config() -> anyhow::Result<Config> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml");

    let mut config: Config = if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&contents)?
    } else {
        Config::default()
    };

    url::Url::parse(&config.base_url)
        .map_err(|e| anyhow::anyhow!("invalid base_url '{}': {e}", config.base_url))?;

    config.apply_env_overrides();
    Ok(config)
}
