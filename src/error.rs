//! Error taxonomy for the harness
//!
//! Nothing here is caught or retried inside the library: every variant aborts
//! the current flow and surfaces to the hosting test runner.

use thiserror::Error;

use crate::wait::WaitCondition;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("navigation to {url} failed: {reason}")]
    NavigationFailure { url: String, reason: String },

    #[error("element not ready after {timeout_ms}ms ({condition}): {locator}")]
    ElementNotReady {
        locator: String,
        condition: WaitCondition,
        timeout_ms: u64,
    },

    #[error("stale element {locator}: {reason}")]
    StaleElement { locator: String, reason: String },

    #[error("assertion failed: {0}")]
    AssertionFailure(String),

    /// CDP commands outside the four script-visible kinds (reading the URL,
    /// fetching page source, capturing a screenshot).
    #[error("browser command failed: {0}")]
    CommandFailed(String),

    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
