//! Bounded waits over the live DOM
//!
//! The single synchronization primitive of the harness: a poll loop that
//! probes the page at a fixed interval until a condition holds or the
//! deadline passes. The condition is probed once before any sleep, so an
//! already-satisfied wait returns immediately. There is deliberately no
//! retry-with-backoff; a timed-out wait is a failed script.

use std::fmt;
use std::time::{Duration, Instant};

use chromiumoxide::Page;
use chromiumoxide::element::Element;
use tracing::debug;

use crate::element::UiElement;
use crate::error::{HarnessError, HarnessResult};
use crate::locator::{Locator, Query};

/// Predicate evaluated against a locator's resolved element(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    Present,
    Visible,
    Clickable,
    AllVisible,
    UrlContains,
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Present => "present",
            Self::Visible => "visible",
            Self::Clickable => "clickable",
            Self::AllVisible => "all-visible",
            Self::UrlContains => "url-contains",
        };
        f.write_str(name)
    }
}

/// Timeout and poll interval for a single bounded wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll: Duration,
}

impl WaitOptions {
    pub fn from_millis(timeout_ms: u64, poll_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            poll: Duration::from_millis(poll_ms),
        }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll: Duration::from_millis(500),
        }
    }
}

/// Unconditional pause, for the few spots with no observable wait condition
/// (client-side animations). Logged so sleeps stay visible in traces.
pub async fn pause(duration: Duration) {
    debug!(ms = duration.as_millis() as u64, "fixed delay");
    tokio::time::sleep(duration).await;
}

/// Block until the locator matches at least one element in the DOM.
pub async fn wait_present(
    page: &Page,
    locator: &Locator,
    opts: WaitOptions,
) -> HarnessResult<UiElement> {
    let started = Instant::now();
    loop {
        if let Some(element) = resolve_all(page, locator).await.into_iter().next() {
            return Ok(UiElement::new(page.clone(), element, locator.clone()));
        }
        if started.elapsed() >= opts.timeout {
            return Err(not_ready(locator, WaitCondition::Present, opts));
        }
        tokio::time::sleep(opts.poll).await;
    }
}

/// Block until the locator matches an element that is rendered and visible.
pub async fn wait_visible(
    page: &Page,
    locator: &Locator,
    opts: WaitOptions,
) -> HarnessResult<UiElement> {
    wait_satisfying(page, locator, WaitCondition::Visible, opts).await
}

/// Block until the locator matches a visible, enabled element.
pub async fn wait_clickable(
    page: &Page,
    locator: &Locator,
    opts: WaitOptions,
) -> HarnessResult<UiElement> {
    wait_satisfying(page, locator, WaitCondition::Clickable, opts).await
}

/// Block until every element the locator matches is visible. At least one
/// match is required.
pub async fn wait_all_visible(
    page: &Page,
    locator: &Locator,
    opts: WaitOptions,
) -> HarnessResult<Vec<UiElement>> {
    let started = Instant::now();
    loop {
        let elements = resolve_all(page, locator).await;
        if !elements.is_empty() {
            let mut all_visible = true;
            for element in &elements {
                if !is_visible(element).await {
                    all_visible = false;
                    break;
                }
            }
            if all_visible {
                return Ok(elements
                    .into_iter()
                    .map(|el| UiElement::new(page.clone(), el, locator.clone()))
                    .collect());
            }
        }
        if started.elapsed() >= opts.timeout {
            return Err(not_ready(locator, WaitCondition::AllVisible, opts));
        }
        tokio::time::sleep(opts.poll).await;
    }
}

/// Block until the current URL contains the given fragment; returns the URL.
pub async fn wait_url_contains(
    page: &Page,
    fragment: &str,
    opts: WaitOptions,
) -> HarnessResult<String> {
    let started = Instant::now();
    loop {
        if let Ok(Some(url)) = page.url().await {
            if url.contains(fragment) {
                return Ok(url);
            }
        }
        if started.elapsed() >= opts.timeout {
            return Err(HarnessError::ElementNotReady {
                locator: format!("url fragment '{fragment}'"),
                condition: WaitCondition::UrlContains,
                timeout_ms: opts.timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(opts.poll).await;
    }
}

async fn wait_satisfying(
    page: &Page,
    locator: &Locator,
    condition: WaitCondition,
    opts: WaitOptions,
) -> HarnessResult<UiElement> {
    let started = Instant::now();
    loop {
        for element in resolve_all(page, locator).await {
            let satisfied = match condition {
                WaitCondition::Visible => is_visible(&element).await,
                WaitCondition::Clickable => is_clickable(&element).await,
                _ => true,
            };
            if satisfied {
                return Ok(UiElement::new(page.clone(), element, locator.clone()));
            }
        }
        if started.elapsed() >= opts.timeout {
            return Err(not_ready(locator, condition, opts));
        }
        tokio::time::sleep(opts.poll).await;
    }
}

/// Resolve a locator to its current matches. Resolution failures read as
/// "not found yet"; the caller's deadline decides when that becomes an error.
pub(crate) async fn resolve_all(page: &Page, locator: &Locator) -> Vec<Element> {
    match locator.query() {
        Query::Css(selector) => page.find_elements(selector).await.unwrap_or_default(),
        Query::XPath(expression) => page.find_xpaths(expression).await.unwrap_or_default(),
    }
}

const VISIBLE_JS: &str = "function() { \
    const rect = this.getBoundingClientRect(); \
    const style = window.getComputedStyle(this); \
    return rect.width > 0 && rect.height > 0 \
        && style.visibility !== 'hidden' && style.display !== 'none'; \
}";

const CLICKABLE_JS: &str = "function() { \
    if (this.disabled) { return false; } \
    const rect = this.getBoundingClientRect(); \
    const style = window.getComputedStyle(this); \
    return rect.width > 0 && rect.height > 0 \
        && style.visibility !== 'hidden' && style.display !== 'none' \
        && style.pointerEvents !== 'none'; \
}";

pub(crate) async fn is_visible(element: &Element) -> bool {
    js_bool(element, VISIBLE_JS).await
}

async fn is_clickable(element: &Element) -> bool {
    js_bool(element, CLICKABLE_JS).await
}

async fn js_bool(element: &Element, function: &str) -> bool {
    match element.call_js_fn(function, false).await {
        Ok(ret) => ret
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        Err(_) => false,
    }
}

fn not_ready(locator: &Locator, condition: WaitCondition, opts: WaitOptions) -> HarnessError {
    HarnessError::ElementNotReady {
        locator: locator.to_string(),
        condition,
        timeout_ms: opts.timeout.as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_observed_suite_behavior() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.poll, Duration::from_millis(500));
    }

    #[test]
    fn condition_display_is_lowercase_hyphenated() {
        assert_eq!(WaitCondition::AllVisible.to_string(), "all-visible");
        assert_eq!(WaitCondition::UrlContains.to_string(), "url-contains");
    }

    #[test]
    fn from_millis_round_trips() {
        let opts = WaitOptions::from_millis(2_500, 250);
        assert_eq!(opts.timeout, Duration::from_millis(2_500));
        assert_eq!(opts.poll, Duration::from_millis(250));
    }
}
