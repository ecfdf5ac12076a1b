//! Session lifecycle
//!
//! One `Session` owns one browser process, its CDP event-handler task, its
//! profile directory, and the single page every step runs against. Sessions
//! are never shared: a parallel run opens one session per script. This is
//! the explicit context object that replaces driver-as-shared-field state;
//! every flow takes `&Session` instead of reaching for a global.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::Config;
use crate::browser_setup;
use crate::element::UiElement;
use crate::error::{HarnessError, HarnessResult};
use crate::locator::Locator;
use crate::wait::{self, WaitOptions};

pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    user_data_dir: Option<PathBuf>,
    waits: WaitOptions,
    navigation_timeout: Duration,
}

impl Session {
    /// Launch an isolated browser and navigate it to `start_url`.
    ///
    /// If navigation fails the browser is torn down before the error is
    /// returned; a failed `open` leaves no process behind.
    pub async fn open(config: &Config, start_url: &str) -> HarnessResult<Self> {
        let (browser, handler, user_data_dir) = browser_setup::launch_browser(config)
            .await
            .map_err(|e| HarnessError::LaunchFailed(e.to_string()))?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                let _ = std::fs::remove_dir_all(&user_data_dir);
                return Err(HarnessError::LaunchFailed(e.to_string()));
            }
        };

        let session = Self {
            browser,
            handler,
            page,
            user_data_dir: Some(user_data_dir),
            waits: config.wait_options(),
            navigation_timeout: config.navigation_timeout(),
        };

        if let Err(e) = session.goto(start_url).await {
            let _ = session.close().await;
            return Err(e);
        }

        Ok(session)
    }

    /// Navigate the session's page and wait for the load to settle.
    pub async fn goto(&self, url: &str) -> HarnessResult<()> {
        info!(url, "navigating");
        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| HarnessError::NavigationFailure {
                url: url.to_string(),
                reason: format!(
                    "did not complete within {}ms",
                    self.navigation_timeout.as_millis()
                ),
            })?
            .map_err(|e| HarnessError::NavigationFailure {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| HarnessError::NavigationFailure {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn wait_options(&self) -> WaitOptions {
        self.waits
    }

    pub async fn current_url(&self) -> HarnessResult<String> {
        self.page
            .url()
            .await
            .map_err(|e| HarnessError::CommandFailed(e.to_string()))?
            .ok_or_else(|| HarnessError::CommandFailed("page has no URL".to_string()))
    }

    /// Full HTML of the current page, for text-presence checks.
    pub async fn page_source(&self) -> HarnessResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| HarnessError::CommandFailed(e.to_string()))
    }

    pub async fn scroll_by(&self, x: i64, y: i64) -> HarnessResult<()> {
        self.page
            .evaluate(format!("window.scrollBy({x}, {y})"))
            .await
            .map_err(|e| HarnessError::CommandFailed(e.to_string()))?;
        Ok(())
    }

    pub async fn wait_present(&self, locator: &Locator) -> HarnessResult<UiElement> {
        wait::wait_present(&self.page, locator, self.waits).await
    }

    pub async fn wait_visible(&self, locator: &Locator) -> HarnessResult<UiElement> {
        wait::wait_visible(&self.page, locator, self.waits).await
    }

    pub async fn wait_clickable(&self, locator: &Locator) -> HarnessResult<UiElement> {
        wait::wait_clickable(&self.page, locator, self.waits).await
    }

    pub async fn wait_all_visible(&self, locator: &Locator) -> HarnessResult<Vec<UiElement>> {
        wait::wait_all_visible(&self.page, locator, self.waits).await
    }

    pub async fn wait_url_contains(&self, fragment: &str) -> HarnessResult<String> {
        wait::wait_url_contains(&self.page, fragment, self.waits).await
    }

    /// Resolve a locator without waiting. Used for emptiness checks where
    /// absence is the expected outcome.
    pub async fn find_all(&self, locator: &Locator) -> Vec<UiElement> {
        wait::resolve_all(&self.page, locator)
            .await
            .into_iter()
            .map(|el| UiElement::new(self.page.clone(), el, locator.clone()))
            .collect()
    }

    /// Close the browser process and release every session resource.
    ///
    /// Must be invoked once per opened session on every exit path. Both
    /// `close()` and `wait()` are required: close sends the command, wait
    /// reaps the process so it cannot linger as a zombie.
    pub async fn close(mut self) -> HarnessResult<()> {
        info!("closing session");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        if let Some(path) = self.user_data_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up profile dir {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
        // Drop aborts the handler task.
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(dir) = &self.user_data_dir {
            warn!(
                "Session dropped without close(). Profile dir will be orphaned: {}",
                dir.display()
            );
        }
    }
}
