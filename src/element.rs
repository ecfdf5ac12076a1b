//! Interaction steps on resolved elements
//!
//! A `UiElement` is the product of a bounded wait: a live CDP element handle
//! plus the locator that produced it, kept for diagnostics. Interactions are
//! single user-like actions against the remote page; they are not idempotent
//! and there is no internal recovery. If the node detaches between
//! resolution and interaction the step fails with `StaleElement` and the
//! script aborts.

use chromiumoxide::Page;
use chromiumoxide::element::Element;
use chromiumoxide_cdp::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};
use crate::locator::Locator;
use crate::wait;

pub struct UiElement {
    page: Page,
    inner: Element,
    locator: Locator,
}

impl UiElement {
    pub(crate) fn new(page: Page, inner: Element, locator: Locator) -> Self {
        Self {
            page,
            inner,
            locator,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Scroll the element into view and click its clickable point.
    ///
    /// Clicking via coordinates instead of `Element::click` sidesteps the
    /// IntersectionObserver hang chromiumoxide hits on heavily-animated
    /// pages.
    pub async fn click(&self) -> HarnessResult<()> {
        debug!(locator = %self.locator, "click");
        self.inner
            .scroll_into_view()
            .await
            .map_err(|e| self.stale(e))?;
        let point = self
            .inner
            .clickable_point()
            .await
            .map_err(|e| self.stale(e))?;
        self.page.click(point).await.map_err(|e| self.stale(e))?;
        Ok(())
    }

    /// Drag this element onto `target` by dispatching raw mouse input:
    /// press on this element's clickable point, move in steps (drop zones
    /// ignore a single jump), release on the target's point.
    pub async fn drag_to(&self, target: &UiElement) -> HarnessResult<()> {
        self.inner
            .scroll_into_view()
            .await
            .map_err(|e| self.stale(e))?;
        let from = self
            .inner
            .clickable_point()
            .await
            .map_err(|e| self.stale(e))?;
        let to = target
            .inner
            .clickable_point()
            .await
            .map_err(|e| target.stale(e))?;
        debug!(locator = %self.locator, target = %target.locator, "drag");

        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, from.x, from.y, false)
            .await?;
        self.dispatch_mouse(DispatchMouseEventType::MousePressed, from.x, from.y, true)
            .await?;
        const STEPS: u32 = 8;
        for step in 1..=STEPS {
            let t = f64::from(step) / f64::from(STEPS);
            self.dispatch_mouse(
                DispatchMouseEventType::MouseMoved,
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
                true,
            )
            .await?;
        }
        self.dispatch_mouse(DispatchMouseEventType::MouseReleased, to.x, to.y, true)
            .await
    }

    async fn dispatch_mouse(
        &self,
        kind: DispatchMouseEventType,
        x: f64,
        y: f64,
        left_held: bool,
    ) -> HarnessResult<()> {
        let mut builder = DispatchMouseEventParams::builder().r#type(kind).x(x).y(y);
        if left_held {
            builder = builder.button(MouseButton::Left).buttons(1).click_count(1);
        }
        let params = builder.build().map_err(HarnessError::CommandFailed)?;
        self.page.execute(params).await.map_err(|e| self.stale(e))?;
        Ok(())
    }

    /// Focus the element and type the given text, clearing any existing
    /// value first.
    pub async fn type_text(&self, text: &str) -> HarnessResult<()> {
        self.click().await?;
        self.clear().await?;
        self.inner.type_str(text).await.map_err(|e| self.stale(e))?;
        debug!(locator = %self.locator, chars = text.len(), "typed text");
        Ok(())
    }

    /// Clear the element's current value without typing anything.
    pub async fn clear(&self) -> HarnessResult<()> {
        self.inner
            .call_js_fn("function() { this.value = ''; }", false)
            .await
            .map_err(|e| self.stale(e))?;
        Ok(())
    }

    /// Press a single named key (e.g. "Enter") with the element focused.
    pub async fn press_key(&self, key: &str) -> HarnessResult<()> {
        self.inner.focus().await.map_err(|e| self.stale(e))?;
        self.inner.press_key(key).await.map_err(|e| self.stale(e))?;
        Ok(())
    }

    pub async fn press_enter(&self) -> HarnessResult<()> {
        self.press_key("Enter").await
    }

    /// Visible text content, trimmed.
    pub async fn text(&self) -> HarnessResult<String> {
        let text = self
            .inner
            .inner_text()
            .await
            .map_err(|e| self.stale(e))?
            .unwrap_or_default();
        Ok(text.trim().to_string())
    }

    pub async fn attribute(&self, name: &str) -> HarnessResult<Option<String>> {
        self.inner.attribute(name).await.map_err(|e| self.stale(e))
    }

    /// Current value of an input or textarea (the live property, not the
    /// `value` attribute, which does not track user edits).
    pub async fn value(&self) -> HarnessResult<String> {
        let ret = self
            .inner
            .call_js_fn("function() { return this.value; }", false)
            .await
            .map_err(|e| self.stale(e))?;
        Ok(ret
            .result
            .value
            .and_then(|v| serde_json::from_value::<String>(v).ok())
            .unwrap_or_default())
    }

    pub async fn is_displayed(&self) -> bool {
        wait::is_visible(&self.inner).await
    }

    /// Checked state of a checkbox-like control. Understands both native
    /// inputs and the `aria-checked`/`checked`-attribute widgets the target
    /// site uses.
    pub async fn is_checked(&self) -> HarnessResult<bool> {
        let ret = self
            .inner
            .call_js_fn(
                "function() { \
                    if (typeof this.checked === 'boolean') { return this.checked; } \
                    const aria = this.getAttribute('aria-checked'); \
                    if (aria !== null) { return aria === 'true'; } \
                    return this.hasAttribute('checked'); \
                }",
                false,
            )
            .await
            .map_err(|e| self.stale(e))?;
        Ok(ret
            .result
            .value
            .and_then(|v| serde_json::from_value::<bool>(v).ok())
            .unwrap_or(false))
    }

    /// Toggle state as exposed through `aria-pressed` (player buttons).
    pub async fn is_pressed(&self) -> HarnessResult<bool> {
        Ok(self
            .attribute("aria-pressed")
            .await?
            .is_some_and(|v| v == "true"))
    }

    fn stale(&self, source: chromiumoxide::error::CdpError) -> HarnessError {
        HarnessError::StaleElement {
            locator: self.locator.to_string(),
            reason: source.to_string(),
        }
    }
}
