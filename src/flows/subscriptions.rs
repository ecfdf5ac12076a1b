//! Channel subscription journeys on a watch page

use crate::assertions::ensure;
use crate::locator::xpath_literal;
use crate::{HarnessResult, Locator, Session};

/// Name of the channel that owns the current watch page.
pub async fn channel_name(session: &Session) -> HarnessResult<String> {
    session
        .wait_visible(&Locator::css("ytd-channel-name a"))
        .await?
        .text()
        .await
}

/// Subscribe to the current channel and return the confirmation toast text.
pub async fn subscribe(session: &Session) -> HarnessResult<String> {
    session
        .wait_clickable(&Locator::css("#subscribe-button-shape button"))
        .await?
        .click()
        .await?;

    let toast = session
        .wait_visible(&Locator::xpath(
            "//*[@id='text' and contains(text(), 'Subscription added')]",
        ))
        .await?;
    ensure(toast.is_displayed().await, "'Subscription added' toast not visible")?;
    toast.text().await
}

/// Check the subscriptions feed for an entry naming the given channel.
pub async fn feed_contains(
    session: &Session,
    feed_url: &str,
    channel: &str,
) -> HarnessResult<bool> {
    session.goto(feed_url).await?;
    let entry = session
        .wait_visible(&Locator::xpath(format!(
            "//yt-formatted-string[contains(text(),{})]",
            xpath_literal(channel)
        )))
        .await;
    match entry {
        Ok(el) => Ok(el.is_displayed().await),
        Err(crate::HarnessError::ElementNotReady { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Unsubscribe from the current channel via the notification-preference menu
/// and confirm dialog; returns the removal toast text.
pub async fn unsubscribe(session: &Session) -> HarnessResult<String> {
    session
        .wait_clickable(&Locator::css("#notification-preference-button button"))
        .await?
        .click()
        .await?;
    session
        .wait_clickable(&Locator::xpath(
            "//tp-yt-paper-item[.//yt-formatted-string[text()='Unsubscribe']]",
        ))
        .await?
        .click()
        .await?;
    session
        .wait_clickable(&Locator::css("#confirm-button button"))
        .await?
        .click()
        .await?;

    let toast = session
        .wait_visible(&Locator::xpath(
            "//*[@id='text' and contains(text(), 'Subscription removed')]",
        ))
        .await?;
    ensure(toast.is_displayed().await, "'Subscription removed' toast not visible")?;
    toast.text().await
}
