//! Comment section journeys on a watch page
//!
//! The comment section renders lazily; every flow here scrolls it into the
//! viewport first.

use std::time::Duration;

use crate::assertions::ensure;
use crate::{HarnessResult, Locator, Session, pause};

async fn scroll_to_comments(session: &Session) -> HarnessResult<()> {
    session.scroll_by(0, 700).await?;
    session
        .wait_visible(&Locator::id("placeholder-area"))
        .await?;
    Ok(())
}

/// Post a comment on the current watch page. Requires a signed-in session.
pub async fn post_comment(session: &Session, text: &str) -> HarnessResult<()> {
    scroll_to_comments(session).await?;

    session
        .wait_clickable(&Locator::id("placeholder-area"))
        .await?
        .click()
        .await?;
    session
        .wait_visible(&Locator::id("contenteditable-root"))
        .await?
        .type_text(text)
        .await?;
    session
        .wait_clickable(&Locator::css("#submit-button button, button[aria-label='Comment']"))
        .await?
        .click()
        .await
}

/// Switch the comment ordering to "Newest first".
pub async fn sort_by_newest(session: &Session) -> HarnessResult<()> {
    scroll_to_comments(session).await?;

    session
        .wait_clickable(&Locator::css(
            "yt-sort-filter-sub-menu-renderer tp-yt-paper-button",
        ))
        .await?
        .click()
        .await?;
    // Menu entries animate in.
    pause(Duration::from_millis(500)).await;
    session
        .wait_clickable(&Locator::xpath(
            "//tp-yt-paper-listbox[@id='menu']//*[contains(text(), 'Newest first')]",
        ))
        .await?
        .click()
        .await
}

/// Click the like or dislike control under the video title and report the
/// resulting pressed state. Repeated calls flip the toggle again.
pub async fn rate_video(session: &Session, like: bool) -> HarnessResult<bool> {
    let locator = if like {
        Locator::css("like-button-view-model button")
    } else {
        Locator::css("dislike-button-view-model button")
    };
    let button = session.wait_clickable(&locator).await?;
    button.click().await?;
    button.is_pressed().await
}

/// Save the current video to Watch Later through the Save dialog and report
/// the checkbox state on exit.
pub async fn save_to_watch_later(session: &Session) -> HarnessResult<()> {
    session
        .wait_clickable(&Locator::xpath(
            "//button[@aria-label='Save to playlist' or .//div[text()='Save']]",
        ))
        .await?
        .click()
        .await?;

    let checkbox = session.wait_visible(&Locator::id("checkbox")).await?;
    checkbox.click().await?;
    let checked = checkbox.is_checked().await?;
    ensure(checked, "Watch Later checkbox did not check after click")
}
