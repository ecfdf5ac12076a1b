//! Playlist management journeys
//!
//! Creation and membership go through the watch-page Save dialog; rename and
//! delete go through the playlists feed. All require a signed-in session.

use std::time::Duration;

use crate::assertions::ensure;
use crate::locator::xpath_literal;
use crate::{HarnessResult, Locator, Session, pause};

fn save_button() -> Locator {
    Locator::xpath("//button[@aria-label='Save to playlist' or .//div[text()='Save']]")
}

fn more_actions() -> Locator {
    Locator::xpath("//button[@aria-label='More actions' or @title='More actions']")
}

/// Membership checkbox for the named playlist inside the Save dialog.
fn membership_checkbox(title: &str) -> Locator {
    Locator::xpath(format!(
        "//yt-formatted-string[text() = {}]/ancestor::tp-yt-paper-checkbox",
        xpath_literal(title)
    ))
}

/// Row in the full-playlist view whose index label reads `label`.
fn index_entry(label: &str) -> Locator {
    Locator::xpath(format!(
        "//yt-formatted-string[text() = {}]/ancestor::div[@id='index-container']",
        xpath_literal(label)
    ))
}

/// Create a playlist with the given title from the current watch page and
/// return the confirmation toast text.
pub async fn create_playlist(session: &Session, title: &str) -> HarnessResult<String> {
    session.wait_clickable(&save_button()).await?.click().await?;
    session
        .wait_clickable(&Locator::aria_label("New playlist"))
        .await?
        .click()
        .await?;
    session
        .wait_visible(&Locator::xpath("//textarea[@placeholder='Choose a title']"))
        .await?
        .type_text(title)
        .await?;
    session
        .wait_clickable(&Locator::xpath("//button[.//div[text()='Create']]"))
        .await?
        .click()
        .await?;

    let toast = session
        .wait_visible(&Locator::xpath("//*[contains(text(), 'Saved to')]"))
        .await?;
    ensure(toast.is_displayed().await, "save confirmation not shown")?;
    toast.text().await
}

/// Open the Save dialog on the current watch page and report whether the
/// named playlist's membership checkbox is checked.
pub async fn video_saved_to(session: &Session, title: &str) -> HarnessResult<bool> {
    session.wait_clickable(&save_button()).await?.click().await?;
    let checkbox = session.wait_visible(&membership_checkbox(title)).await?;
    checkbox.is_checked().await
}

/// Add the current watch page's video to the named playlist by ticking its
/// checkbox in the Save dialog; returns the checkbox state afterwards.
pub async fn add_video_to_playlist(session: &Session, title: &str) -> HarnessResult<bool> {
    session.wait_clickable(&save_button()).await?.click().await?;
    let checkbox = session.wait_clickable(&membership_checkbox(title)).await?;
    checkbox.click().await?;
    // The tick is applied client-side before the save round-trip completes.
    pause(Duration::from_secs(1)).await;
    checkbox.is_checked().await
}

/// From the playlists feed, open the first full-playlist view and return its
/// URL (which must carry a `/playlist?list=` route).
pub async fn open_first_full_playlist(session: &Session, feed_url: &str) -> HarnessResult<String> {
    session.goto(feed_url).await?;
    session
        .wait_clickable(&Locator::link_text("View full playlist"))
        .await?
        .click()
        .await?;
    session.wait_url_contains("/playlist?list=").await
}

/// Index labels visible in the current full-playlist view, top to bottom.
pub async fn playlist_order(session: &Session) -> HarnessResult<Vec<String>> {
    session
        .wait_visible(&Locator::css("div#index-container yt-formatted-string#index"))
        .await?;
    let mut order = Vec::new();
    for index in session
        .find_all(&Locator::css("div#index-container yt-formatted-string#index"))
        .await
    {
        order.push(index.text().await?);
    }
    Ok(order)
}

/// Video titles visible in the current full-playlist view, top to bottom.
pub async fn playlist_titles(session: &Session) -> HarnessResult<Vec<String>> {
    let entries = session
        .wait_all_visible(&Locator::css("ytd-playlist-video-renderer a#video-title"))
        .await?;
    let mut titles = Vec::with_capacity(entries.len());
    for entry in &entries {
        titles.push(entry.text().await?);
    }
    Ok(titles)
}

/// In the current full-playlist view, drag the entry labelled `from_label`
/// onto the slot of the entry labelled `to_label`.
pub async fn reorder_playlist(
    session: &Session,
    from_label: &str,
    to_label: &str,
) -> HarnessResult<()> {
    let from = session.wait_visible(&index_entry(from_label)).await?;
    let to = session.wait_visible(&index_entry(to_label)).await?;
    from.drag_to(&to).await?;
    // The list re-renders once the server acknowledges the move.
    pause(Duration::from_secs(2)).await;
    Ok(())
}

/// Rename the first playlist on the playlists feed.
pub async fn rename_playlist(session: &Session, feed_url: &str, new_title: &str) -> HarnessResult<()> {
    session.goto(feed_url).await?;
    session.wait_clickable(&more_actions()).await?.click().await?;
    session
        .wait_clickable(&Locator::xpath("//yt-list-item-view-model//span[text()='Edit']"))
        .await?
        .click()
        .await?;
    session
        .wait_visible(&Locator::css("input.style-scope.tp-yt-paper-input"))
        .await?
        .type_text(new_title)
        .await?;
    session
        .wait_clickable(&Locator::xpath("//div[@id='actions']//button[.//div[text()='Save']]"))
        .await?
        .click()
        .await
}

/// Delete the first playlist on the playlists feed and report whether a link
/// with the given title is gone afterwards.
pub async fn delete_playlist(session: &Session, feed_url: &str, title: &str) -> HarnessResult<bool> {
    session.goto(feed_url).await?;
    session.wait_clickable(&more_actions()).await?.click().await?;
    session
        .wait_clickable(&Locator::xpath(
            "//yt-list-item-view-model//span[text()='Delete']",
        ))
        .await?
        .click()
        .await?;

    // The tile is removed client-side after the delete round-trip.
    pause(Duration::from_secs(2)).await;
    Ok(session
        .find_all(&Locator::link_text(title))
        .await
        .is_empty())
}
