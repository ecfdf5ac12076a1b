//! Watch-page playback controls
//!
//! Player chrome buttons carry stable `ytp-*` classes; the `<video>` element
//! itself is queried for playback state because the toggle button has no
//! readable pressed attribute.

use std::time::Duration;

use crate::{HarnessError, HarnessResult, Locator, Session, pause};

fn player_video() -> Locator {
    Locator::css("video.html5-main-video")
}

/// Open a watch page and wait for the player to render.
pub async fn open_watch_page(session: &Session, watch_url: &str) -> HarnessResult<()> {
    session.goto(watch_url).await?;
    session.wait_visible(&player_video()).await?;
    Ok(())
}

pub async fn is_paused(session: &Session) -> HarnessResult<bool> {
    let result = session
        .page()
        .evaluate("document.querySelector('video.html5-main-video').paused")
        .await
        .map_err(|e| HarnessError::CommandFailed(e.to_string()))?;
    Ok(result.value().and_then(|v| v.as_bool()).unwrap_or(false))
}

/// Current playhead position in seconds.
pub async fn playhead_seconds(session: &Session) -> HarnessResult<f64> {
    let result = session
        .page()
        .evaluate("document.querySelector('video.html5-main-video').currentTime")
        .await
        .map_err(|e| HarnessError::CommandFailed(e.to_string()))?;
    Ok(result.value().and_then(|v| v.as_f64()).unwrap_or(0.0))
}

/// Expand the description box, open the transcript panel, click the segment
/// at `segment_index` (or the last one, on shorter transcripts), and return
/// the playhead position after the seek.
pub async fn seek_via_transcript(session: &Session, segment_index: usize) -> HarnessResult<f64> {
    session
        .wait_clickable(&Locator::id("info-container"))
        .await?
        .click()
        .await?;
    session
        .wait_clickable(&Locator::aria_label("Show transcript"))
        .await?
        .click()
        .await?;

    let segments = session
        .wait_all_visible(&Locator::css("ytd-transcript-segment-renderer"))
        .await?;
    let segment = segments
        .get(segment_index)
        .or_else(|| segments.last())
        .ok_or_else(|| {
            HarnessError::AssertionFailure("transcript panel has no segments".to_string())
        })?;
    segment.click().await?;

    // The seek is client-side; give the player a beat to move the playhead.
    pause(Duration::from_millis(500)).await;
    playhead_seconds(session).await
}

/// Click the play/pause control and report whether the video is paused
/// afterwards.
pub async fn toggle_playback(session: &Session) -> HarnessResult<bool> {
    session
        .wait_clickable(&Locator::css("button.ytp-play-button"))
        .await?
        .click()
        .await?;
    // The paused property flips synchronously but the control animates.
    pause(Duration::from_millis(500)).await;
    is_paused(session).await
}

/// Toggle the captions button and report whether captions are now enabled.
pub async fn toggle_captions(session: &Session) -> HarnessResult<bool> {
    let button = session
        .wait_clickable(&Locator::css("button.ytp-subtitles-button"))
        .await?;
    button.click().await?;
    button.is_pressed().await
}

/// Skip to the next video in the queue and return the URL it landed on.
pub async fn skip_to_next(session: &Session) -> HarnessResult<String> {
    let before = session.current_url().await?;
    session
        .wait_clickable(&Locator::css("a.ytp-next-button"))
        .await?
        .click()
        .await?;
    // Client-side route change; there is no load event to wait on, so poll
    // the URL until it moves off the previous watch id.
    let deadline = std::time::Instant::now() + session.wait_options().timeout;
    loop {
        let current = session.current_url().await?;
        if current != before {
            session.wait_visible(&player_video()).await?;
            return Ok(current);
        }
        if std::time::Instant::now() >= deadline {
            return Err(HarnessError::AssertionFailure(format!(
                "URL did not change after next-video click (still {before})"
            )));
        }
        pause(session.wait_options().poll).await;
    }
}
