//! Account settings journeys
//!
//! Covers the settings sidebar walk and the notification toggles. Studio
//! content management (bulk upload/edit/download) is a different product
//! surface and is not part of these flows.

use crate::assertions::ensure;
use crate::{HarnessError, HarnessResult, Locator, Session};

/// From the account settings page, collect each sidebar section link and
/// visit it, returning the URLs the browser landed on in order.
pub async fn walk_sidebar_sections(
    session: &Session,
    account_url: &str,
) -> HarnessResult<Vec<String>> {
    session.goto(account_url).await?;

    let links = session
        .wait_all_visible(&Locator::css("ytd-settings-sidebar-renderer a"))
        .await?;
    let mut hrefs = Vec::with_capacity(links.len());
    for link in &links {
        if let Some(href) = link.attribute("href").await? {
            hrefs.push(href);
        }
    }
    ensure(!hrefs.is_empty(), "settings sidebar has no section links")?;

    // Sidebar hrefs are usually relative; resolve them before navigating.
    let base = url::Url::parse(account_url).map_err(|e| HarnessError::NavigationFailure {
        url: account_url.to_string(),
        reason: e.to_string(),
    })?;
    let mut visited = Vec::with_capacity(hrefs.len());
    for href in hrefs {
        let absolute = base.join(&href).map_err(|e| HarnessError::NavigationFailure {
            url: href.clone(),
            reason: e.to_string(),
        })?;
        session.goto(absolute.as_str()).await?;
        visited.push(session.current_url().await?);
    }
    Ok(visited)
}

/// Number of notification toggles on the notifications settings page.
pub async fn notification_toggle_count(
    session: &Session,
    notifications_url: &str,
) -> HarnessResult<usize> {
    session.goto(notifications_url).await?;
    session.wait_visible(&Locator::id("toggle")).await?;
    Ok(session.find_all(&Locator::id("toggle")).await.len())
}

/// Flip the notification toggle at `index` and return its new checked state.
/// The page must already be on the notifications settings URL.
pub async fn flip_notification_toggle(session: &Session, index: usize) -> HarnessResult<bool> {
    session.wait_visible(&Locator::id("toggle")).await?;
    let toggles = session.find_all(&Locator::id("toggle")).await;
    ensure(
        index < toggles.len(),
        format!("toggle index {index} out of range ({} present)", toggles.len()),
    )?;

    let toggle = &toggles[index];
    let before = toggle.is_checked().await?;
    toggle.click().await?;
    let after = toggle.is_checked().await?;
    ensure(
        before != after,
        format!("toggle {index} did not change state after click"),
    )?;
    Ok(after)
}
