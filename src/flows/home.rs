//! Home screen smoke checks

use crate::assertions::ensure;
use crate::{HarnessResult, Locator, Session};

/// The search box is the landmark that says the home screen has rendered.
pub fn search_box() -> Locator {
    Locator::name("search_query")
}

/// Navigate to the home page, wait for the landmark, and return the URL the
/// browser actually landed on.
pub async fn open_home(session: &Session, base_url: &str) -> HarnessResult<String> {
    session.goto(base_url).await?;
    session.wait_visible(&search_box()).await?;
    session.current_url().await
}

/// Collect the hrefs of every anchor currently on the page. Link-integrity
/// checks assert on the shape of these.
pub async fn collect_link_hrefs(session: &Session) -> HarnessResult<Vec<String>> {
    let mut hrefs = Vec::new();
    for anchor in session.find_all(&Locator::css("a[href]")).await {
        if let Some(href) = anchor.attribute("href").await? {
            if !href.is_empty() {
                hrefs.push(href);
            }
        }
    }
    Ok(hrefs)
}

/// Follow a guide (sidebar) entry by its title and confirm the URL moved to
/// the expected section.
pub async fn open_guide_entry(
    session: &Session,
    title: &str,
    expected_fragment: &str,
) -> HarnessResult<String> {
    let entry = Locator::css(format!("ytd-guide-entry-renderer a[title='{title}']"));
    session.wait_clickable(&entry).await?.click().await?;
    session.wait_url_contains(expected_fragment).await
}

/// Where the masthead Sign in button points, for signed-out smoke checks.
pub async fn sign_in_target(session: &Session) -> HarnessResult<String> {
    let button = session
        .wait_visible(&Locator::aria_label("Sign in"))
        .await?;
    let href = button.attribute("href").await?.unwrap_or_default();
    ensure(!href.is_empty(), "Sign in button has no target")?;
    Ok(href)
}
