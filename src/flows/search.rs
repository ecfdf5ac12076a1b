//! Search box journeys

use crate::{HarnessResult, Locator, Session};

fn search_box() -> Locator {
    Locator::name("search_query")
}

/// Clear the search box, type the query, and submit with Enter.
pub async fn perform_search(session: &Session, query: &str) -> HarnessResult<()> {
    let search_box = session.wait_visible(&search_box()).await?;
    search_box.type_text(query).await?;
    search_box.press_enter().await
}

/// Same as `perform_search` but submits via the magnifier button.
pub async fn search_via_button(session: &Session, query: &str) -> HarnessResult<()> {
    let search_box = session.wait_visible(&search_box()).await?;
    search_box.type_text(query).await?;
    session
        .wait_clickable(&Locator::aria_label("Search"))
        .await?
        .click()
        .await
}

/// The query currently retained in the search box.
pub async fn current_query(session: &Session) -> HarnessResult<String> {
    session.wait_visible(&search_box()).await?.value().await
}

/// Titles of the result links on the current results page.
pub async fn result_titles(session: &Session) -> HarnessResult<Vec<String>> {
    // Results stream in; wait for the first before collecting the rest.
    session
        .wait_visible(&Locator::css("a#video-title"))
        .await?;
    let mut titles = Vec::new();
    for link in session.find_all(&Locator::css("a#video-title")).await {
        let title = link.text().await?;
        if !title.is_empty() {
            titles.push(title);
        }
    }
    Ok(titles)
}

/// Type a prefix without submitting and report whether the suggestion
/// listbox opened.
pub async fn suggestions_appear(session: &Session, prefix: &str) -> HarnessResult<bool> {
    let search_box = session.wait_visible(&search_box()).await?;
    search_box.type_text(prefix).await?;
    Ok(session
        .wait_visible(&Locator::css("[role='listbox']"))
        .await
        .is_ok())
}
