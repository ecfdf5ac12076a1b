//! Live-site flow suites.
//!
//! Ignored by default: they need a Chrome/Chromium binary, network access to
//! the real site, and (for the account suites) `TUBECHECK_EMAIL` /
//! `TUBECHECK_PASSWORD` pointing at the dedicated test account. Each test
//! owns its session for its whole lifetime; nothing is shared between tests,
//! so they can run in parallel or in any order.
//!
//! The front end changes frequently; when one of these breaks, suspect the
//! locators before the harness.

use tubecheck::assertions::{ensure, ensure_contains};
use tubecheck::flows::{auth, comments, home, playlists, search, settings, subscriptions, video};
use tubecheck::{Config, HarnessResult, Session, load_config, screenshot};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=Q3boOPiTFHY";
const PLAYLIST_SEED_URL: &str = "https://www.youtube.com/watch?v=YaXJeUkBe4Y";
const PLAYLIST_SECOND_URL: &str = "https://www.youtube.com/watch?v=oLc9gVM8FBM";
const SUBSCRIPTION_WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn live_config() -> anyhow::Result<Config> {
    load_config()
}

fn require_credentials(config: &Config) -> bool {
    if config.credentials.is_complete() {
        true
    } else {
        eprintln!("skipping: TUBECHECK_EMAIL / TUBECHECK_PASSWORD not set");
        false
    }
}

/// Run a flow body with a dedicated session; teardown happens on both the
/// success and failure paths, with a screenshot kept for failed runs.
async fn with_session<F>(config: &Config, start_url: &str, label: &str, body: F) -> anyhow::Result<()>
where
    F: AsyncFnOnce(&Session) -> HarnessResult<()>,
{
    let session = Session::open(config, start_url).await?;
    let outcome = body(&session).await;

    if outcome.is_err() {
        let _ = screenshot::capture(session.page(), &config.artifacts_dir, label).await;
    }
    session.close().await?;
    outcome?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn home_screen_renders_with_working_links() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "home-screen", async |session| {
        let url = home::open_home(session, &config.base_url).await?;
        ensure_contains(&url, "youtube.com", "home URL")?;

        let hrefs = home::collect_link_hrefs(session).await?;
        ensure(!hrefs.is_empty(), "home screen has no links")?;
        for href in &hrefs {
            ensure(
                href.starts_with("http") || href.starts_with('/'),
                format!("malformed link target: {href}"),
            )?;
        }

        let sign_in = home::sign_in_target(session).await?;
        ensure_contains(&sign_in, "accounts", "sign-in button target")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn guide_entries_route_to_their_sections() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "guide-entries", async |session| {
        home::open_home(session, &config.base_url).await?;
        let url = home::open_guide_entry(session, "Shorts", "/shorts").await?;
        ensure_contains(&url, "/shorts", "shorts URL")?;

        home::open_home(session, &config.base_url).await?;
        let url = home::open_guide_entry(session, "History", "/feed/history").await?;
        ensure_contains(&url, "/feed/history", "history URL")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn empty_search_stays_on_home() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "empty-search", async |session| {
        home::open_home(session, &config.base_url).await?;
        search::perform_search(session, "").await?;

        let url = session.current_url().await?;
        ensure(
            !url.contains("/results"),
            format!("empty query navigated to results: {url}"),
        )
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn search_results_are_relevant_and_query_is_retained() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "search-relevance", async |session| {
        home::open_home(session, &config.base_url).await?;
        search::perform_search(session, "rust programming").await?;
        session.wait_url_contains("/results").await?;

        let titles = search::result_titles(session).await?;
        ensure(!titles.is_empty(), "no search results rendered")?;
        let relevant = titles
            .iter()
            .filter(|t| t.to_lowercase().contains("rust"))
            .count();
        ensure(
            relevant > 0,
            format!("none of {} result titles mention the query", titles.len()),
        )?;

        let retained = search::current_query(session).await?;
        ensure(
            retained == "rust programming",
            format!("search box lost the query, now '{retained}'"),
        )
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn search_suggestions_and_button_submit() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "search-suggestions", async |session| {
        home::open_home(session, &config.base_url).await?;
        let appeared = search::suggestions_appear(session, "how to").await?;
        ensure(appeared, "suggestion listbox did not open")?;

        search::search_via_button(session, "ferris the crab").await?;
        session.wait_url_contains("/results").await?;
        Ok(())
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, live site, and credentials"]
async fn valid_login_then_logout_round_trip() -> anyhow::Result<()> {
    let config = live_config()?;
    if !require_credentials(&config) {
        return Ok(());
    }
    with_session(&config, &config.base_url, "login-logout", async |session| {
        auth::sign_in(session, &config.credentials).await?;
        ensure(auth::is_signed_in(session).await, "no avatar after sign-in")?;

        auth::sign_out(session).await?;
        let url = session.current_url().await?;
        ensure_contains(&url, "youtube.com", "post-logout redirect")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn invalid_account_shows_inline_error() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "invalid-account", async |session| {
        let message = auth::submit_email(session, "no-such-account-tubecheck@example.com").await?;
        ensure(!message.is_empty(), "no error text for unknown account")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn empty_email_submit_shows_inline_error() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, &config.base_url, "empty-login", async |session| {
        let message = auth::submit_email(session, "").await?;
        ensure_contains(&message.to_lowercase(), "enter an email", "empty-email error")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn playback_and_caption_toggles() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, WATCH_URL, "video-playback", async |session| {
        video::open_watch_page(session, WATCH_URL).await?;

        let paused = video::toggle_playback(session).await?;
        let resumed = video::toggle_playback(session).await?;
        ensure(
            paused != resumed,
            "play/pause toggle did not flip playback state",
        )?;

        let captions_on = video::toggle_captions(session).await?;
        ensure(captions_on, "captions did not enable")?;
        let captions_off = video::toggle_captions(session).await?;
        ensure(!captions_off, "captions did not disable")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn next_button_advances_to_another_video() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, WATCH_URL, "next-video", async |session| {
        video::open_watch_page(session, WATCH_URL).await?;
        let next_url = video::skip_to_next(session).await?;
        ensure_contains(&next_url, "watch?v=", "next video URL")?;
        ensure(
            !next_url.contains("Q3boOPiTFHY"),
            "next button stayed on the same video",
        )
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, and live site"]
async fn transcript_segment_click_seeks_the_player() -> anyhow::Result<()> {
    let config = live_config()?;
    with_session(&config, WATCH_URL, "transcript-seek", async |session| {
        video::open_watch_page(session, WATCH_URL).await?;
        // A segment well past the opening line, so the seek is observable.
        let playhead = video::seek_via_transcript(session, 12).await?;
        ensure(
            playhead > 0.0,
            "playhead did not move after transcript segment click",
        )
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, live site, and credentials"]
async fn comment_post_sort_and_rate() -> anyhow::Result<()> {
    let config = live_config()?;
    if !require_credentials(&config) {
        return Ok(());
    }
    with_session(&config, &config.base_url, "comments", async |session| {
        auth::sign_in(session, &config.credentials).await?;
        video::open_watch_page(session, WATCH_URL).await?;

        comments::post_comment(session, "Great video! (automated check)").await?;
        comments::sort_by_newest(session).await?;

        let liked = comments::rate_video(session, true).await?;
        ensure(liked, "like button did not register as pressed")?;
        // Second click undoes the rating, leaving the account clean.
        let still_liked = comments::rate_video(session, true).await?;
        ensure(!still_liked, "like button did not unpress")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, live site, and credentials"]
async fn playlist_lifecycle_create_verify_rename_delete() -> anyhow::Result<()> {
    let config = live_config()?;
    if !require_credentials(&config) {
        return Ok(());
    }
    let feed_url = format!("{}/feed/playlists", config.base_url);
    with_session(&config, &config.base_url, "playlists", async |session| {
        auth::sign_in(session, &config.credentials).await?;

        video::open_watch_page(session, PLAYLIST_SEED_URL).await?;
        let toast = playlists::create_playlist(session, "My Test Playlist").await?;
        ensure_contains(&toast, "Saved to", "create-playlist toast")?;

        video::open_watch_page(session, PLAYLIST_SEED_URL).await?;
        let saved = playlists::video_saved_to(session, "My Test Playlist").await?;
        ensure(saved, "seed video missing from the new playlist")?;

        // A second entry, so the reorder below has something to move.
        video::open_watch_page(session, PLAYLIST_SECOND_URL).await?;
        let added = playlists::add_video_to_playlist(session, "My Test Playlist").await?;
        ensure(added, "second video did not get added to the playlist")?;

        let playlist_url = playlists::open_first_full_playlist(session, &feed_url).await?;
        ensure_contains(&playlist_url, "/playlist?list=", "full playlist URL")?;

        let titles_before = playlists::playlist_titles(session).await?;
        ensure(titles_before.len() >= 2, "playlist too short to reorder")?;
        playlists::reorder_playlist(session, "2", "1").await?;
        let titles_after = playlists::playlist_titles(session).await?;
        ensure(
            titles_after.len() == titles_before.len(),
            "reorder changed the playlist size",
        )?;
        ensure(
            titles_after != titles_before,
            "drag did not change the playlist order",
        )?;
        let index_labels = playlists::playlist_order(session).await?;
        ensure(
            index_labels.first().map(String::as_str) == Some("1"),
            "index labels did not renumber after the move",
        )?;

        playlists::rename_playlist(session, &feed_url, "My Renamed Playlist").await?;
        let deleted = playlists::delete_playlist(session, &feed_url, "My Renamed Playlist").await?;
        ensure(deleted, "playlist still listed after delete")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, live site, and credentials"]
async fn subscribe_appears_in_feed_then_unsubscribe() -> anyhow::Result<()> {
    let config = live_config()?;
    if !require_credentials(&config) {
        return Ok(());
    }
    let feed_url = format!("{}/feed/subscriptions", config.base_url);
    with_session(&config, &config.base_url, "subscriptions", async |session| {
        auth::sign_in(session, &config.credentials).await?;
        video::open_watch_page(session, SUBSCRIPTION_WATCH_URL).await?;

        let channel = subscriptions::channel_name(session).await?;
        ensure(!channel.is_empty(), "channel name not shown on watch page")?;

        let toast = subscriptions::subscribe(session).await?;
        ensure_contains(&toast, "Subscription added", "subscribe toast")?;

        let in_feed = subscriptions::feed_contains(session, &feed_url, &channel).await?;
        ensure(in_feed, format!("{channel} missing from subscriptions feed"))?;

        video::open_watch_page(session, SUBSCRIPTION_WATCH_URL).await?;
        let toast = subscriptions::unsubscribe(session).await?;
        ensure_contains(&toast, "Subscription removed", "unsubscribe toast")
    })
    .await
}

#[tokio::test]
#[ignore = "requires browser, network, live site, and credentials"]
async fn settings_sidebar_and_notification_toggles() -> anyhow::Result<()> {
    let config = live_config()?;
    if !require_credentials(&config) {
        return Ok(());
    }
    let account_url = format!("{}/account", config.base_url);
    let notifications_url = format!("{}/account_notifications", config.base_url);
    with_session(&config, &config.base_url, "settings", async |session| {
        auth::sign_in(session, &config.credentials).await?;

        let visited = settings::walk_sidebar_sections(session, &account_url).await?;
        ensure(!visited.is_empty(), "no settings sections visited")?;
        for url in &visited {
            ensure_contains(url, "youtube.com", "settings section URL")?;
        }

        let count = settings::notification_toggle_count(session, &notifications_url).await?;
        ensure(count > 0, "no notification toggles found")?;

        let flipped = settings::flip_notification_toggle(session, 0).await?;
        // Flip it back so the account state is unchanged for the next run.
        let restored = settings::flip_notification_toggle(session, 0).await?;
        ensure(flipped != restored, "toggle did not restore")
    })
    .await
}
