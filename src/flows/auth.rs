//! Sign-in and sign-out
//!
//! The account picker, consent walls, and two-factor prompts are all owned
//! by the identity provider; these steps cover the plain email+password path
//! the suite runs against its dedicated test account.

use crate::assertions::{ensure, ensure_contains};
use crate::{Credentials, HarnessError, HarnessResult, Locator, Session};

/// Sign in from the landing page: Sign in link, email, next, password, next,
/// then wait for the account avatar to confirm the session.
pub async fn sign_in(session: &Session, credentials: &Credentials) -> HarnessResult<()> {
    let email = credentials
        .email
        .as_deref()
        .ok_or_else(|| HarnessError::AssertionFailure("credentials missing email".to_string()))?;
    let password = credentials.password.as_deref().ok_or_else(|| {
        HarnessError::AssertionFailure("credentials missing password".to_string())
    })?;

    session
        .wait_clickable(&Locator::aria_label("Sign in"))
        .await?
        .click()
        .await?;

    session
        .wait_visible(&Locator::id("identifierId"))
        .await?
        .type_text(email)
        .await?;
    session
        .wait_clickable(&Locator::id("identifierNext"))
        .await?
        .click()
        .await?;

    session
        .wait_visible(&Locator::name("Passwd"))
        .await?
        .type_text(password)
        .await?;
    session
        .wait_clickable(&Locator::id("passwordNext"))
        .await?
        .click()
        .await?;

    let avatar = session.wait_present(&Locator::id("avatar-btn")).await?;
    ensure(
        avatar.is_displayed().await,
        "avatar button not shown after sign-in",
    )
}

/// Submit only the email step and return the inline error text, if any.
/// Used by the invalid-account scenarios.
pub async fn submit_email(session: &Session, email: &str) -> HarnessResult<String> {
    session
        .wait_clickable(&Locator::aria_label("Sign in"))
        .await?
        .click()
        .await?;
    session
        .wait_visible(&Locator::id("identifierId"))
        .await?
        .type_text(email)
        .await?;
    session
        .wait_clickable(&Locator::id("identifierNext"))
        .await?
        .click()
        .await?;

    let error = session
        .wait_visible(&Locator::css("div[jsname] [aria-live='assertive'], div[aria-live='assertive']"))
        .await?;
    error.text().await
}

pub async fn is_signed_in(session: &Session) -> bool {
    !session.find_all(&Locator::id("avatar-btn")).await.is_empty()
}

/// Open the avatar menu and sign out, then confirm the Sign in affordance
/// is back on the page.
pub async fn sign_out(session: &Session) -> HarnessResult<()> {
    session
        .wait_clickable(&Locator::id("avatar-btn"))
        .await?
        .click()
        .await?;
    session
        .wait_visible(&Locator::link_text("Sign out"))
        .await?
        .click()
        .await?;

    let source = session.page_source().await?;
    ensure_contains(&source, "Sign in", "post-logout page")
}
