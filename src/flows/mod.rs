//! Scripted user journeys
//!
//! Each flow is a straight-line sequence of bounded waits and interaction
//! steps against the live site, returning observed state for the caller to
//! assert on. Failure anywhere aborts the rest of the sequence; there is no
//! partial-failure or resumption model. Locators favor stable attributes
//! (`id`, `name`, `aria-label`) over structural paths, which the front end
//! rearranges constantly.

pub mod auth;
pub mod comments;
pub mod home;
pub mod playlists;
pub mod search;
pub mod settings;
pub mod subscriptions;
pub mod video;
