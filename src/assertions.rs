//! Outcome checks
//!
//! Thin helpers that turn an observed-state mismatch into an
//! `AssertionFailure`, which `?`-propagates out of the flow and fails the
//! hosting test. No retries, no soft assertions.

use crate::error::{HarnessError, HarnessResult};

/// Fail with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> HarnessResult<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailure(message.into()))
    }
}

/// Fail unless `haystack` contains `needle`.
pub fn ensure_contains(haystack: &str, needle: &str, context: &str) -> HarnessResult<()> {
    ensure(
        haystack.contains(needle),
        format!("{context}: expected to find '{needle}'"),
    )
}

/// Fail unless both values are equal.
pub fn ensure_eq<T: PartialEq + std::fmt::Debug>(
    actual: T,
    expected: T,
    context: &str,
) -> HarnessResult<()> {
    ensure(
        actual == expected,
        format!("{context}: expected {expected:?}, got {actual:?}"),
    )
}
