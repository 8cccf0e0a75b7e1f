//! Failure classification for the stale-metadata retry.

use std::error::Error;

/// Returns `true` if any error in the `source` chain of `err` (itself
/// included) has `signal` in its message.
///
/// An empty `signal` never matches.
#[must_use]
pub fn is_stale_metadata_signal(err: &(dyn Error + 'static), signal: &str) -> bool {
    if signal.is_empty() {
        return false;
    }
    let mut current = Some(err);
    while let Some(e) = current {
        if e.to_string().contains(signal) {
            return true;
        }
        current = e.source();
    }
    false
}
