//! Keyword routing of chat messages to deadline intents.
//!
//! No model call, just ordered containment checks. Specific words come first
//! so "what's overdue today?" is about overdue work, not today's.

use crate::types::Intent;

/// Keyword groups in priority order. First group with a hit wins.
const ROUTES: &[(&[&str], Intent)] = &[
    (&["overdue"], Intent::Overdue),
    (&["today"], Intent::Today),
    (&["tomorrow"], Intent::Tomorrow),
    (&["upcoming", "urgent"], Intent::Upcoming),
    (&["scan", "deadline"], Intent::All),
];

/// Decide which bucket(s) a message asks about.
///
/// Safe to call on any message: anything unrelated routes to `Intent::None`.
pub fn route(message: &str) -> Intent {
    let text = message.to_lowercase();

    ROUTES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(*k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::None)
}
