use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::host::SearchHost;
use crate::query::{parse_query, strip_trailing_escape, Query};
use crate::state::SearchState;

/// Match count shown next to the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchCount(Option<usize>);

impl MatchCount {
    /// No active search: nothing to show
    pub fn cleared() -> Self {
        Self(None)
    }

    pub fn of(count: usize) -> Self {
        Self(Some(count))
    }

    pub fn count(&self) -> Option<usize> {
        self.0
    }
}

impl fmt::Display for MatchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => Ok(()),
            Some(1) => write!(f, "1 match found."),
            Some(n) => write!(f, "{} matches found.", n),
        }
    }
}

/// Count the non-empty matches of the active search in the whole document.
///
/// An unpaired trailing backslash is ignored so half-typed escapes still
/// count. Literal queries are counted ignoring case; patterns keep their
/// own flag.
pub fn update_count<H: SearchHost>(host: &H, state: &SearchState) -> MatchCount {
    let Some(raw) = state.query_text.as_deref().filter(|_| state.is_active()) else {
        return MatchCount::cleared();
    };

    let query = parse_query(strip_trailing_escape(raw));
    let text = host.text();
    let count = match &query {
        Query::Literal { text: literal, .. } => RegexBuilder::new(&regex::escape(literal))
            .case_insensitive(true)
            .build()
            .map(|matcher| count_matches(&matcher, &text))
            .unwrap_or(0),
        Query::Pattern { matcher, .. } => count_matches(matcher, &text),
    };

    MatchCount::of(count)
}

fn count_matches(matcher: &Regex, text: &str) -> usize {
    matcher.find_iter(text).filter(|m| !m.is_empty()).count()
}
