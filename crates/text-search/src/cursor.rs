use anyhow::Result;
use sift_buffer::{Match, Position, SearchDirection};

use crate::host::SearchHost;
use crate::query::Query;

/// Stateful iterator over the matches of a query in a host document.
///
/// Each `find` continues from the current match: forward from its end,
/// backward from its start. Before the first hit it starts from the
/// position it was created at.
#[derive(Debug)]
pub struct SearchCursor<'q> {
    query: &'q Query,
    start: Position,
    current: Option<Match>,
}

impl<'q> SearchCursor<'q> {
    pub fn new(query: &'q Query, start: Position) -> Self {
        Self {
            query,
            start,
            current: None,
        }
    }

    /// Move to the next (or previous) match.
    pub fn find<H: SearchHost>(&mut self, host: &H, reverse: bool) -> Option<&Match> {
        let anchor = match (&self.current, reverse) {
            (Some(m), false) => m.to,
            (Some(m), true) => m.from,
            (None, _) => self.start,
        };

        self.current = host.find_match(
            self.query.matcher(),
            anchor,
            SearchDirection::from_reverse(reverse),
        );
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    pub fn into_match(self) -> Option<Match> {
        self.current
    }

    /// Replace the current match. The cursor then sits on the inserted
    /// text, so the next forward `find` resumes after it.
    pub fn replace<H: SearchHost>(&mut self, host: &mut H, text: &str) -> Result<()> {
        let Some(current) = self.current.as_mut() else {
            anyhow::bail!("No current match to replace");
        };

        current.to = host.replace_range(current.from, current.to, text)?;
        Ok(())
    }
}
