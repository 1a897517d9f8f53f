//! Moving between matches of the active search.

use sift_buffer::Match;

use crate::count::{update_count, MatchCount};
use crate::cursor::SearchCursor;
use crate::host::SearchHost;
use crate::state::{start_search, SearchState};

/// Rows of context kept around a selected match unless configured.
pub const DEFAULT_SCROLL_MARGIN: usize = 2;

/// Outcome of [`do_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Match that got selected, if navigation ran and found one
    pub found: Option<Match>,
    /// Updated match count message
    pub count: MatchCount,
}

/// Select the next (or previous) match of the active search, wrapping
/// around the document edges.
///
/// Forward search continues from the end of the last match, backward from
/// its start. Returns the selected match, or `None` when there is no
/// active search or the document has no match.
pub fn find_next<H: SearchHost>(
    host: &mut H,
    state: &mut SearchState,
    reverse: bool,
    scroll_margin: usize,
) -> Option<Match> {
    let query = state.query.clone()?;

    host.operation(|host| {
        let anchor = if reverse { state.pos_from } else { state.pos_to };
        let mut cursor = SearchCursor::new(&query, anchor.unwrap_or_else(|| host.doc_start()));

        if cursor.find(host, reverse).is_none() {
            let wrap = if reverse { host.doc_end() } else { host.doc_start() };
            cursor = SearchCursor::new(&query, wrap);
            cursor.find(host, reverse)?;
        }

        let found = cursor.into_match()?;
        host.set_selection(found.from, found.to);
        host.scroll_into_view(found.from, found.to, scroll_margin);
        state.pos_from = Some(found.from);
        state.pos_to = Some(found.to);
        Some(found)
    })
}

/// Start a search for `raw` anchored at the caret.
pub fn restart_search<H: SearchHost>(host: &mut H, state: &mut SearchState, raw: &str) {
    start_search(host, state, raw);
    let caret = host.cursor_head();
    state.pos_from = Some(caret);
    state.pos_to = Some(caret);
}

/// Run a search for dialog input `raw`.
///
/// New input restarts the search from the caret. With `move_to_next` the
/// next match is selected; without it (live typing) only the highlights
/// and the count follow the input.
pub fn do_search<H: SearchHost>(
    host: &mut H,
    state: &mut SearchState,
    raw: &str,
    reverse: bool,
    move_to_next: bool,
    scroll_margin: usize,
) -> SearchReport {
    if state.query_text.as_deref() != Some(raw) {
        restart_search(host, state, raw);
    }

    let found = if move_to_next {
        find_next(host, state, reverse, scroll_margin)
    } else {
        None
    };

    SearchReport {
        found,
        count: update_count(host, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clear_search;
    use crate::test_host::TestHost;
    use sift_buffer::Position;

    fn columns(found: Option<Match>) -> Option<(usize, usize)> {
        found.map(|m| (m.from.column, m.to.column))
    }

    #[test]
    fn test_cycles_through_matches_and_wraps() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "ca", false, true, 2);
        assert_eq!(columns(report.found), Some((0, 2)));
        assert_eq!(report.count.to_string(), "3 matches found.");

        assert_eq!(columns(find_next(&mut host, &mut state, false, 2)), Some((4, 6)));
        assert_eq!(columns(find_next(&mut host, &mut state, false, 2)), Some((8, 10)));
        assert_eq!(columns(find_next(&mut host, &mut state, false, 2)), Some((0, 2)));
        assert_eq!(host.selected(), (Position::at(0, 0), Position::at(0, 2)));
        assert_eq!(host.scrolls.last().map(|s| s.2), Some(2));
    }

    #[test]
    fn test_reverse_wraps_to_last_match() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "ca", true, true, 2);
        assert_eq!(columns(report.found), Some((8, 10)));
        assert_eq!(columns(find_next(&mut host, &mut state, true, 2)), Some((4, 6)));
    }

    #[test]
    fn test_single_match_wraps_onto_itself() {
        let mut host = TestHost::new("one two three");
        host.set_caret(Position::at(0, 10));
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "two", false, true, 2);
        assert_eq!(columns(report.found), Some((4, 7)));
        assert_eq!(columns(find_next(&mut host, &mut state, false, 2)), Some((4, 7)));
        assert_eq!(columns(find_next(&mut host, &mut state, true, 2)), Some((4, 7)));
    }

    #[test]
    fn test_search_starts_at_caret() {
        let mut host = TestHost::new("ab\nab\nab");
        host.set_caret(Position::at(1, 1));
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "ab", false, true, 2);
        assert_eq!(report.found.map(|m| m.from), Some(Position::at(2, 0)));
    }

    #[test]
    fn test_live_typing_does_not_move_selection() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "ca", false, false, 2);
        assert!(report.found.is_none());
        assert_eq!(report.count.to_string(), "3 matches found.");
        assert_eq!(host.highlighted(0), vec![0..2, 4..6, 8..10]);
        assert!(host.selection.is_empty());
        assert!(host.scrolls.is_empty());
    }

    #[test]
    fn test_same_input_continues_search() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();

        do_search(&mut host, &mut state, "ca", false, true, 2);
        let report = do_search(&mut host, &mut state, "ca", false, true, 2);
        assert_eq!(columns(report.found), Some((4, 6)));
        assert_eq!(host.overlays.len(), 1);
    }

    #[test]
    fn test_restart_after_edit_continues_from_caret() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();
        do_search(&mut host, &mut state, "ca", false, true, 2);

        host.set_caret(Position::at(0, 5));
        restart_search(&mut host, &mut state, "ca");
        assert_eq!(columns(find_next(&mut host, &mut state, false, 2)), Some((8, 10)));
        assert_eq!(host.overlays.len(), 1);
    }

    #[test]
    fn test_empty_query_never_matches() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "", false, true, 2);
        assert!(report.found.is_none());
        assert_eq!(report.count.to_string(), "0 matches found.");
        assert!(host.highlighted(0).is_empty());
    }

    #[test]
    fn test_find_next_without_search() {
        let mut host = TestHost::new("cat");
        let mut state = SearchState::default();
        assert!(find_next(&mut host, &mut state, false, 2).is_none());

        do_search(&mut host, &mut state, "cat", false, false, 2);
        clear_search(&mut host, &mut state);
        assert!(find_next(&mut host, &mut state, false, 2).is_none());
    }

    #[test]
    fn test_multiline_pattern_and_multibyte_columns() {
        let mut host = TestHost::new("ёж\nёжик");
        let mut state = SearchState::default();

        let report = do_search(&mut host, &mut state, "/ж$/", false, true, 2);
        let found = report.found.unwrap();
        assert_eq!((found.from, found.to), (Position::at(0, 1), Position::at(0, 2)));
        assert_eq!(report.count, MatchCount::of(1));
    }
}
