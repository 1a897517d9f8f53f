//! Replacing matches of a query.

use anyhow::Result;
use sift_buffer::Match;

use crate::cursor::SearchCursor;
use crate::host::SearchHost;
use crate::query::Query;

/// Expand `$0`..`$9` in `template` with capture groups of `m`.
///
/// Groups that did not participate expand to nothing. A `$` not followed
/// by a digit is kept as is.
pub fn expand_template(template: &str, m: &Match) -> String {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' {
            if let Some(index) = chars.peek().and_then(|c| c.to_digit(10)) {
                chars.next();
                output.push_str(m.group(index as usize).unwrap_or_default());
                continue;
            }
        }
        output.push(ch);
    }

    output
}

/// Replacement text for `m`: pattern queries expand capture references,
/// literal queries insert the template verbatim.
pub fn replacement_for(query: &Query, template: &str, m: &Match) -> String {
    if query.is_literal() {
        template.to_string()
    } else {
        expand_template(template, m)
    }
}

/// Replace the first match at or after the selection start, wrapping to
/// the document start.
///
/// The inserted text is left selected. Returns the number of replacements
/// made (0 or 1). A wrapped match at the starting position is not replaced.
pub fn replace_one<H: SearchHost>(
    host: &mut H,
    query: &Query,
    template: &str,
    scroll_margin: usize,
) -> Result<usize> {
    host.operation(|host| -> Result<usize> {
        let start = host.cursor_from();
        let mut cursor = SearchCursor::new(query, start);

        if cursor.find(host, false).is_none() {
            cursor = SearchCursor::new(query, host.doc_start());
            match cursor.find(host, false) {
                Some(m) if m.from != start => {}
                _ => return Ok(0),
            }
        }

        let Some(found) = cursor.current().cloned() else {
            return Ok(0);
        };
        host.set_selection(found.from, found.to);
        host.scroll_into_view(found.from, found.to, scroll_margin);

        let text = replacement_for(query, template, &found);
        cursor.replace(host, &text)?;
        if let Some(replaced) = cursor.current() {
            host.set_selection(replaced.from, replaced.to);
        }
        Ok(1)
    })
}

/// Replace every match in the document.
///
/// Matches are collected from one scan of the text and replaced from the
/// last to the first, so earlier positions stay valid and inserted text is
/// never searched again.
pub fn replace_all<H: SearchHost>(host: &mut H, query: &Query, template: &str) -> Result<usize> {
    let replaced = host.operation(|host| -> Result<usize> {
        let matches = host.find_all(query.matcher());
        for found in matches.iter().rev() {
            let text = replacement_for(query, template, found);
            host.replace_range(found.from, found.to, &text)?;
        }
        Ok(matches.len())
    })?;

    sift_logger::info(format!(
        "Replaced {} occurrence(s) of {:?}",
        replaced,
        query.source()
    ));
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::update_count;
    use crate::navigator::do_search;
    use crate::query::parse_query;
    use crate::state::{start_search, SearchState};
    use crate::test_host::TestHost;
    use sift_buffer::Position;

    fn capture_match(groups: &[Option<&str>]) -> Match {
        Match {
            from: Position::origin(),
            to: Position::origin(),
            groups: groups.iter().map(|g| g.map(String::from)).collect(),
        }
    }

    #[test]
    fn test_expand_template() {
        let m = capture_match(&[Some("user@host"), Some("user"), Some("host")]);
        assert_eq!(expand_template("$2-$1", &m), "host-user");
        assert_eq!(expand_template("[$0]", &m), "[user@host]");
        assert_eq!(expand_template("$x $ $9", &m), "$x $ ");
        assert_eq!(expand_template("$12", &m), "user2");
    }

    #[test]
    fn test_replace_one_with_capture_groups() {
        let mut host = TestHost::new("mail user@host now");
        let query = parse_query(r"/(\w+)@(\w+)/");

        assert_eq!(replace_one(&mut host, &query, "$2-$1", 2).unwrap(), 1);
        assert_eq!(host.buffer.text(), "mail host-user now");
        assert_eq!(host.selected(), (Position::at(0, 5), Position::at(0, 14)));
    }

    #[test]
    fn test_literal_query_inserts_template_verbatim() {
        let mut host = TestHost::new("price: 5");
        let query = parse_query("5");

        replace_one(&mut host, &query, "$1", 2).unwrap();
        assert_eq!(host.buffer.text(), "price: $1");
    }

    #[test]
    fn test_replace_one_starts_at_selection() {
        let mut host = TestHost::new("ab ab ab");
        host.set_selection(Position::at(0, 3), Position::at(0, 5));
        let query = parse_query("ab");

        replace_one(&mut host, &query, "X", 2).unwrap();
        assert_eq!(host.buffer.text(), "ab X ab");
        assert_eq!(host.selected(), (Position::at(0, 3), Position::at(0, 4)));
    }

    #[test]
    fn test_replace_one_wraps_to_start() {
        let mut host = TestHost::new("ab cd");
        host.set_caret(Position::at(0, 4));
        let query = parse_query("ab");

        assert_eq!(replace_one(&mut host, &query, "X", 2).unwrap(), 1);
        assert_eq!(host.buffer.text(), "X cd");
    }

    #[test]
    fn test_replace_one_without_match() {
        let mut host = TestHost::new("ab cd");
        let query = parse_query("zz");
        assert_eq!(replace_one(&mut host, &query, "X", 2).unwrap(), 0);
        assert_eq!(host.buffer.text(), "ab cd");
    }

    #[test]
    fn test_replace_all_leaves_no_matches() {
        let mut host = TestHost::new("cat cab\ncap");
        let query = parse_query("ca");

        assert_eq!(replace_all(&mut host, &query, "do").unwrap(), 3);
        assert_eq!(host.buffer.text(), "dot dob\ndop");
        assert_eq!(host.operations, 1);

        let mut state = SearchState::default();
        start_search(&mut host, &mut state, "ca");
        assert_eq!(update_count(&host, &state).to_string(), "0 matches found.");
    }

    #[test]
    fn test_replace_all_does_not_rescan_insertions() {
        let mut host = TestHost::new("a a a");
        let query = parse_query("a");

        assert_eq!(replace_all(&mut host, &query, "aa").unwrap(), 3);
        assert_eq!(host.buffer.text(), "aa aa aa");
    }

    #[test]
    fn test_replace_all_with_empty_replacement() {
        let mut host = TestHost::new("xaxbx\nx");
        let query = parse_query("x");

        assert_eq!(replace_all(&mut host, &query, "").unwrap(), 4);
        assert_eq!(host.buffer.text(), "ab\n");
    }

    #[test]
    fn test_replace_all_across_lines() {
        let mut host = TestHost::new("one\ntwo\n");
        let query = parse_query(r"one\ntwo");

        assert_eq!(replace_all(&mut host, &query, "joined").unwrap(), 1);
        assert_eq!(host.buffer.text(), "joined\n");
    }

    #[test]
    fn test_find_then_replace_selected_match() {
        let mut host = TestHost::new("cat cab cap");
        let mut state = SearchState::default();
        do_search(&mut host, &mut state, "cab", false, true, 2);

        let query = state.query.clone().unwrap();
        replace_one(&mut host, &query, "dog", 2).unwrap();
        assert_eq!(host.buffer.text(), "cat dog cap");
    }

    #[test]
    fn test_replace_all_scans_document_once() {
        let mut host = TestHost::new(&"ab cd\n".repeat(2000));
        let query = parse_query(r"/(\w)(\w)/");

        assert_eq!(replace_all(&mut host, &query, "$2$1").unwrap(), 4000);
        assert_eq!(host.buffer.text(), "ba dc\n".repeat(2000));
        assert_eq!(host.scans.get(), 1);
        assert_eq!(host.operations, 1);
    }
}
