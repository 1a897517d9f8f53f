//! Regex match primitive behind search cursors.

use regex::{Captures, Regex};

use crate::{Position, TextBuffer};

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    /// Direction from a "reverse" flag
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SearchDirection::Backward
        } else {
            SearchDirection::Forward
        }
    }
}

/// A match location in a document, with capture groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Start of the match
    pub from: Position,
    /// End of the match (exclusive)
    pub to: Position,
    /// Capture groups; index 0 is the whole match
    pub groups: Vec<Option<String>>,
}

impl Match {
    /// Text of capture group `index`, if it participated in the match
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }
}

impl TextBuffer {
    /// Find the nearest non-empty match of `matcher` relative to `anchor`.
    ///
    /// Forward returns the first match starting at or after the anchor.
    /// Backward returns the last match ending at or before it.
    pub fn find_match(
        &self,
        matcher: &Regex,
        anchor: Position,
        direction: SearchDirection,
    ) -> Option<Match> {
        let text = self.text();
        let anchor_byte = self.position_to_byte(&self.clip(anchor)).ok()?;

        match direction {
            SearchDirection::Forward => {
                let mut start = anchor_byte;
                while start <= text.len() {
                    let caps = matcher.captures_at(&text, start)?;
                    let whole = caps.get(0)?;
                    if !whole.is_empty() {
                        return Some(self.match_from_captures(&caps));
                    }
                    // Step over the zero-width hit
                    start = match text[whole.end()..].chars().next() {
                        Some(ch) => whole.end() + ch.len_utf8(),
                        None => break,
                    };
                }
                None
            }
            SearchDirection::Backward => matcher
                .captures_iter(&text)
                .take_while(|caps| caps.get(0).is_some_and(|m| m.start() < anchor_byte))
                .filter(|caps| {
                    caps.get(0)
                        .is_some_and(|m| !m.is_empty() && m.end() <= anchor_byte)
                })
                .last()
                .map(|caps| self.match_from_captures(&caps)),
        }
    }

    /// Every non-empty match of `matcher` in document order, from a single
    /// scan of the text.
    pub fn find_all(&self, matcher: &Regex) -> Vec<Match> {
        let text = self.text();
        matcher
            .captures_iter(&text)
            .filter(|caps| caps.get(0).is_some_and(|m| !m.is_empty()))
            .map(|caps| self.match_from_captures(&caps))
            .collect()
    }

    fn match_from_captures(&self, caps: &Captures<'_>) -> Match {
        let (start, end) = caps
            .get(0)
            .map(|m| (m.start(), m.end()))
            .unwrap_or_default();
        Match {
            from: self.byte_to_position(start),
            to: self.byte_to_position(end),
            groups: caps
                .iter()
                .map(|g| g.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_forward_from_anchor() {
        let buf = TextBuffer::from_text("cat cab cap");
        let m = buf
            .find_match(&re("ca"), Position::at(0, 1), SearchDirection::Forward)
            .unwrap();
        assert_eq!(m.from, Position::at(0, 4));
        assert_eq!(m.to, Position::at(0, 6));
        assert_eq!(m.group(0), Some("ca"));
    }

    #[test]
    fn test_forward_includes_match_at_anchor() {
        let buf = TextBuffer::from_text("cat cab");
        let m = buf
            .find_match(&re("cab"), Position::at(0, 4), SearchDirection::Forward)
            .unwrap();
        assert_eq!(m.from, Position::at(0, 4));
    }

    #[test]
    fn test_backward_requires_match_before_anchor() {
        let buf = TextBuffer::from_text("cat cab cap");
        let m = buf
            .find_match(&re("ca"), Position::at(0, 8), SearchDirection::Backward)
            .unwrap();
        assert_eq!(m.from, Position::at(0, 4));

        // "ca" at 8..10 straddles anchor 9, so it is not a candidate
        let m = buf
            .find_match(&re("ca"), Position::at(0, 9), SearchDirection::Backward)
            .unwrap();
        assert_eq!(m.from, Position::at(0, 4));

        assert!(buf
            .find_match(&re("ca"), Position::at(0, 1), SearchDirection::Backward)
            .is_none());
    }

    #[test]
    fn test_multiline_positions_and_groups() {
        let buf = TextBuffer::from_text("one\nuser@host\n");
        let m = buf
            .find_match(
                &re(r"(\w+)@(\w+)(!)?"),
                Position::origin(),
                SearchDirection::Forward,
            )
            .unwrap();
        assert_eq!(m.from, Position::at(1, 0));
        assert_eq!(m.to, Position::at(1, 9));
        assert_eq!(m.group(1), Some("user"));
        assert_eq!(m.group(2), Some("host"));
        assert_eq!(m.group(3), None);
    }

    #[test]
    fn test_zero_width_matches_are_skipped() {
        let buf = TextBuffer::from_text("ab cd");
        let m = buf
            .find_match(&re(r"c|\b"), Position::origin(), SearchDirection::Forward)
            .unwrap();
        assert_eq!(m.from, Position::at(0, 3));
        assert_eq!(m.group(0), Some("c"));
        assert!(buf
            .find_match(&re(r"\b"), Position::origin(), SearchDirection::Forward)
            .is_none());
    }

    #[test]
    fn test_find_all_in_document_order() {
        let buf = TextBuffer::from_text("cat\ncab cap\n");
        let all = buf.find_all(&re(r"ca(\w)|\b"));
        let starts: Vec<Position> = all.iter().map(|m| m.from).collect();
        assert_eq!(
            starts,
            vec![Position::at(0, 0), Position::at(1, 0), Position::at(1, 4)]
        );
        assert_eq!(all[2].to, Position::at(1, 7));
        assert_eq!(all[2].group(1), Some("p"));
        assert!(buf.find_all(&re("dog")).is_empty());
    }
}
