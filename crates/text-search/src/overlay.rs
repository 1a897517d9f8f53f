//! Highlight overlay: marks every match of the active query while a line
//! is being tokenized for display.

use regex::Regex;
use std::ops::Range;

use crate::query::Query;

/// Style of a token produced by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStyle {
    /// Text covered by a match of the active query
    Searching,
}

impl TokenStyle {
    /// Style class name
    pub fn as_str(self) -> &'static str {
        match self {
            TokenStyle::Searching => "searching",
        }
    }
}

/// Cursor over a single line of text. `pos` is a byte offset.
#[derive(Debug, Clone)]
pub struct LineStream<'a> {
    string: &'a str,
    pos: usize,
}

impl<'a> LineStream<'a> {
    pub fn new(string: &'a str) -> Self {
        Self { string, pos: 0 }
    }

    pub fn string(&self) -> &'a str {
        self.string
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn eol(&self) -> bool {
        self.pos >= self.string.len()
    }

    pub fn skip_to_end(&mut self) {
        self.pos = self.string.len();
    }

    /// Step over one character.
    fn advance_char(&mut self) {
        let step = self.string[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos = (self.pos + step).min(self.string.len());
    }
}

/// Line tokenizer that styles matches of one query.
#[derive(Debug, Clone)]
pub struct SearchOverlay {
    matcher: Regex,
}

impl SearchOverlay {
    pub fn new(query: &Query) -> Self {
        Self {
            matcher: query.matcher().clone(),
        }
    }

    /// Produce the next token from `stream`.
    ///
    /// A match starting at the current position is consumed (at least one
    /// character) and styled. Otherwise the stream jumps to the next match
    /// start, or to the end of the line, and yields an unstyled token.
    pub fn token(&self, stream: &mut LineStream<'_>) -> Option<TokenStyle> {
        match self.matcher.find_at(stream.string, stream.pos) {
            Some(m) if m.start() == stream.pos => {
                if m.is_empty() {
                    stream.advance_char();
                } else {
                    stream.pos = m.end();
                }
                Some(TokenStyle::Searching)
            }
            Some(m) => {
                stream.pos = m.start();
                None
            }
            None => {
                stream.skip_to_end();
                None
            }
        }
    }

    /// Styled spans of `line` as char column ranges.
    pub fn spans(&self, line: &str) -> Vec<Range<usize>> {
        let mut stream = LineStream::new(line);
        let mut byte_spans = Vec::new();

        while !stream.eol() {
            let start = stream.pos();
            if self.token(&mut stream).is_some() {
                byte_spans.push(start..stream.pos());
            }
        }

        byte_spans
            .into_iter()
            .map(|span| {
                let start = line[..span.start].chars().count();
                start..start + line[span].chars().count()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;

    #[test]
    fn test_spans_mark_every_match() {
        let overlay = SearchOverlay::new(&parse_query("ca"));
        assert_eq!(overlay.spans("cat cab cap"), vec![0..2, 4..6, 8..10]);
    }

    #[test]
    fn test_token_protocol() {
        let overlay = SearchOverlay::new(&parse_query("ab"));
        let mut stream = LineStream::new("xxabyy");

        assert_eq!(overlay.token(&mut stream), None);
        assert_eq!(stream.pos(), 2);
        assert_eq!(overlay.token(&mut stream), Some(TokenStyle::Searching));
        assert_eq!(stream.pos(), 4);
        assert_eq!(overlay.token(&mut stream), None);
        assert!(stream.eol());
    }

    #[test]
    fn test_zero_width_match_advances() {
        let overlay = SearchOverlay {
            matcher: Regex::new(r"\b").unwrap(),
        };
        let spans = overlay.spans("ab cd");
        assert_eq!(spans, vec![0..1, 2..3, 3..4]);
    }

    #[test]
    fn test_multibyte_columns() {
        let overlay = SearchOverlay::new(&parse_query("ж"));
        assert_eq!(overlay.spans("ёжик ёж"), vec![1..2, 6..7]);
        assert_eq!(TokenStyle::Searching.as_str(), "searching");
    }

    #[test]
    fn test_never_query_marks_nothing() {
        let overlay = SearchOverlay::new(&parse_query(""));
        assert!(overlay.spans("anything").is_empty());
    }
}
