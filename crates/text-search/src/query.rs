//! Query parsing: raw dialog input to a literal or pattern matcher.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Source of the matcher every degenerate query collapses to.
const NEVER_MATCH: &str = "x^";

/// Parsed search query.
///
/// Both variants carry their compiled matcher. A query never matches the
/// empty string; [`parse_query`] replaces such queries with a pattern that
/// matches nothing.
#[derive(Debug, Clone)]
pub enum Query {
    /// Plain text, matched with metacharacters escaped
    Literal { text: String, matcher: Regex },
    /// Regular expression from `/body/flags` input
    Pattern {
        source: String,
        matcher: Regex,
        case_insensitive: bool,
    },
}

impl Query {
    /// Build a literal query.
    ///
    /// All-lowercase text matches case-insensitively; any uppercase
    /// character makes the match case-sensitive.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::never();
        }
        let case_insensitive = text == text.to_lowercase();
        match RegexBuilder::new(&regex::escape(&text))
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(matcher) => Query::Literal { text, matcher },
            Err(_) => Self::never(),
        }
    }

    /// Compile a pattern query.
    pub fn pattern(source: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        let matcher = RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .multi_line(true)
            .build()?;
        Ok(Query::Pattern {
            source: source.to_string(),
            matcher,
            case_insensitive,
        })
    }

    /// Query that matches nothing
    pub fn never() -> Self {
        static NEVER: OnceLock<Regex> = OnceLock::new();
        let matcher = NEVER
            .get_or_init(|| Regex::new(NEVER_MATCH).expect("never-matching pattern compiles"))
            .clone();
        Query::Pattern {
            source: NEVER_MATCH.to_string(),
            matcher,
            case_insensitive: false,
        }
    }

    /// Compiled matcher
    pub fn matcher(&self) -> &Regex {
        match self {
            Query::Literal { matcher, .. } | Query::Pattern { matcher, .. } => matcher,
        }
    }

    /// Literal text or pattern source
    pub fn source(&self) -> &str {
        match self {
            Query::Literal { text, .. } => text,
            Query::Pattern { source, .. } => source,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Query::Literal { .. })
    }

    pub fn is_case_insensitive(&self) -> bool {
        match self {
            Query::Literal { text, .. } => *text == text.to_lowercase(),
            Query::Pattern {
                case_insensitive, ..
            } => *case_insensitive,
        }
    }

    /// Whether this is the degenerate never-matching query
    pub fn is_never(&self) -> bool {
        matches!(self, Query::Pattern { source, .. } if source == NEVER_MATCH)
    }

    fn matches_empty(&self) -> bool {
        match self {
            Query::Literal { text, .. } => text.is_empty(),
            Query::Pattern { matcher, .. } => matcher.is_match(""),
        }
    }

    /// Render back to dialog input that parses to an equivalent query.
    pub fn to_input(&self) -> String {
        match self {
            _ if self.is_never() => String::new(),
            Query::Literal { text, .. } => {
                let mut input = String::with_capacity(text.len());
                for ch in text.chars() {
                    match ch {
                        '\\' => input.push_str("\\\\"),
                        '\n' => input.push_str("\\n"),
                        '\r' => input.push_str("\\r"),
                        '/' if input.is_empty() => input.push_str("\\/"),
                        other => input.push(other),
                    }
                }
                input
            }
            Query::Pattern {
                source,
                case_insensitive,
                ..
            } => format!("/{}/{}", source, if *case_insensitive { "i" } else { "" }),
        }
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.is_literal() == other.is_literal()
            && self.source() == other.source()
            && self.is_case_insensitive() == other.is_case_insensitive()
    }
}

impl Eq for Query {}

/// Parse raw dialog input into a query.
///
/// `/body/flags` input compiles `body` as a regular expression
/// (case-insensitive with the `i` flag); when it does not compile the
/// whole input is searched literally. Literal input goes through
/// [`parse_escapes`]. Queries that would match the empty string become
/// [`Query::never`].
pub fn parse_query(raw: &str) -> Query {
    let query = split_delimited(raw)
        .and_then(|(body, flags)| Query::pattern(body, flags.contains('i')).ok())
        .unwrap_or_else(|| Query::literal(parse_escapes(raw)));

    if query.matches_empty() {
        Query::never()
    } else {
        query
    }
}

/// Split `/body/flags` into body and flags.
fn split_delimited(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);

    if body.contains(['\n', '\r']) || !flags.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    Some((body, flags))
}

/// Resolve backslash escapes: `\n` and `\r` become line breaks, any other
/// escaped character stands for itself. A trailing lone backslash is kept.
pub fn parse_escapes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some(other) => output.push(other),
            None => output.push('\\'),
        }
    }

    output
}

/// Drop a trailing unpaired backslash.
pub fn strip_trailing_escape(raw: &str) -> &str {
    let trailing = raw.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        &raw[..raw.len() - 1]
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_literal_is_case_insensitive() {
        let query = parse_query("hello");
        assert!(query.is_literal());
        assert!(query.is_case_insensitive());
        assert!(query.matcher().is_match("say HeLLo"));
    }

    #[test]
    fn test_uppercase_literal_is_case_sensitive() {
        let query = parse_query("Hello");
        assert!(!query.is_case_insensitive());
        assert!(query.matcher().is_match("Hello"));
        assert!(!query.matcher().is_match("hello"));
    }

    #[test]
    fn test_delimited_patterns() {
        let query = parse_query("/abc/i");
        assert!(!query.is_literal());
        assert!(query.is_case_insensitive());
        assert!(query.matcher().is_match("xABCx"));

        let query = parse_query("/abc/");
        assert!(!query.is_literal());
        assert!(!query.is_case_insensitive());
        assert!(!query.matcher().is_match("ABC"));

        assert!(parse_query("abc").is_literal());
    }

    #[test]
    fn test_pattern_body_runs_to_last_slash() {
        let query = parse_query("/a/b/");
        assert_eq!(query.source(), "a/b");
        assert!(query.matcher().is_match("a/b"));
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let query = parse_query("/a(/");
        assert!(query.is_literal());
        assert_eq!(query.source(), "/a(/");
        assert!(query.matcher().is_match("x /a(/ y"));
    }

    #[test]
    fn test_bad_flags_mean_literal() {
        let query = parse_query("/abc/X");
        assert!(query.is_literal());
        assert_eq!(query.source(), "/abc/X");
        assert!(parse_query("/").is_literal());
    }

    #[test]
    fn test_literal_escapes_metacharacters() {
        let query = parse_query("a.b*");
        assert!(query.matcher().is_match("a.b*"));
        assert!(!query.matcher().is_match("axbb"));
    }

    #[test]
    fn test_empty_and_empty_matching_queries_never_match() {
        for raw in ["", "//", "/a*/", "/^/i"] {
            let query = parse_query(raw);
            assert!(query.is_never(), "{raw:?} should never match");
            assert!(!query.matcher().is_match("aaa"));
            assert!(!query.matcher().is_match(""));
        }
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(parse_escapes(r"a\nb"), "a\nb");
        assert_eq!(parse_escapes(r"a\rb"), "a\rb");
        assert_eq!(parse_escapes(r"\$\\x"), "$\\x");
        assert_eq!(parse_escapes("tail\\"), "tail\\");
    }

    #[test]
    fn test_literal_with_escaped_newline() {
        let query = parse_query(r"end\nstart");
        assert_eq!(query.source(), "end\nstart");
        assert!(query.matcher().is_match("the end\nstart"));
    }

    #[test]
    fn test_strip_trailing_escape() {
        assert_eq!(strip_trailing_escape("abc\\"), "abc");
        assert_eq!(strip_trailing_escape("abc\\\\"), "abc\\\\");
        assert_eq!(strip_trailing_escape("abc\\\\\\"), "abc\\\\");
        assert_eq!(strip_trailing_escape("abc"), "abc");
    }

    #[test]
    fn test_to_input_reparses_to_same_query() {
        for raw in ["cat", "/(\\w+)@(\\w+)/", "/abc/i", r"a\\b\nc", r"\/x/"] {
            let query = parse_query(raw);
            assert_eq!(parse_query(&query.to_input()), query, "{raw:?}");
        }
        assert_eq!(parse_query("").to_input(), "");
    }
}
