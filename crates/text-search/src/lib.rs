//! Find and replace engine for sift.
//!
//! Parses search queries, keeps per-document search state, highlights
//! matches through an overlay, navigates between matches with wrap-around,
//! replaces single or all matches and counts them. The engine works against
//! any editor implementing [`SearchHost`].

mod count;
mod cursor;
mod host;
mod navigator;
mod overlay;
mod query;
mod replace;
mod state;

#[cfg(test)]
mod test_host;

pub use count::{update_count, MatchCount};
pub use cursor::SearchCursor;
pub use host::{AnnotationId, DocumentId, MatchAnnotations, OverlayId, SearchHost};
pub use navigator::{do_search, find_next, restart_search, SearchReport, DEFAULT_SCROLL_MARGIN};
pub use overlay::{LineStream, SearchOverlay, TokenStyle};
pub use query::{parse_escapes, parse_query, strip_trailing_escape, Query};
pub use replace::{expand_template, replace_all, replace_one, replacement_for};
pub use state::{clear_search, start_search, SearchState, SearchStates};

pub use sift_buffer::{Match, Position, SearchDirection};
