//! Text buffer with rope data structure for sift.
//!
//! Provides the document model the find/replace engine runs against:
//! rope-backed text storage, positions and selections, a scrolling viewport,
//! and the regex match primitive search cursors are built on.

mod buffer;
mod position;
mod search;
mod viewport;

pub use buffer::TextBuffer;
pub use position::{Position, Selection};
pub use search::{Match, SearchDirection};
pub use viewport::Viewport;

/// Line ending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    LF, // Unix \n
    CRLF, // Windows \r\n
}
