//! Boundary between the search engine and the editor that hosts it.

use anyhow::Result;
use regex::Regex;
use sift_buffer::{Match, Position, SearchDirection};

use crate::overlay::SearchOverlay;
use crate::query::Query;

/// Identity of an open document. Search state is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// Handle of an installed highlight overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Handle of a match annotation (scrollbar marks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationId(pub u64);

/// Optional host capability: marking every match outside the text area.
pub trait MatchAnnotations {
    /// Start annotating matches of `query`.
    fn show_matches(&mut self, query: &Query) -> AnnotationId;

    /// Remove a previously created annotation.
    fn clear(&mut self, id: AnnotationId);
}

/// Editor operations the search engine relies on.
///
/// Positions are `(line, column)` with columns counted in chars.
pub trait SearchHost {
    fn document_id(&self) -> DocumentId;

    /// Full document text, lines joined with `\n`
    fn text(&self) -> String;

    fn doc_start(&self) -> Position {
        Position::origin()
    }

    fn doc_end(&self) -> Position;

    /// Start of the primary selection
    fn cursor_from(&self) -> Position;

    /// Caret (selection head)
    fn cursor_head(&self) -> Position;

    fn selection_text(&self) -> String;

    fn set_selection(&mut self, from: Position, to: Position);

    /// Bring `from..to` into view with `margin` rows of context.
    fn scroll_into_view(&mut self, from: Position, to: Position, margin: usize);

    /// Next non-empty match of `matcher` from `anchor` in `direction`.
    fn find_match(
        &self,
        matcher: &Regex,
        anchor: Position,
        direction: SearchDirection,
    ) -> Option<Match>;

    /// Every non-empty match of `matcher` in document order.
    fn find_all(&self, matcher: &Regex) -> Vec<Match>;

    fn get_range(&self, from: Position, to: Position) -> Result<String>;

    /// Replace `from..to` with `text`, returning the end of the new text.
    fn replace_range(&mut self, from: Position, to: Position, text: &str) -> Result<Position>;

    fn add_overlay(&mut self, overlay: SearchOverlay) -> OverlayId;

    /// Remove an overlay. `None` is a no-op.
    fn remove_overlay(&mut self, id: Option<OverlayId>);

    /// Annotation capability, if the host has one
    fn annotations(&mut self) -> Option<&mut dyn MatchAnnotations> {
        None
    }

    /// Run `f` as one atomic update: observers see a single change and
    /// the view is refreshed once at the end.
    fn operation<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        f(self)
    }
}
