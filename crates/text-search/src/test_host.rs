//! In-memory host used by the engine tests.

use std::cell::Cell;

use anyhow::Result;
use regex::Regex;
use sift_buffer::{Match, Position, SearchDirection, Selection, TextBuffer};

use crate::host::{AnnotationId, DocumentId, MatchAnnotations, OverlayId, SearchHost};
use crate::overlay::SearchOverlay;
use crate::query::Query;

#[derive(Default)]
pub struct RecordingAnnotations {
    next_id: u64,
    pub active: Vec<(AnnotationId, String)>,
    pub cleared: Vec<AnnotationId>,
}

impl MatchAnnotations for RecordingAnnotations {
    fn show_matches(&mut self, query: &Query) -> AnnotationId {
        self.next_id += 1;
        let id = AnnotationId(self.next_id);
        self.active.push((id, query.source().to_string()));
        id
    }

    fn clear(&mut self, id: AnnotationId) {
        self.active.retain(|(active, _)| *active != id);
        self.cleared.push(id);
    }
}

pub struct TestHost {
    pub buffer: TextBuffer,
    pub selection: Selection,
    pub overlays: Vec<(OverlayId, SearchOverlay)>,
    pub annotations: Option<RecordingAnnotations>,
    pub scrolls: Vec<(Position, Position, usize)>,
    pub operations: usize,
    /// Number of times the document text was scanned for matches
    pub scans: Cell<usize>,
    next_overlay: u64,
}

impl TestHost {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            selection: Selection::caret(Position::origin()),
            overlays: Vec::new(),
            annotations: None,
            scrolls: Vec::new(),
            operations: 0,
            scans: Cell::new(0),
            next_overlay: 0,
        }
    }

    pub fn with_annotations(mut self) -> Self {
        self.annotations = Some(RecordingAnnotations::default());
        self
    }

    pub fn set_caret(&mut self, pos: Position) {
        self.selection = Selection::caret(pos);
    }

    pub fn selected(&self) -> (Position, Position) {
        (self.selection.start(), self.selection.end())
    }

    /// Styled columns of `line` under the installed overlays
    pub fn highlighted(&self, line: usize) -> Vec<std::ops::Range<usize>> {
        let text = self.buffer.line(line).unwrap_or_default();
        self.overlays
            .iter()
            .flat_map(|(_, overlay)| overlay.spans(&text))
            .collect()
    }
}

impl SearchHost for TestHost {
    fn document_id(&self) -> DocumentId {
        DocumentId(1)
    }

    fn text(&self) -> String {
        self.buffer.text()
    }

    fn doc_end(&self) -> Position {
        self.buffer.end_position()
    }

    fn cursor_from(&self) -> Position {
        self.selection.start()
    }

    fn cursor_head(&self) -> Position {
        self.selection.head
    }

    fn selection_text(&self) -> String {
        self.buffer
            .slice(&self.selection.start(), &self.selection.end())
            .unwrap_or_default()
    }

    fn set_selection(&mut self, from: Position, to: Position) {
        self.selection = Selection::new(from, to);
    }

    fn scroll_into_view(&mut self, from: Position, to: Position, margin: usize) {
        self.scrolls.push((from, to, margin));
    }

    fn find_match(
        &self,
        matcher: &Regex,
        anchor: Position,
        direction: SearchDirection,
    ) -> Option<Match> {
        self.scans.set(self.scans.get() + 1);
        self.buffer.find_match(matcher, anchor, direction)
    }

    fn find_all(&self, matcher: &Regex) -> Vec<Match> {
        self.scans.set(self.scans.get() + 1);
        self.buffer.find_all(matcher)
    }

    fn get_range(&self, from: Position, to: Position) -> Result<String> {
        self.buffer.slice(&from, &to)
    }

    fn replace_range(&mut self, from: Position, to: Position, text: &str) -> Result<Position> {
        self.buffer.replace_range(&from, &to, text)
    }

    fn add_overlay(&mut self, overlay: SearchOverlay) -> OverlayId {
        self.next_overlay += 1;
        let id = OverlayId(self.next_overlay);
        self.overlays.push((id, overlay));
        id
    }

    fn remove_overlay(&mut self, id: Option<OverlayId>) {
        if let Some(id) = id {
            self.overlays.retain(|(installed, _)| *installed != id);
        }
    }

    fn annotations(&mut self) -> Option<&mut dyn MatchAnnotations> {
        self.annotations
            .as_mut()
            .map(|a| a as &mut dyn MatchAnnotations)
    }

    fn operation<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.operations += 1;
        f(self)
    }
}
