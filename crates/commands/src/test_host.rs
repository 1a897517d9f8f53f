//! In-memory editor used by the command tests.

use anyhow::Result;
use regex::Regex;
use sift_buffer::{Match, Position, SearchDirection, Selection, TextBuffer};
use sift_text_search::{
    AnnotationId, DocumentId, MatchAnnotations, OverlayId, Query, SearchHost, SearchOverlay,
};

use crate::host::{DialogPlacement, DialogPresenter, EditorHost};

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub shown: Vec<DialogPlacement>,
    pub visible: bool,
    pub hides: usize,
    pub editor_focused: usize,
}

impl DialogPresenter for RecordingPresenter {
    fn show(&mut self, placement: DialogPlacement) {
        self.shown.push(placement);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hides += 1;
    }

    fn focus_editor(&mut self) {
        self.editor_focused += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingAnnotations {
    next_id: u64,
    pub active: Vec<AnnotationId>,
    pub clears: usize,
}

impl MatchAnnotations for RecordingAnnotations {
    fn show_matches(&mut self, _query: &Query) -> AnnotationId {
        self.next_id += 1;
        let id = AnnotationId(self.next_id);
        self.active.push(id);
        id
    }

    fn clear(&mut self, id: AnnotationId) {
        self.active.retain(|active| *active != id);
        self.clears += 1;
    }
}

pub struct TestEditor {
    pub buffer: TextBuffer,
    pub selection: Selection,
    pub read_only: bool,
    pub overlays: Vec<(OverlayId, SearchOverlay)>,
    pub presenter: Option<RecordingPresenter>,
    pub annotations: Option<RecordingAnnotations>,
    next_overlay: u64,
}

impl TestEditor {
    /// Editor with dialog and annotation support
    pub fn new(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            selection: Selection::caret(Position::origin()),
            read_only: false,
            overlays: Vec::new(),
            presenter: Some(RecordingPresenter::default()),
            annotations: Some(RecordingAnnotations::default()),
            next_overlay: 0,
        }
    }

    /// Editor without any optional capability
    pub fn bare(text: &str) -> Self {
        Self {
            presenter: None,
            annotations: None,
            ..Self::new(text)
        }
    }

    pub fn selected_text(&self) -> String {
        self.selection_text()
    }

    pub fn presenter(&self) -> &RecordingPresenter {
        self.presenter.as_ref().unwrap()
    }
}

impl SearchHost for TestEditor {
    fn document_id(&self) -> DocumentId {
        DocumentId(7)
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

    fn scroll_into_view(&mut self, _from: Position, _to: Position, _margin: usize) {}

    fn find_match(
        &self,
        matcher: &Regex,
        anchor: Position,
        direction: SearchDirection,
    ) -> Option<Match> {
        self.buffer.find_match(matcher, anchor, direction)
    }

    fn find_all(&self, matcher: &Regex) -> Vec<Match> {
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
}

impl EditorHost for TestEditor {
    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn dialogs(&mut self) -> Option<&mut dyn DialogPresenter> {
        self.presenter
            .as_mut()
            .map(|p| p as &mut dyn DialogPresenter)
    }
}
