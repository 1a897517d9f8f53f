//! Terminal editor hosting the find/replace engine.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use sift_buffer::{Match, Position, SearchDirection, Selection, TextBuffer, Viewport};
use sift_commands::{DialogPlacement, DialogPresenter, EditorHost};
use sift_text_search::{
    AnnotationId, DocumentId, MatchAnnotations, OverlayId, Query, SearchHost, SearchOverlay,
};

/// Scrollbar marks for the lines holding matches of the active search.
#[derive(Debug, Default)]
pub struct ScrollbarMarks {
    next_id: u64,
    active: Option<(AnnotationId, Query)>,
}

impl ScrollbarMarks {
    pub fn query(&self) -> Option<&Query> {
        self.active.as_ref().map(|(_, query)| query)
    }
}

impl MatchAnnotations for ScrollbarMarks {
    fn show_matches(&mut self, query: &Query) -> AnnotationId {
        self.next_id += 1;
        let id = AnnotationId(self.next_id);
        self.active = Some((id, query.clone()));
        id
    }

    fn clear(&mut self, id: AnnotationId) {
        if self.active.as_ref().is_some_and(|(active, _)| *active == id) {
            self.active = None;
        }
    }
}

/// Where keyboard focus is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Editor,
    Dialog,
}

/// Dialog area reserved by the editor.
#[derive(Debug)]
pub struct DialogSlot {
    placement: Option<DialogPlacement>,
    focus: FocusTarget,
}

impl DialogSlot {
    fn new() -> Self {
        Self {
            placement: None,
            focus: FocusTarget::Editor,
        }
    }

    pub fn placement(&self) -> Option<DialogPlacement> {
        self.placement
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn focus_dialog(&mut self) {
        if self.placement.is_some() {
            self.focus = FocusTarget::Dialog;
        }
    }
}

impl DialogPresenter for DialogSlot {
    fn show(&mut self, placement: DialogPlacement) {
        self.placement = Some(placement);
        self.focus = FocusTarget::Dialog;
    }

    fn hide(&mut self) {
        self.placement = None;
    }

    fn focus_editor(&mut self) {
        self.focus = FocusTarget::Editor;
    }
}

/// Single-document editor.
pub struct Editor {
    buffer: TextBuffer,
    document: DocumentId,
    selection: Selection,
    viewport: Viewport,
    read_only: bool,
    overlays: Vec<(OverlayId, SearchOverlay)>,
    next_overlay: u64,
    marks: Option<ScrollbarMarks>,
    dialog: DialogSlot,
    operation_depth: usize,
    scroll_pending: bool,
}

impl Editor {
    pub fn new(buffer: TextBuffer, show_match_annotations: bool) -> Self {
        Self {
            buffer,
            document: DocumentId(1),
            selection: Selection::caret(Position::origin()),
            viewport: Viewport::new(80, 24),
            read_only: false,
            overlays: Vec::new(),
            next_overlay: 0,
            marks: show_match_annotations.then(ScrollbarMarks::default),
            dialog: DialogSlot::new(),
            operation_depth: 0,
            scroll_pending: false,
        }
    }

    /// Open `path`, starting empty if it does not exist yet.
    pub fn open(path: &Path, show_match_annotations: bool) -> Result<Self> {
        let buffer = if path.exists() {
            TextBuffer::from_file(path)
                .with_context(|| format!("Failed to open {}", path.display()))?
        } else {
            let mut buffer = TextBuffer::new();
            buffer.set_file_path(path);
            buffer
        };
        Ok(Self::new(buffer, show_match_annotations))
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn dialog_slot(&self) -> &DialogSlot {
        &self.dialog
    }

    pub fn dialog_slot_mut(&mut self) -> &mut DialogSlot {
        &mut self.dialog
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.resize(width, height);
        self.reveal_caret();
    }

    pub fn save(&mut self) -> Result<()> {
        self.buffer.save().context("Failed to save file")
    }

    /// Highlighted spans of line `index`, in char columns.
    pub fn highlights(&self, index: usize) -> Vec<Range<usize>> {
        let Some(line) = self.buffer.line(index) else {
            return Vec::new();
        };
        self.overlays
            .iter()
            .flat_map(|(_, overlay)| overlay.spans(&line))
            .collect()
    }

    /// Lines holding a match of the annotated query
    pub fn marked_lines(&self) -> BTreeSet<usize> {
        let Some(query) = self.marks.as_ref().and_then(ScrollbarMarks::query) else {
            return BTreeSet::new();
        };
        let text = self.buffer.text();
        query
            .matcher()
            .find_iter(&text)
            .filter(|m| !m.is_empty())
            .map(|m| self.buffer.byte_to_position(m.start()).line)
            .collect()
    }

    pub fn insert_char(&mut self, ch: char) -> Result<()> {
        let mut text = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut text))
    }

    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        if self.read_only {
            return Ok(());
        }
        let end = self
            .buffer
            .replace_range(&self.selection.start(), &self.selection.end(), text)?;
        self.selection = Selection::caret(end);
        self.reveal_caret();
        Ok(())
    }

    pub fn backspace(&mut self) -> Result<()> {
        if self.read_only {
            return Ok(());
        }
        if !self.selection.is_empty() {
            return self.insert_text("");
        }
        if let Some(pos) = self.buffer.backspace(&self.selection.head)? {
            self.selection = Selection::caret(pos);
        }
        self.reveal_caret();
        Ok(())
    }

    pub fn move_left(&mut self) {
        let mut pos = self.selection.start();
        if self.selection.is_empty() {
            if pos.column > 0 {
                pos.column -= 1;
            } else if pos.line > 0 {
                pos = Position::at(pos.line - 1, self.buffer.line_len(pos.line - 1));
            }
        }
        self.move_caret(pos);
    }

    pub fn move_right(&mut self) {
        let mut pos = self.selection.end();
        if self.selection.is_empty() {
            if pos.column < self.buffer.line_len(pos.line) {
                pos.column += 1;
            } else if pos.line + 1 < self.buffer.line_count() {
                pos = Position::at(pos.line + 1, 0);
            }
        }
        self.move_caret(pos);
    }

    pub fn move_up(&mut self) {
        let mut pos = self.selection.head;
        pos.move_up(1);
        self.move_caret(pos);
    }

    pub fn move_down(&mut self) {
        let mut pos = self.selection.head;
        pos.move_down(1, self.buffer.line_count().saturating_sub(1));
        self.move_caret(pos);
    }

    pub fn move_home(&mut self) {
        self.move_caret(Position::at(self.selection.head.line, 0));
    }

    pub fn move_end(&mut self) {
        let line = self.selection.head.line;
        self.move_caret(Position::at(line, self.buffer.line_len(line)));
    }

    /// Place the caret at a screen cell relative to the text area.
    pub fn click(&mut self, column: u16, row: u16) {
        let pos = Position::at(
            self.viewport.top_line + row as usize,
            self.viewport.left_column + column as usize,
        );
        self.move_caret(pos);
    }

    fn move_caret(&mut self, pos: Position) {
        self.selection = Selection::caret(self.buffer.clip(pos));
        self.reveal_caret();
    }

    fn reveal_caret(&mut self) {
        let head = self.selection.head;
        self.viewport
            .scroll_into_view(&head, &head, 0, self.buffer.line_count());
    }
}

impl SearchHost for Editor {
    fn document_id(&self) -> DocumentId {
        self.document
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
        self.selection = Selection::new(self.buffer.clip(from), self.buffer.clip(to));
    }

    fn scroll_into_view(&mut self, from: Position, to: Position, margin: usize) {
        self.viewport
            .scroll_into_view(&from, &to, margin, self.buffer.line_count());
        self.scroll_pending = false;
    }

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
        let end = self.buffer.replace_range(&from, &to, text)?;
        self.scroll_pending = true;
        Ok(end)
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
        self.marks
            .as_mut()
            .map(|marks| marks as &mut dyn MatchAnnotations)
    }

    fn operation<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.operation_depth += 1;
        let result = f(self);
        self.operation_depth -= 1;

        // Edits without an explicit scroll keep the caret visible
        if self.operation_depth == 0 && self.scroll_pending {
            self.scroll_pending = false;
            self.selection = Selection::new(
                self.buffer.clip(self.selection.anchor),
                self.buffer.clip(self.selection.head),
            );
            self.reveal_caret();
        }
        result
    }
}

impl EditorHost for Editor {
    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn dialogs(&mut self) -> Option<&mut dyn DialogPresenter> {
        Some(&mut self.dialog)
    }
}
