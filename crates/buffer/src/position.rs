use std::cmp::{max, min};

/// Position in a document.
///
/// Columns count Unicode scalar values, so a position maps directly onto a
/// character index of the underlying rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-based)
    pub line: usize,
    /// Column in characters (0-based)
    pub column: usize,
}

impl Position {
    /// Create position at specified line and column
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start of document
    pub fn origin() -> Self {
        Self::default()
    }

    /// Move up, keeping the column (clamped later by the buffer)
    pub fn move_up(&mut self, lines: usize) {
        self.line = self.line.saturating_sub(lines);
    }

    /// Move down, stopping at `max_line`
    pub fn move_down(&mut self, lines: usize, max_line: usize) {
        self.line = min(self.line + lines, max_line);
    }

    /// Clamp column to line length
    pub fn clamp_column(&mut self, max_column: usize) {
        self.column = min(self.column, max_column);
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

/// Text selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Fixed end of the selection
    pub anchor: Position,
    /// Moving end of the selection (the caret)
    pub head: Position,
}

impl Selection {
    /// Create a new selection
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Empty selection at `pos`
    pub fn caret(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Start of selection (minimum position)
    pub fn start(&self) -> Position {
        min(self.anchor, self.head)
    }

    /// End of selection (maximum position)
    pub fn end(&self) -> Position {
        max(self.anchor, self.head)
    }

    /// Selection is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Check if selection contains given position
    pub fn contains(&self, pos: &Position) -> bool {
        pos >= &self.start() && pos < &self.end()
    }
}
