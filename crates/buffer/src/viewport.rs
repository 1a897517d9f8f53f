use crate::Position;

/// Viewport for virtual scrolling
/// Tracks which part of document is visible on screen
#[derive(Debug, Clone)]
pub struct Viewport {
    /// First visible line (0-based)
    pub top_line: usize,
    /// Number of visible lines
    pub height: usize,
    /// Horizontal scroll (left column)
    pub left_column: usize,
    /// Width of visible area
    pub width: usize,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            top_line: 0,
            height,
            left_column: 0,
            width,
        }
    }

    /// Update viewport dimensions
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Get index of last visible line (exclusive)
    pub fn bottom_line(&self) -> usize {
        self.top_line + self.height
    }

    /// Get index of last visible column (exclusive)
    pub fn right_column(&self) -> usize {
        self.left_column + self.width
    }

    /// Check if line is visible
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line < self.bottom_line()
    }

    /// Check if position is visible
    pub fn is_position_visible(&self, pos: &Position) -> bool {
        self.is_line_visible(pos.line)
            && pos.column >= self.left_column
            && pos.column < self.right_column()
    }

    /// Scroll so the span `from..to` is visible with `margin` rows of context.
    ///
    /// The margin shrinks to fit small viewports. Returns true if the
    /// viewport moved.
    pub fn scroll_into_view(
        &mut self,
        from: &Position,
        to: &Position,
        margin: usize,
        total_lines: usize,
    ) -> bool {
        if self.height == 0 {
            return false;
        }
        let before = (self.top_line, self.left_column);
        let margin = margin.min(self.height.saturating_sub(1) / 2);

        // Vertical: keep `to` visible first, then pull `from` back in
        let lowest = to.line + margin;
        if lowest >= self.bottom_line() {
            self.top_line = lowest + 1 - self.height;
        }
        let highest = from.line.saturating_sub(margin);
        if highest < self.top_line {
            self.top_line = highest;
        }

        let max_top = total_lines.saturating_sub(self.height);
        self.top_line = self.top_line.min(max_top);

        // Horizontal
        if self.width > 0 {
            if to.column >= self.right_column() {
                self.left_column = to.column + 1 - self.width;
            }
            if from.column < self.left_column {
                self.left_column = from.column;
            }
        }

        before != (self.top_line, self.left_column)
    }

    /// Scroll up by N lines
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        if self.top_line > 0 {
            self.top_line = self.top_line.saturating_sub(lines);
            true
        } else {
            false
        }
    }

    /// Scroll down by N lines
    pub fn scroll_down(&mut self, lines: usize, total_lines: usize) -> bool {
        let max_top = total_lines.saturating_sub(self.height);
        if self.top_line < max_top {
            self.top_line = (self.top_line + lines).min(max_top);
            true
        } else {
            false
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
