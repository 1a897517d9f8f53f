use anyhow::{Context, Result};
use ropey::Rope;
use std::path::{Path, PathBuf};

use crate::{LineEnding, Position};

/// Text buffer based on Rope for efficient work with large files
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Rope structure for storing text
    rope: Rope,
    /// File path (if exists)
    file_path: Option<PathBuf>,
    /// Modified flag
    modified: bool,
    /// Line ending type (for saving)
    line_ending: LineEnding,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create buffer holding `text`
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            file_path: None,
            modified: false,
            line_ending: LineEnding::LF,
        }
    }

    /// Load file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let line_ending = if contents.contains("\r\n") {
            LineEnding::CRLF
        } else {
            LineEnding::LF
        };

        // Keep a single \n internally so columns never count a stray \r
        let rope = Rope::from_str(&contents.replace("\r\n", "\n"));

        Ok(Self {
            rope,
            file_path: Some(path.to_path_buf()),
            modified: false,
            line_ending,
        })
    }

    /// Save file
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = self.file_path.clone() {
            self.save_to(&path)
        } else {
            anyhow::bail!("No file path set")
        }
    }

    /// Save to specified file
    pub fn save_to<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = self.rope.to_string();
        let contents = match self.line_ending {
            LineEnding::LF => text,
            LineEnding::CRLF => text.replace('\n', "\r\n"),
        };

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get line by index, without its line break
    pub fn line(&self, index: usize) -> Option<String> {
        if index < self.line_count() {
            let line = self.rope.line(index).to_string();
            Some(line.trim_end_matches('\n').to_string())
        } else {
            None
        }
    }

    /// Get line length in characters (without newline character)
    pub fn line_len(&self, index: usize) -> usize {
        if index >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(index);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Get all text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total number of characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Position just past the last character
    pub fn end_position(&self) -> Position {
        let last = self.line_count().saturating_sub(1);
        Position::at(last, self.line_len(last))
    }

    /// Clamp a position into the document
    pub fn clip(&self, pos: Position) -> Position {
        let last = self.line_count().saturating_sub(1);
        if pos.line > last {
            return self.end_position();
        }
        Position::at(pos.line, pos.column.min(self.line_len(pos.line)))
    }

    /// Convert position to character index in Rope
    pub fn position_to_char_idx(&self, pos: &Position) -> Result<usize> {
        if pos.line >= self.line_count() {
            anyhow::bail!("Line {} out of range", pos.line);
        }
        let column = pos.column.min(self.line_len(pos.line));
        Ok(self.rope.line_to_char(pos.line) + column)
    }

    /// Convert character index to position
    pub fn char_idx_to_position(&self, char_idx: usize) -> Position {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        Position::at(line, char_idx - self.rope.line_to_char(line))
    }

    /// Convert byte offset into the full text to position
    pub fn byte_to_position(&self, byte_idx: usize) -> Position {
        let byte_idx = byte_idx.min(self.rope.len_bytes());
        self.char_idx_to_position(self.rope.byte_to_char(byte_idx))
    }

    /// Convert position to byte offset into the full text
    pub fn position_to_byte(&self, pos: &Position) -> Result<usize> {
        let char_idx = self.position_to_char_idx(pos)?;
        Ok(self.rope.char_to_byte(char_idx))
    }

    /// Get text between two positions
    pub fn slice(&self, start: &Position, end: &Position) -> Result<String> {
        let start_idx = self.position_to_char_idx(start)?;
        let end_idx = self.position_to_char_idx(end)?;
        if start_idx >= end_idx {
            return Ok(String::new());
        }
        Ok(self.rope.slice(start_idx..end_idx).to_string())
    }

    /// Insert text at position, returning the position after the inserted text
    pub fn insert(&mut self, pos: &Position, text: &str) -> Result<Position> {
        let char_idx = self.position_to_char_idx(pos)?;
        self.rope.insert(char_idx, text);
        self.modified = true;
        Ok(self.char_idx_to_position(char_idx + text.chars().count()))
    }

    /// Delete character before position (backspace)
    pub fn backspace(&mut self, pos: &Position) -> Result<Option<Position>> {
        let char_idx = self.position_to_char_idx(pos)?;
        if char_idx == 0 {
            return Ok(None);
        }
        self.rope.remove(char_idx - 1..char_idx);
        self.modified = true;
        Ok(Some(self.char_idx_to_position(char_idx - 1)))
    }

    /// Delete text range
    pub fn delete_range(&mut self, start: &Position, end: &Position) -> Result<()> {
        let start_idx = self.position_to_char_idx(start)?;
        let end_idx = self.position_to_char_idx(end)?;

        if start_idx < end_idx {
            self.rope.remove(start_idx..end_idx);
            self.modified = true;
        }

        Ok(())
    }

    /// Replace text range, returning the position after the new text
    pub fn replace_range(&mut self, start: &Position, end: &Position, text: &str) -> Result<Position> {
        self.delete_range(start, end)?;
        self.insert(start, text)
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Set the path `save` writes to
    pub fn set_file_path<P: AsRef<Path>>(&mut self, path: P) {
        self.file_path = Some(path.as_ref().to_path_buf());
    }

    /// Get file name
    pub fn file_name(&self) -> Option<&str> {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
