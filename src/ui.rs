//! Screen rendering: the text area, the find/replace dialog and the status bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use sift_buffer::Position;
use sift_commands::{EditorHost, FindReplace};
use sift_modal::DialogStyle;
use sift_text_search::TokenStyle;
use unicode_width::UnicodeWidthChar;

use crate::editor::{Editor, FocusTarget};

const SCROLLBAR_MARK: char = '▐';

/// Styles of the text area.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Style,
    pub selection: Style,
    pub search_match: Style,
    pub mark: Style,
    pub status: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Style::default().fg(Color::White).bg(Color::Black),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            search_match: Style::default().fg(Color::Black).bg(Color::Yellow),
            mark: Style::default().fg(Color::Yellow).bg(Color::Black),
            status: Style::default().fg(Color::Black).bg(Color::Gray),
        }
    }
}

impl Palette {
    fn token(&self, token: TokenStyle) -> Style {
        match token {
            TokenStyle::Searching => self.search_match,
        }
    }
}

/// Draw the whole screen. Returns the area the text was drawn in.
pub fn render(
    frame: &mut Frame<'_>,
    editor: &mut Editor,
    find_replace: &mut FindReplace,
    status: &str,
) -> Rect {
    let palette = Palette::default();
    let area = frame.area();
    let editor_area = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let status_area = Rect::new(area.x, area.y + editor_area.height, area.width, 1);

    let mut dialog = find_replace.dialog_mut();
    let text_area = match dialog.as_deref() {
        Some(dialog) => dialog.shrink_area(editor_area),
        None => editor_area,
    };

    // Rightmost column holds the match marks
    let lines_area = Rect::new(
        text_area.x,
        text_area.y,
        text_area.width.saturating_sub(1),
        text_area.height,
    );
    editor.resize(lines_area.width as usize, lines_area.height as usize);

    let buf = frame.buffer_mut();
    render_text(editor, lines_area, buf, &palette);
    render_marks(editor, text_area, buf, &palette);
    if let Some(dialog) = dialog.as_deref_mut() {
        dialog.render(editor_area, buf, &DialogStyle::default());
    }
    render_status(editor, status, status_area, buf, &palette);

    if editor.dialog_slot().focus() == FocusTarget::Editor {
        if let Some((x, y)) = caret_cell(editor, lines_area) {
            frame.set_cursor_position((x, y));
        }
    }
    text_area
}

fn render_text(editor: &Editor, area: Rect, buf: &mut Buffer, palette: &Palette) {
    buf.set_style(area, palette.text);
    let viewport = editor.viewport();
    let selection = editor.selection();

    for row in 0..area.height {
        let index = viewport.top_line + row as usize;
        let Some(line) = editor.buffer().line(index) else {
            break;
        };
        let highlights = editor.highlights(index);
        let y = area.y + row;
        let mut x = area.x;

        for (column, ch) in line.chars().enumerate().skip(viewport.left_column) {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if x + width > area.x + area.width {
                break;
            }

            let pos = Position::at(index, column);
            let style = if highlights.iter().any(|span| span.contains(&column)) {
                palette.token(TokenStyle::Searching)
            } else if !selection.is_empty() && selection.contains(&pos) {
                palette.selection
            } else {
                palette.text
            };
            buf[(x, y)].set_char(ch).set_style(style);
            x += width;
        }
    }
}

/// Scrollbar marks for the lines holding matches
fn render_marks(editor: &Editor, area: Rect, buf: &mut Buffer, palette: &Palette) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let x = area.x + area.width - 1;
    let total = editor.buffer().line_count().max(1);
    for line in editor.marked_lines() {
        let row = (line * area.height as usize / total) as u16;
        buf[(x, area.y + row.min(area.height - 1))]
            .set_char(SCROLLBAR_MARK)
            .set_style(palette.mark);
    }
}

fn render_status(editor: &Editor, message: &str, area: Rect, buf: &mut Buffer, palette: &Palette) {
    let buffer = editor.buffer();
    let head = editor.selection().head;
    let mut spans = vec![Span::styled(
        format!(" {} ", buffer.file_name().unwrap_or("[No Name]")),
        palette.status.add_modifier(Modifier::BOLD),
    )];
    if buffer.is_modified() {
        spans.push(Span::styled("[+] ", palette.status));
    }
    if editor.is_read_only() {
        spans.push(Span::styled("[RO] ", palette.status));
    }
    spans.push(Span::styled(
        format!("Ln {}, Col {}  ", head.line + 1, head.column + 1),
        palette.status,
    ));
    spans.push(Span::styled(message, palette.status));

    Paragraph::new(Line::from(spans))
        .style(palette.status)
        .render(area, buf);
}

/// Screen cell of the caret, if it is visible
fn caret_cell(editor: &Editor, area: Rect) -> Option<(u16, u16)> {
    let viewport = editor.viewport();
    let head = editor.selection().head;
    if head.line < viewport.top_line || head.column < viewport.left_column {
        return None;
    }
    let row = head.line - viewport.top_line;
    let line = editor.buffer().line(head.line).unwrap_or_default();
    let column: usize = line
        .chars()
        .skip(viewport.left_column)
        .take(head.column - viewport.left_column)
        .map(|ch| ch.width().unwrap_or(0))
        .sum();
    if row >= area.height as usize || column >= area.width as usize {
        return None;
    }
    Some((area.x + column as u16, area.y + row as u16))
}
