//! Dialog rendering.
//!
//! - Placement: a full-width bar that shrinks the editor, or a floating
//!   frame at the top-center (or bottom-center) of the editor
//! - Frame rendering with title
//! - Labeled input fields with cursor, selection and placeholder

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::dialog::{AdvancedDialog, Focus};
use crate::text_input::TextInput;

/// Minimum width of a floating dialog
const MIN_FLOATING_WIDTH: u16 = 60;

/// Colors used to draw dialogs.
#[derive(Debug, Clone, Copy)]
pub struct DialogStyle {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub dim: Color,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::DarkGray,
            accent: Color::Yellow,
            dim: Color::Gray,
        }
    }
}

/// Calculate modal position at top-center of screen.
pub fn top_center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + 1; // Small offset from top
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Calculate modal position at bottom-center of screen.
pub fn bottom_center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = (r.y + r.height).saturating_sub(height + 1).max(r.y);
    Rect::new(x, y, width, height)
}

impl AdvancedDialog {
    /// Rows needed: borders, inputs, hints and the button row
    pub fn height(&self) -> u16 {
        let hints = self
            .inputs
            .iter()
            .filter(|input| input.template.hint.is_some())
            .count();
        let buttons = usize::from(!self.buttons.is_empty());
        (2 + self.inputs.len() + hints + buttons) as u16
    }

    /// Area the dialog occupies inside `editor_area`.
    pub fn area(&self, editor_area: Rect) -> Rect {
        let height = self.height().min(editor_area.height);
        if self.options.shrink_editor {
            let y = if self.options.bottom {
                editor_area.y + editor_area.height - height
            } else {
                editor_area.y
            };
            return Rect::new(editor_area.x, y, editor_area.width, height);
        }

        let width = MIN_FLOATING_WIDTH.max((u32::from(editor_area.width) * 7 / 10) as u16);
        if self.options.bottom {
            bottom_center_rect(width, height, editor_area)
        } else {
            top_center_rect(width, height, editor_area)
        }
    }

    /// Editor area left over while the dialog is open.
    ///
    /// Unchanged unless the dialog shrinks the editor.
    pub fn shrink_area(&self, editor_area: Rect) -> Rect {
        if !self.options.shrink_editor || self.is_closed() {
            return editor_area;
        }
        let height = self.height().min(editor_area.height);
        let remaining = editor_area.height - height;
        if self.options.bottom {
            Rect::new(editor_area.x, editor_area.y, editor_area.width, remaining)
        } else {
            Rect::new(
                editor_area.x,
                editor_area.y + height,
                editor_area.width,
                remaining,
            )
        }
    }

    /// Render the dialog over `editor_area`.
    pub fn render(&mut self, editor_area: Rect, buf: &mut Buffer, style: &DialogStyle) {
        let area = self.area(editor_area);
        self.last_area = Some(area);
        self.last_input_areas.clear();
        self.last_button_areas.clear();

        let inner = render_dialog_frame(area, buf, style, &self.title);
        let mut y = inner.y;
        let bottom = inner.y + inner.height;
        let label_width = self
            .inputs
            .iter()
            .map(|input| input.template.label.width())
            .max()
            .unwrap_or(0) as u16
            + 1;

        for (index, input) in self.inputs.iter().enumerate() {
            if y >= bottom {
                return;
            }
            let mut row = Rect::new(inner.x, y, inner.width, 1);

            if input.template.count_slot && !self.count.is_empty() {
                let count_width = self.count.width() as u16;
                if row.width > count_width + label_width {
                    buf.set_string(
                        row.x + row.width - count_width,
                        y,
                        &self.count,
                        Style::default().fg(style.accent),
                    );
                    row.width -= count_width + 1;
                }
            }

            let focused = self.focus == Focus::Input(index);
            render_labeled_input(
                buf,
                row,
                &input.template.label,
                label_width,
                &input.text,
                &input.template.placeholder,
                focused,
                style,
            );
            self.last_input_areas.push((row, index));
            y += 1;

            if let Some(hint) = &input.template.hint {
                if y < bottom {
                    buf.set_string(
                        inner.x + label_width,
                        y,
                        hint,
                        Style::default().fg(style.dim).add_modifier(Modifier::ITALIC),
                    );
                    y += 1;
                }
            }
        }

        if y >= bottom {
            return;
        }
        let mut x = inner.x;
        for (index, (label, _)) in self.buttons.iter().enumerate() {
            let selected = self.focus == Focus::Button(index);
            let (text, button_style) = if selected {
                (
                    format!("[ {} ]", label),
                    Style::default()
                        .fg(style.bg)
                        .bg(style.fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (format!("  {}  ", label), Style::default().fg(style.fg))
            };
            let width = text.width() as u16;
            if x + width > inner.x + inner.width {
                break;
            }

            buf.set_string(x, y, &text, button_style);
            self.last_button_areas
                .push((Rect::new(x, y, width, 1), index));
            x += width + 1;
        }
    }
}

/// Render dialog frame, returning the inner area.
pub fn render_dialog_frame(area: Rect, buf: &mut Buffer, style: &DialogStyle, title: &str) -> Rect {
    Clear.render(area, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(style.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.fg))
        .style(Style::default().fg(style.fg).bg(style.bg));

    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Render a text input field with cursor.
///
/// Long values scroll so the cursor stays visible.
pub fn render_input_field(
    buf: &mut Buffer,
    area: Rect,
    input: &TextInput,
    placeholder: &str,
    is_focused: bool,
    style: &DialogStyle,
) {
    if area.width == 0 {
        return;
    }
    let field_style = Style::default().fg(style.fg).bg(Color::Black);
    buf.set_style(area, field_style);

    if input.is_empty() {
        buf.set_string(area.x, area.y, placeholder, Style::default().fg(style.dim).bg(Color::Black));
    } else {
        // Drop leading chars until the cursor fits
        let before = input.text_before_cursor();
        let mut skip_width = before.width().saturating_sub(area.width as usize - 1);
        let visible: String = input
            .text()
            .chars()
            .skip_while(|ch| {
                if skip_width == 0 {
                    return false;
                }
                skip_width = skip_width.saturating_sub(ch.width().unwrap_or(0));
                true
            })
            .collect();

        let text_style = if input.is_selected() {
            field_style.add_modifier(Modifier::REVERSED)
        } else {
            field_style
        };
        buf.set_stringn(area.x, area.y, &visible, area.width as usize, text_style);
    }

    if is_focused && !input.is_selected() {
        let cursor_offset = (input.text_before_cursor().width() as u16).min(area.width - 1);
        buf[(area.x + cursor_offset, area.y)]
            .set_style(field_style.add_modifier(Modifier::REVERSED));
    }
}

/// Render a labeled input field.
#[allow(clippy::too_many_arguments)]
pub fn render_labeled_input(
    buf: &mut Buffer,
    area: Rect,
    label: &str,
    label_width: u16,
    input: &TextInput,
    placeholder: &str,
    is_focused: bool,
    style: &DialogStyle,
) {
    let label_style = if is_focused {
        Style::default().fg(style.accent)
    } else {
        Style::default().fg(style.fg)
    };
    buf.set_string(area.x, area.y, label, label_style);

    let field = Rect::new(
        area.x + label_width.min(area.width),
        area.y,
        area.width.saturating_sub(label_width),
        1,
    );
    render_input_field(buf, field, input, placeholder, is_focused, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{ButtonBehaviour, DialogOptions, DialogTemplate, InputBehaviour, InputTemplate};

    fn dialog(options: DialogOptions) -> AdvancedDialog {
        AdvancedDialog::open(
            DialogTemplate::new("Find")
                .input(InputTemplate::new("Search:").hint("(Use /re/ syntax for regexp search)").with_count())
                .button("Next")
                .button("Close"),
            vec![InputBehaviour::default().value("cat").focused()],
            vec![ButtonBehaviour::Callback, ButtonBehaviour::Close],
            options,
        )
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_top_center_rect_centers_horizontally() {
        let container = Rect::new(0, 0, 100, 50);
        let result = top_center_rect(40, 10, container);
        assert_eq!(result.x, 30);
        assert_eq!(result.y, 1);
        assert_eq!(result.width, 40);
    }

    #[test]
    fn test_bottom_center_rect_stays_inside() {
        let container = Rect::new(0, 0, 100, 50);
        let result = bottom_center_rect(40, 5, container);
        assert_eq!(result.y, 44);
        assert!(result.y + result.height <= 50);
    }

    #[test]
    fn test_shrink_area_top_and_bottom() {
        let editor = Rect::new(0, 0, 80, 24);
        // borders + input + hint + buttons
        assert_eq!(dialog(DialogOptions::default()).height(), 5);

        let top = dialog(DialogOptions {
            shrink_editor: true,
            bottom: false,
        });
        assert_eq!(top.shrink_area(editor), Rect::new(0, 5, 80, 19));
        assert_eq!(top.area(editor), Rect::new(0, 0, 80, 5));

        let bottom = dialog(DialogOptions {
            shrink_editor: true,
            bottom: true,
        });
        assert_eq!(bottom.shrink_area(editor), Rect::new(0, 0, 80, 19));
        assert_eq!(bottom.area(editor), Rect::new(0, 19, 80, 5));
    }

    #[test]
    fn test_shrink_is_restored_on_close() {
        let editor = Rect::new(0, 0, 80, 24);
        let floating = dialog(DialogOptions::default());
        assert_eq!(floating.shrink_area(editor), editor);

        let mut shrinking = dialog(DialogOptions {
            shrink_editor: true,
            bottom: false,
        });
        shrinking.close();
        assert_eq!(shrinking.shrink_area(editor), editor);
    }

    #[test]
    fn test_render_layout_and_mouse_targets() {
        let editor = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(editor);
        let mut dialog = dialog(DialogOptions {
            shrink_editor: true,
            bottom: false,
        });
        dialog.set_count("1 match found.");
        dialog.render(editor, &mut buf, &DialogStyle::default());

        assert!(row_text(&buf, 0).contains("Find"));
        let input_row = row_text(&buf, 1);
        assert!(input_row.contains("Search:"));
        assert!(input_row.contains("cat"));
        assert!(input_row.contains("1 match found."));
        assert!(row_text(&buf, 2).contains("regexp"));
        assert!(row_text(&buf, 3).contains("Close"));

        assert!(dialog.contains(5, 2));
        assert!(!dialog.contains(5, 10));

        let (close_area, index) = dialog.last_button_areas[1];
        assert_eq!(index, 1);
        let click = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: close_area.x,
            row: close_area.y,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(dialog.handle_mouse(click), Some(crate::DialogEvent::Closed));
    }

    #[test]
    fn test_mouse_targets_exclude_far_edges() {
        let editor = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(editor);
        let mut dialog = dialog(DialogOptions::default());
        dialog.render(editor, &mut buf, &DialogStyle::default());

        let area = dialog.last_area.unwrap();
        assert!(dialog.contains(area.right() - 1, area.bottom() - 1));
        assert!(!dialog.contains(area.right(), area.y));
        assert!(!dialog.contains(area.x, area.bottom()));

        let (close_area, _) = dialog.last_button_areas[1];
        let click = |column, row| crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(dialog.handle_mouse(click(close_area.right(), close_area.y)), None);
        assert_eq!(
            dialog.handle_mouse(click(close_area.right() - 1, close_area.y)),
            Some(crate::DialogEvent::Closed)
        );
    }
}
