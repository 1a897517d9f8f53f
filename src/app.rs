//! Main application: event loop and key routing.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use sift_commands::{DialogPresenter, EditorHost, EditorOption, FindReplace};
use sift_config::Config;

use crate::editor::{Editor, FocusTarget};
use crate::event::{Event, EventHandler};
use crate::ui;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Main application
pub struct App {
    editor: Editor,
    find_replace: FindReplace,
    event_handler: EventHandler,
    status: String,
    text_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(editor: Editor, config: &Config) -> Self {
        Self {
            editor,
            find_replace: FindReplace::new(config.search.clone(), config.dialog.clone()),
            event_handler: EventHandler::new(TICK_RATE),
            status: "Ctrl+F find  Ctrl+H replace  Ctrl+T read-only  Ctrl+S save  Ctrl+Q quit"
                .to_string(),
            text_area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut needs_redraw = true;

        while !self.should_quit {
            if needs_redraw {
                terminal.draw(|frame| {
                    self.text_area =
                        ui::render(frame, &mut self.editor, &mut self.find_replace, &self.status);
                })?;
                needs_redraw = false;
            }

            match self.event_handler.next()? {
                Event::Key(key) => {
                    self.handle_key(key);
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse(mouse);
                    needs_redraw = true;
                }
                Event::Resize(..) => needs_redraw = true,
                Event::Tick => {}
            }
        }

        self.find_replace.close(&mut self.editor);
        sift_logger::info("Application shutdown");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(ch) = key.code {
                if self.handle_hotkey(ch.to_ascii_lowercase()) {
                    return;
                }
            }
        }

        if self.find_replace.is_open() {
            if self.editor.dialog_slot().focus() == FocusTarget::Dialog {
                self.find_replace.handle_key(&mut self.editor, key);
                return;
            }
            if key.code == KeyCode::Esc {
                self.find_replace.close(&mut self.editor);
                return;
            }
        }

        if let Err(e) = self.edit(key) {
            sift_logger::error(format!("Edit failed: {}", e));
            self.status = format!("Error: {}", e);
        }
    }

    /// Global Ctrl shortcuts. Returns true if `ch` is one.
    fn handle_hotkey(&mut self, ch: char) -> bool {
        match ch {
            'q' => self.should_quit = true,
            's' => self.save(),
            'f' => {
                if !self.find_replace.find(&mut self.editor) {
                    self.status = "Search is unavailable in a read-only document".to_string();
                }
            }
            'h' | 'r' => {
                if !self.find_replace.replace(&mut self.editor) {
                    self.status = "Replace is unavailable in a read-only document".to_string();
                }
            }
            't' => {
                let read_only = !self.editor.is_read_only();
                self.editor.set_read_only(read_only);
                self.find_replace
                    .option_changed(&mut self.editor, EditorOption::ReadOnly);
                self.status = if read_only {
                    "Document is read-only".to_string()
                } else {
                    "Document is writable".to_string()
                };
            }
            _ => return false,
        }
        true
    }

    fn edit(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.insert_char(ch)?
            }
            KeyCode::Enter => self.editor.insert_text("\n")?,
            KeyCode::Tab => self.editor.insert_text("    ")?,
            KeyCode::Backspace => self.editor.backspace()?,
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }

        if self.find_replace.is_open() {
            if self.find_replace.handle_mouse(&mut self.editor, mouse) {
                self.editor.dialog_slot_mut().focus_dialog();
                return;
            }
            // Dialog stays open if it does not close on blur
            self.editor.dialog_slot_mut().focus_editor();
        }

        let area = self.text_area;
        if area.contains((mouse.column, mouse.row).into()) {
            self.editor.click(mouse.column - area.x, mouse.row - area.y);
        }
    }

    fn save(&mut self) {
        match self.editor.save() {
            Ok(()) => {
                sift_logger::info("File saved");
                self.status = "Saved".to_string();
            }
            Err(e) => {
                sift_logger::error(format!("Save failed: {:#}", e));
                self.status = format!("Save failed: {:#}", e);
            }
        }
    }
}
