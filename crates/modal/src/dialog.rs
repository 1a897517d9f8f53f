//! Advanced dialog: a template plus per-input and per-button behaviours,
//! driven by key events that are turned into [`DialogEvent`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::text_input::TextInput;

/// One input row of a dialog.
#[derive(Debug, Clone, Default)]
pub struct InputTemplate {
    pub label: String,
    pub placeholder: String,
    pub hint: Option<String>,
    /// Row shows the dialog's count text on the right
    pub count_slot: bool,
}

impl InputTemplate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_count(mut self) -> Self {
        self.count_slot = true;
        self
    }
}

/// Layout of a dialog: title, input rows and button labels.
#[derive(Debug, Clone, Default)]
pub struct DialogTemplate {
    pub title: String,
    pub inputs: Vec<InputTemplate>,
    pub buttons: Vec<String>,
}

impl DialogTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn input(mut self, input: InputTemplate) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn button(mut self, label: impl Into<String>) -> Self {
        self.buttons.push(label.into());
        self
    }
}

/// How an input reacts to the user.
#[derive(Debug, Clone)]
pub struct InputBehaviour {
    /// Initial value
    pub value: String,
    /// Take focus on open
    pub focus: bool,
    /// Open with the value selected, so typing replaces it
    pub select_value_on_open: bool,
    /// Enter closes the dialog
    pub close_on_enter: bool,
    /// Losing focus closes the dialog
    pub close_on_blur: bool,
    /// Enter emits [`DialogEvent::Submit`]
    pub submits: bool,
    /// Edits emit [`DialogEvent::Input`]
    pub reports_input: bool,
}

impl Default for InputBehaviour {
    fn default() -> Self {
        Self {
            value: String::new(),
            focus: false,
            select_value_on_open: false,
            close_on_enter: false,
            close_on_blur: true,
            submits: false,
            reports_input: false,
        }
    }
}

impl InputBehaviour {
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn focused(mut self) -> Self {
        self.focus = true;
        self
    }

    pub fn select_value_on_open(mut self) -> Self {
        self.select_value_on_open = true;
        self
    }

    pub fn close_on_enter(mut self, close: bool) -> Self {
        self.close_on_enter = close;
        self
    }

    pub fn close_on_blur(mut self, close: bool) -> Self {
        self.close_on_blur = close;
        self
    }

    pub fn submits(mut self) -> Self {
        self.submits = true;
        self
    }

    pub fn reports_input(mut self) -> Self {
        self.reports_input = true;
        self
    }
}

/// What a button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonBehaviour {
    /// Emit [`DialogEvent::Button`]
    Callback,
    /// Close the dialog
    Close,
}

/// Placement options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogOptions {
    /// Shrink the editor to make room instead of covering it
    pub shrink_editor: bool,
    /// Place at the bottom of the editor
    pub bottom: bool,
}

/// Event produced by a dialog interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// Input value changed
    Input { input: usize, value: String },
    /// Enter in an input
    Submit {
        input: usize,
        value: String,
        shift: bool,
    },
    /// Button clicked
    Button { button: usize },
    /// Dialog closed (emitted once)
    Closed,
}

/// Focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(usize),
    Button(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct DialogInput {
    pub(crate) template: InputTemplate,
    pub(crate) behaviour: InputBehaviour,
    pub(crate) text: TextInput,
}

/// A modal dialog hosted on top of an editor.
#[derive(Debug)]
pub struct AdvancedDialog {
    pub(crate) title: String,
    pub(crate) inputs: Vec<DialogInput>,
    pub(crate) buttons: Vec<(String, ButtonBehaviour)>,
    pub(crate) options: DialogOptions,
    pub(crate) focus: Focus,
    pub(crate) count: String,
    closed: bool,
    /// Last rendered areas for mouse handling
    pub(crate) last_area: Option<Rect>,
    pub(crate) last_input_areas: Vec<(Rect, usize)>,
    pub(crate) last_button_areas: Vec<(Rect, usize)>,
}

impl AdvancedDialog {
    /// Open a dialog.
    ///
    /// Behaviours pair with template rows by index; missing input
    /// behaviours default, missing button behaviours close.
    pub fn open(
        template: DialogTemplate,
        input_behaviours: Vec<InputBehaviour>,
        button_behaviours: Vec<ButtonBehaviour>,
        options: DialogOptions,
    ) -> Self {
        let mut behaviours = input_behaviours.into_iter();
        let inputs: Vec<DialogInput> = template
            .inputs
            .into_iter()
            .map(|input_template| {
                let behaviour = behaviours.next().unwrap_or_default();
                let mut text = TextInput::with_text(behaviour.value.clone());
                if behaviour.select_value_on_open {
                    text.select_all();
                }
                DialogInput {
                    template: input_template,
                    behaviour,
                    text,
                }
            })
            .collect();

        let mut button_behaviours = button_behaviours.into_iter();
        let buttons = template
            .buttons
            .into_iter()
            .map(|label| {
                let behaviour = button_behaviours.next().unwrap_or(ButtonBehaviour::Close);
                (label, behaviour)
            })
            .collect();

        let focus = inputs
            .iter()
            .position(|input| input.behaviour.focus)
            .or(if inputs.is_empty() { None } else { Some(0) })
            .map(Focus::Input)
            .unwrap_or(Focus::Button(0));

        Self {
            title: template.title,
            inputs,
            buttons,
            options,
            focus,
            count: String::new(),
            closed: false,
            last_area: None,
            last_input_areas: Vec::new(),
            last_button_areas: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> DialogOptions {
        self.options
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current value of input `index`
    pub fn input_value(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(|input| input.text.text())
    }

    pub fn set_input_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(input) = self.inputs.get_mut(index) {
            input.text.set_text(value);
        }
    }

    /// Move focus to input `index`, selecting its value.
    pub fn focus_input(&mut self, index: usize) {
        if let Some(input) = self.inputs.get_mut(index) {
            input.text.select_all();
            self.focus = Focus::Input(index);
        }
    }

    pub fn count(&self) -> &str {
        &self.count
    }

    /// Set the text shown in the count slot
    pub fn set_count(&mut self, count: impl Into<String>) {
        self.count = count.into();
    }

    /// Close the dialog. Only the first call yields [`DialogEvent::Closed`].
    pub fn close(&mut self) -> Option<DialogEvent> {
        if self.closed {
            return None;
        }
        self.closed = true;
        Some(DialogEvent::Closed)
    }

    /// Focus left the dialog.
    pub fn blur(&mut self) -> Option<DialogEvent> {
        match self.focus {
            Focus::Input(index) if self.inputs[index].behaviour.close_on_blur => self.close(),
            _ => None,
        }
    }

    /// Click button `index`.
    pub fn click_button(&mut self, index: usize) -> Option<DialogEvent> {
        if self.closed {
            return None;
        }
        match self.buttons.get(index)?.1 {
            ButtonBehaviour::Callback => Some(DialogEvent::Button { button: index }),
            ButtonBehaviour::Close => self.close(),
        }
    }

    /// Handle keyboard event.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogEvent> {
        if self.closed {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.close(),
            (KeyCode::Tab, _) => {
                self.focus = self.focus_step(true);
                None
            }
            (KeyCode::BackTab, _) => {
                self.focus = self.focus_step(false);
                None
            }
            _ => match self.focus {
                Focus::Input(index) => self.handle_input_key(index, key),
                Focus::Button(index) => self.handle_button_key(index, key),
            },
        }
    }

    /// Handle mouse event against the last rendered layout.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<DialogEvent> {
        if self.closed || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }
        let cell = Position::new(mouse.column, mouse.row);
        let hit = |area: &Rect| area.contains(cell);

        if let Some(&(_, index)) = self.last_button_areas.iter().find(|(area, _)| hit(area)) {
            return self.click_button(index);
        }
        if let Some(&(_, index)) = self.last_input_areas.iter().find(|(area, _)| hit(area)) {
            self.focus = Focus::Input(index);
        }
        None
    }

    /// Whether a screen cell lies inside the last rendered dialog
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.last_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    fn handle_input_key(&mut self, index: usize, key: KeyEvent) -> Option<DialogEvent> {
        let input = &mut self.inputs[index];
        let edited = match (key.code, key.modifiers) {
            (KeyCode::Enter, modifiers) => {
                if input.behaviour.close_on_enter {
                    return self.close();
                }
                if !input.behaviour.submits {
                    return None;
                }
                return Some(DialogEvent::Submit {
                    input: index,
                    value: input.text.text().to_string(),
                    shift: modifiers.contains(KeyModifiers::SHIFT),
                });
            }
            (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                input.text.insert(ch);
                true
            }
            (KeyCode::Backspace, _) => input.text.backspace(),
            (KeyCode::Delete, _) => input.text.delete(),
            (KeyCode::Left, _) => {
                input.text.move_left();
                false
            }
            (KeyCode::Right, _) => {
                input.text.move_right();
                false
            }
            (KeyCode::Home, _) => {
                input.text.move_home();
                false
            }
            (KeyCode::End, _) => {
                input.text.move_end();
                false
            }
            (KeyCode::Up, _) => {
                if index > 0 {
                    self.focus = Focus::Input(index - 1);
                }
                false
            }
            (KeyCode::Down, _) => {
                if index + 1 < self.inputs.len() {
                    self.focus = Focus::Input(index + 1);
                } else if !self.buttons.is_empty() {
                    self.focus = Focus::Button(0);
                }
                false
            }
            _ => false,
        };

        let input = &self.inputs[index];
        if edited && input.behaviour.reports_input {
            Some(DialogEvent::Input {
                input: index,
                value: input.text.text().to_string(),
            })
        } else {
            None
        }
    }

    fn handle_button_key(&mut self, index: usize, key: KeyEvent) -> Option<DialogEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.click_button(index),
            KeyCode::Left => {
                self.focus = Focus::Button(index.saturating_sub(1));
                None
            }
            KeyCode::Right => {
                self.focus = Focus::Button((index + 1).min(self.buttons.len().saturating_sub(1)));
                None
            }
            KeyCode::Up => {
                if let Some(last) = self.inputs.len().checked_sub(1) {
                    self.focus = Focus::Input(last);
                }
                None
            }
            _ => None,
        }
    }

    /// Next focus stop: inputs first, then buttons, cycling.
    fn focus_step(&self, forward: bool) -> Focus {
        let stops = self.inputs.len() + self.buttons.len();
        if stops == 0 {
            return self.focus;
        }
        let current = match self.focus {
            Focus::Input(index) => index,
            Focus::Button(index) => self.inputs.len() + index,
        };
        let next = if forward {
            (current + 1) % stops
        } else {
            (current + stops - 1) % stops
        };

        if next < self.inputs.len() {
            Focus::Input(next)
        } else {
            Focus::Button(next - self.inputs.len())
        }
    }
}
