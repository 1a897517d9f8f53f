//! The `find` and `replace` commands and dispatch of their dialog events.

use crossterm::event::{KeyEvent, MouseEvent};
use sift_config::{DialogSettings, SearchSettings};
use sift_modal::{AdvancedDialog, DialogEvent, DialogOptions};
use sift_text_search::{
    clear_search, do_search, find_next, parse_escapes, parse_query, replace_all, replace_one,
    restart_search, start_search, update_count, DocumentId, MatchCount, SearchState, SearchStates,
};

use crate::dialogs::{
    open_dialog, SessionKind, FIND_INPUT, FIND_NEXT_BUTTON, FIND_PREVIOUS_BUTTON,
    REPLACE_ALL_BUTTON, REPLACE_BUTTON, REPLACE_WITH_INPUT,
};
use crate::host::{DialogPlacement, EditorHost, EditorOption};
use crate::session::Session;

/// Find/replace controller: per-document search states plus the open
/// dialog session, if any.
#[derive(Debug)]
pub struct FindReplace {
    states: SearchStates,
    session: Option<Session>,
    search: SearchSettings,
    dialog: DialogSettings,
}

impl Default for FindReplace {
    fn default() -> Self {
        Self::new(SearchSettings::default(), DialogSettings::default())
    }
}

impl FindReplace {
    pub fn new(search: SearchSettings, dialog: DialogSettings) -> Self {
        Self {
            states: SearchStates::new(),
            session: None,
            search,
            dialog,
        }
    }

    pub fn states(&self) -> &SearchStates {
        &self.states
    }

    pub fn state(&self, id: DocumentId) -> Option<&SearchState> {
        self.states.get(id)
    }

    /// Open session, if its dialog has not been closed
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref().filter(|session| !session.is_closed())
    }

    pub fn is_open(&self) -> bool {
        self.session().is_some()
    }

    /// Dialog of the open session, for rendering
    pub fn dialog_mut(&mut self) -> Option<&mut AdvancedDialog> {
        self.session
            .as_mut()
            .filter(|session| !session.is_closed())
            .map(|session| &mut session.dialog)
    }

    /// Open the find dialog. Returns false if the host cannot take it.
    pub fn find<H: EditorHost>(&mut self, host: &mut H) -> bool {
        self.open(host, SessionKind::Find)
    }

    /// Open the replace dialog. Returns false if the host cannot take it.
    pub fn replace<H: EditorHost>(&mut self, host: &mut H) -> bool {
        self.open(host, SessionKind::Replace)
    }

    fn open<H: EditorHost>(&mut self, host: &mut H, kind: SessionKind) -> bool {
        if host.is_read_only() {
            sift_logger::debug(format!("{} ignored: document is read-only", kind.title()));
            return false;
        }
        if host.dialogs().is_none() {
            sift_logger::warn(format!("{} unavailable: host cannot show dialogs", kind.title()));
            return false;
        }

        // A new dialog replaces the one already open
        self.close(host);

        let document = host.document_id();
        let state = self.states.get_or_create(document);
        clear_search(host, state);

        let seed = state.seed(&host.selection_text());
        let options = DialogOptions {
            shrink_editor: self.dialog.shrink_editor,
            bottom: self.dialog.at_bottom,
        };
        let mut dialog = open_dialog(kind, &seed, self.search.close_on_blur, options);

        if let Some(presenter) = host.dialogs() {
            presenter.show(DialogPlacement {
                options,
                height: dialog.height(),
            });
        }

        start_search(host, state, &seed);
        dialog.set_count(update_count(host, state).to_string());

        sift_logger::info(format!("{} dialog opened", kind.title()));
        self.session = Some(Session::new(document, kind, dialog));
        true
    }

    /// Close the open dialog, cleaning up its search.
    ///
    /// Cleanup runs once per session no matter how many close paths fire.
    pub fn close<H: EditorHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.close() {
            return;
        }

        // Drops the overlay and the match annotation
        let state = self.states.get_or_create(session.document());
        clear_search(host, state);
        session.dialog.set_count(MatchCount::cleared().to_string());

        if let Some(presenter) = host.dialogs() {
            presenter.hide();
            presenter.focus_editor();
        }
        sift_logger::debug(format!("{} dialog closed", session.kind().title()));
    }

    /// Route a key to the open dialog. Returns false when no dialog is open.
    pub fn handle_key<H: EditorHost>(&mut self, host: &mut H, key: KeyEvent) -> bool {
        let Some(dialog) = self.dialog_mut() else {
            return false;
        };
        if let Some(event) = dialog.handle_key(key) {
            self.dispatch(host, event);
        }
        true
    }

    /// Route a mouse click to the open dialog.
    ///
    /// A click outside the dialog blurs it. Returns true if the click hit
    /// the dialog.
    pub fn handle_mouse<H: EditorHost>(&mut self, host: &mut H, mouse: MouseEvent) -> bool {
        let Some(dialog) = self.dialog_mut() else {
            return false;
        };
        if !dialog.contains(mouse.column, mouse.row) {
            self.blur(host);
            return false;
        }
        if let Some(event) = dialog.handle_mouse(mouse) {
            self.dispatch(host, event);
        }
        true
    }

    pub fn click_button<H: EditorHost>(&mut self, host: &mut H, button: usize) {
        if let Some(event) = self.dialog_mut().and_then(|dialog| dialog.click_button(button)) {
            self.dispatch(host, event);
        }
    }

    /// Focus moved from the dialog to the editor.
    pub fn blur<H: EditorHost>(&mut self, host: &mut H) {
        if let Some(event) = self.dialog_mut().and_then(|dialog| dialog.blur()) {
            self.dispatch(host, event);
        }
    }

    /// React to an editor option change.
    pub fn option_changed<H: EditorHost>(&mut self, host: &mut H, option: EditorOption) {
        match option {
            EditorOption::ReadOnly => {
                if !host.is_read_only() {
                    return;
                }
                let document = host.document_id();
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                if session.is_closed() || !session.watches_read_only() || session.document() != document {
                    return;
                }
                session.stop_watching_read_only();
                sift_logger::info("Document became read-only, closing search dialog");
                self.close(host);
            }
        }
    }

    /// Forget the search state of a closed document.
    pub fn document_closed(&mut self, document: DocumentId) {
        self.states.discard(document);
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.document() == document)
        {
            self.session = None;
        }
    }

    fn dispatch<H: EditorHost>(&mut self, host: &mut H, event: DialogEvent) {
        let Some(kind) = self.session().map(Session::kind) else {
            return;
        };

        match event {
            DialogEvent::Closed => self.close(host),
            DialogEvent::Input {
                input: FIND_INPUT,
                value,
            } => self.live_search(host, &value),
            DialogEvent::Submit {
                input: FIND_INPUT,
                shift,
                ..
            } => match kind {
                SessionKind::Find => self.search(host, shift),
                SessionKind::Replace => {
                    if let Some(dialog) = self.dialog_mut() {
                        dialog.focus_input(REPLACE_WITH_INPUT);
                    }
                }
            },
            DialogEvent::Submit {
                input: REPLACE_WITH_INPUT,
                ..
            } => self.replace_next(host),
            DialogEvent::Button { button } => match (kind, button) {
                (_, FIND_PREVIOUS_BUTTON) => self.search(host, true),
                (_, FIND_NEXT_BUTTON) => self.search(host, false),
                (SessionKind::Replace, REPLACE_BUTTON) => self.replace_next(host),
                (SessionKind::Replace, REPLACE_ALL_BUTTON) => self.replace_everything(host),
                _ => {}
            },
            _ => {}
        }
    }

    /// Query input changed: follow it with highlights and the count only.
    fn live_search<H: EditorHost>(&mut self, host: &mut H, raw: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let state = self.states.get_or_create(session.document());

        let count = if raw.is_empty() {
            clear_search(host, state);
            MatchCount::cleared()
        } else {
            do_search(host, state, raw, false, false, self.search.scroll_margin).count
        };
        session.dialog.set_count(count.to_string());
    }

    /// Select the next (or previous) match of the query input.
    fn search<H: EditorHost>(&mut self, host: &mut H, reverse: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let raw = session.input(FIND_INPUT);
        if raw.is_empty() {
            return;
        }
        let state = self.states.get_or_create(session.document());

        let report = do_search(host, state, &raw, reverse, true, self.search.scroll_margin);
        session.dialog.set_count(report.count.to_string());
    }

    /// Replace the match at the selection, then move on to the next one.
    fn replace_next<H: EditorHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let raw = session.input(FIND_INPUT);
        if raw.is_empty() {
            return;
        }
        let query = parse_query(&raw);
        let template = parse_escapes(&session.input(REPLACE_WITH_INPUT));
        let margin = self.search.scroll_margin;

        if let Err(e) = replace_one(host, &query, &template, margin) {
            sift_logger::error(format!("Replace failed: {}", e));
        }

        let state = self.states.get_or_create(session.document());
        restart_search(host, state, &raw);
        find_next(host, state, false, margin);
        session.dialog.set_count(update_count(host, state).to_string());
    }

    fn replace_everything<H: EditorHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let raw = session.input(FIND_INPUT);
        if raw.is_empty() {
            return;
        }
        let query = parse_query(&raw);
        let template = parse_escapes(&session.input(REPLACE_WITH_INPUT));

        if let Err(e) = replace_all(host, &query, &template) {
            sift_logger::error(format!("Replace all failed: {}", e));
        }

        let state = self.states.get_or_create(session.document());
        if state.query_text.as_deref() != Some(raw.as_str()) {
            restart_search(host, state, &raw);
        }
        session.dialog.set_count(update_count(host, state).to_string());
    }
}
