use sift_modal::AdvancedDialog;
use sift_text_search::DocumentId;

use crate::dialogs::SessionKind;

/// One open find/replace dialog interaction.
#[derive(Debug)]
pub struct Session {
    document: DocumentId,
    kind: SessionKind,
    pub(crate) dialog: AdvancedDialog,
    watches_read_only: bool,
    closed: bool,
}

impl Session {
    pub fn new(document: DocumentId, kind: SessionKind, dialog: AdvancedDialog) -> Self {
        Self {
            document,
            kind,
            dialog,
            watches_read_only: true,
            closed: false,
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn dialog(&self) -> &AdvancedDialog {
        &self.dialog
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn watches_read_only(&self) -> bool {
        self.watches_read_only
    }

    pub(crate) fn stop_watching_read_only(&mut self) {
        self.watches_read_only = false;
    }

    /// Mark the session closed. Returns true on the first call only.
    pub(crate) fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        self.dialog.close();
        true
    }

    /// Current text of dialog input `index`
    pub(crate) fn input(&self, index: usize) -> String {
        self.dialog
            .input_value(index)
            .unwrap_or_default()
            .to_string()
    }
}
