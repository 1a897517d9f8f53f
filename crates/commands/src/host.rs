use sift_modal::DialogOptions;
use sift_text_search::SearchHost;

/// Editor option whose change the commands react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOption {
    ReadOnly,
}

/// Where and how the host shows a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogPlacement {
    pub options: DialogOptions,
    /// Rows the dialog occupies
    pub height: u16,
}

/// Optional host capability: presenting a dialog over the editor.
pub trait DialogPresenter {
    /// Show the dialog, shrinking the editor if the placement asks for it.
    fn show(&mut self, placement: DialogPlacement);

    /// Remove the dialog and restore the editor size.
    fn hide(&mut self);

    /// Give keyboard focus back to the text.
    fn focus_editor(&mut self);
}

/// Editor hosting the find/replace commands.
pub trait EditorHost: SearchHost {
    fn is_read_only(&self) -> bool;

    /// Dialog capability, if the host has one
    fn dialogs(&mut self) -> Option<&mut dyn DialogPresenter> {
        None
    }
}
