//! Find and replace commands.
//!
//! [`FindReplace`] opens the find or replace dialog for an [`EditorHost`],
//! routes the dialog's events to the search engine and tears the search
//! down again when the dialog closes.

pub mod dialogs;
pub mod find_replace;
pub mod host;
pub mod session;

#[cfg(test)]
mod test_host;

pub use dialogs::{
    open_dialog, SessionKind, FIND_INPUT, FIND_NEXT_BUTTON, FIND_PREVIOUS_BUTTON,
    REPLACE_ALL_BUTTON, REPLACE_BUTTON, REPLACE_WITH_INPUT,
};
pub use find_replace::FindReplace;
pub use host::{DialogPlacement, DialogPresenter, EditorHost, EditorOption};
pub use session::Session;
