//! Layouts of the find and replace dialogs.

use sift_modal::{
    AdvancedDialog, ButtonBehaviour, DialogOptions, DialogTemplate, InputBehaviour, InputTemplate,
};

/// Query input, in both dialogs
pub const FIND_INPUT: usize = 0;
/// Replacement input of the replace dialog
pub const REPLACE_WITH_INPUT: usize = 1;

pub const FIND_PREVIOUS_BUTTON: usize = 0;
pub const FIND_NEXT_BUTTON: usize = 1;
pub const REPLACE_BUTTON: usize = 2;
pub const REPLACE_ALL_BUTTON: usize = 3;

const QUERY_HINT: &str = "(Use /re/ syntax for regexp search)";

/// Which dialog a session shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Find,
    Replace,
}

impl SessionKind {
    pub fn title(self) -> &'static str {
        match self {
            SessionKind::Find => "Find",
            SessionKind::Replace => "Replace",
        }
    }
}

fn query_input(seed: &str, close_on_blur: bool) -> InputBehaviour {
    InputBehaviour::default()
        .value(seed)
        .focused()
        .select_value_on_open()
        .close_on_enter(false)
        .close_on_blur(close_on_blur)
        .submits()
        .reports_input()
}

/// Build the dialog for `kind`, seeding the query input.
pub fn open_dialog(
    kind: SessionKind,
    seed: &str,
    close_on_blur: bool,
    options: DialogOptions,
) -> AdvancedDialog {
    let query_row = InputTemplate::new(match kind {
        SessionKind::Find => "Search:",
        SessionKind::Replace => "Replace:",
    })
    .placeholder("text or /regexp/")
    .hint(QUERY_HINT)
    .with_count();

    match kind {
        SessionKind::Find => AdvancedDialog::open(
            DialogTemplate::new(kind.title())
                .input(query_row)
                .button("Find Previous")
                .button("Find Next")
                .button("Close"),
            vec![query_input(seed, close_on_blur)],
            vec![
                ButtonBehaviour::Callback,
                ButtonBehaviour::Callback,
                ButtonBehaviour::Close,
            ],
            options,
        ),
        SessionKind::Replace => AdvancedDialog::open(
            DialogTemplate::new(kind.title())
                .input(query_row)
                .input(InputTemplate::new("With:").placeholder("replacement, $1 for groups"))
                .button("Find Previous")
                .button("Find Next")
                .button("Replace")
                .button("Replace All")
                .button("Close"),
            vec![
                query_input(seed, close_on_blur),
                InputBehaviour::default()
                    .close_on_enter(false)
                    .close_on_blur(close_on_blur)
                    .submits(),
            ],
            vec![
                ButtonBehaviour::Callback,
                ButtonBehaviour::Callback,
                ButtonBehaviour::Callback,
                ButtonBehaviour::Callback,
                ButtonBehaviour::Close,
            ],
            options,
        ),
    }
}
