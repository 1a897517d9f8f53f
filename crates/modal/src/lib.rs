//! Modal dialog system for sift.
//!
//! A generic dialog built from a [`DialogTemplate`] and per-input /
//! per-button behaviours. Key and mouse events become [`DialogEvent`]s that
//! the owner dispatches; closing is idempotent.

pub mod base;
pub mod dialog;
pub mod text_input;

pub use base::DialogStyle;
pub use dialog::{
    AdvancedDialog, ButtonBehaviour, DialogEvent, DialogOptions, DialogTemplate, Focus,
    InputBehaviour, InputTemplate,
};
pub use text_input::TextInput;
