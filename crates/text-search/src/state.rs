//! Per-document search state and its lifecycle.

use sift_buffer::Position;
use std::collections::HashMap;

use crate::host::{AnnotationId, DocumentId, OverlayId, SearchHost};
use crate::overlay::SearchOverlay;
use crate::query::{parse_query, Query};

/// Search state of one document.
///
/// A search is active while `query` is set; it then has an overlay
/// installed and, if the host annotates, one annotation.
#[derive(Debug, Default)]
pub struct SearchState {
    /// Raw dialog input of the active search
    pub query_text: Option<String>,
    /// Parsed active query
    pub query: Option<Query>,
    /// Query of the most recently cleared search
    pub last_query: Option<Query>,
    /// Start of the last selected match, or the search origin
    pub pos_from: Option<Position>,
    /// End of the last selected match, or the search origin
    pub pos_to: Option<Position>,
    overlay: Option<OverlayId>,
    annotation: Option<AnnotationId>,
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        self.query.is_some()
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    pub fn annotation(&self) -> Option<AnnotationId> {
        self.annotation
    }

    /// Text to seed a new dialog with: the current selection, otherwise
    /// the last cleared query.
    ///
    /// A selection spanning lines is escaped into a literal query.
    pub fn seed(&self, selection: &str) -> String {
        if selection.contains(['\n', '\r']) {
            return Query::literal(selection).to_input();
        }
        if !selection.is_empty() {
            return selection.to_string();
        }
        self.last_query
            .as_ref()
            .map(Query::to_input)
            .unwrap_or_default()
    }
}

/// Search states of all open documents.
#[derive(Debug, Default)]
pub struct SearchStates {
    states: HashMap<DocumentId, SearchState>,
}

impl SearchStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `id`, created empty on first use.
    pub fn get_or_create(&mut self, id: DocumentId) -> &mut SearchState {
        self.states.entry(id).or_default()
    }

    pub fn get(&self, id: DocumentId) -> Option<&SearchState> {
        self.states.get(&id)
    }

    /// Drop the state of a closed document.
    pub fn discard(&mut self, id: DocumentId) -> Option<SearchState> {
        self.states.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Activate a search for `raw`, replacing any previous overlay and
/// annotation.
pub fn start_search<H: SearchHost>(host: &mut H, state: &mut SearchState, raw: &str) {
    host.operation(|host| {
        let query = parse_query(raw);

        host.remove_overlay(state.overlay.take());
        state.overlay = Some(host.add_overlay(SearchOverlay::new(&query)));

        if let Some(annotations) = host.annotations() {
            if let Some(id) = state.annotation.take() {
                annotations.clear(id);
            }
            state.annotation = Some(annotations.show_matches(&query));
        }

        sift_logger::debug(format!("Search started: {:?}", raw));
        state.query_text = Some(raw.to_string());
        state.query = Some(query);
    });
}

/// Deactivate the search, keeping its query as `last_query`.
///
/// Does nothing when no search is active.
pub fn clear_search<H: SearchHost>(host: &mut H, state: &mut SearchState) {
    let Some(query) = state.query.take() else {
        return;
    };

    host.operation(|host| {
        state.last_query = Some(query);
        state.query_text = None;
        host.remove_overlay(state.overlay.take());
        if let Some(id) = state.annotation.take() {
            if let Some(annotations) = host.annotations() {
                annotations.clear(id);
            }
        }
    });
}
