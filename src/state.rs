//! Shared application state for request handlers.

use std::sync::Arc;

use crate::editor::TextEditor;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// `editor` is `None` when no API key was available at startup; the
/// processing endpoint then answers 503 while the rest of the service runs.
#[derive(Clone)]
pub struct AppState {
    pub editor: Option<Arc<dyn TextEditor>>,
}

impl AppState {
    /// Creates a new application state around the given editor.
    pub fn new(editor: Option<Arc<dyn TextEditor>>) -> Self {
        Self { editor }
    }
}
