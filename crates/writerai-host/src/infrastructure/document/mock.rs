//! Recording text document for unit and integration testing.
//!
//! Every `insert_text` call is pushed into a `Mutex<Vec<...>>` so test
//! assertions can inspect exactly what was inserted, where, and how often.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every insertion return
//! [`DocumentError::Insert`], for exercising the dispatcher's error path.

use std::sync::Mutex;

use crate::application::collaborators::{CursorPosition, DocumentError, TextDocument};

/// A document that records insertions instead of editing anything.
#[derive(Debug)]
pub struct RecordingDocument {
    /// Whether the document exposes a text body.
    pub has_text: bool,
    /// Position reported by `view_cursor`.
    pub cursor: CursorPosition,
    /// Every `(position, text)` pair passed to `insert_text`.
    pub inserts: Mutex<Vec<(CursorPosition, String)>>,
    /// When `true`, `insert_text` fails.
    pub should_fail: bool,
}

impl RecordingDocument {
    /// A text document with the cursor at the start.
    pub fn new() -> Self {
        Self {
            has_text: true,
            cursor: CursorPosition::default(),
            inserts: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// A component without a text body, such as a drawing or a slide.
    pub fn without_text() -> Self {
        Self {
            has_text: false,
            ..Self::new()
        }
    }

    /// Snapshot of the inserted texts, in call order.
    pub fn inserted_texts(&self) -> Vec<String> {
        self.inserts
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl Default for RecordingDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDocument for RecordingDocument {
    fn supports_text(&self) -> bool {
        self.has_text
    }

    fn view_cursor(&self) -> Result<CursorPosition, DocumentError> {
        if !self.has_text {
            return Err(DocumentError::NoViewCursor);
        }
        Ok(self.cursor)
    }

    fn insert_text(&self, at: CursorPosition, text: &str) -> Result<(), DocumentError> {
        if self.should_fail {
            return Err(DocumentError::Insert("injected failure".to_string()));
        }
        self.inserts
            .lock()
            .expect("lock poisoned")
            .push((at, text.to_string()));
        Ok(())
    }
}
