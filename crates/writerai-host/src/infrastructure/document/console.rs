//! Console-backed text document.
//!
//! Stands in for the host document when the binary runs outside the host:
//! inserted text is written to the underlying writer, one insertion per line,
//! and the view cursor is the number of characters written so far.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::application::collaborators::{CursorPosition, DocumentError, TextDocument};

struct Inner {
    writer: Box<dyn Write + Send>,
    written_chars: usize,
}

/// Text document that appends to a writer.
pub struct ConsoleDocument {
    inner: Mutex<Inner>,
}

impl ConsoleDocument {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(Inner {
                writer: Box::new(writer),
                written_chars: 0,
            }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl TextDocument for ConsoleDocument {
    fn supports_text(&self) -> bool {
        true
    }

    fn view_cursor(&self) -> Result<CursorPosition, DocumentError> {
        let inner = self.inner.lock().map_err(|_| DocumentError::NoViewCursor)?;
        Ok(CursorPosition(inner.written_chars))
    }

    fn insert_text(&self, at: CursorPosition, text: &str) -> Result<(), DocumentError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| DocumentError::Insert("document lock poisoned".to_string()))?;
        if at.0 != inner.written_chars {
            return Err(DocumentError::Insert(format!(
                "console document only appends; cursor {} is not at end {}",
                at.0, inner.written_chars
            )));
        }
        writeln!(inner.writer, "{text}")
            .and_then(|()| inner.writer.flush())
            .map_err(|e| DocumentError::Insert(e.to_string()))?;
        inner.written_chars += text.chars().count() + 1;
        Ok(())
    }
}
