//! Host-facing seams used by the application workflows.
//!
//! Each trait stands for something the host provides: the settings file, the
//! toolkit that shows dialogs, the text document, and the diagnostics log.
//! Implementations live in the infrastructure layer; tests substitute
//! recording doubles or `mockall` mocks.

use serde_json::Value;
use thiserror::Error;
use writerai_core::domain::settings::is_truthy_flag;
use writerai_core::{DialogSession, SessionError};

// ── Settings store ────────────────────────────────────────────────────────────

/// Error raised when the settings file cannot be written.
#[derive(Debug, Error)]
pub enum ConfigWriteError {
    /// The configuration directory could not be created.
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The merged mapping could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing or replacing the settings file failed.
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Flat key-value settings store.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore: Send + Sync {
    /// Returns the stored value for `key`, or `default` when the key is absent
    /// or the store cannot be loaded.  Never fails.
    fn read(&self, key: &str, default: Value) -> Value;

    /// Sets `key = value`, keeping every other stored key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigWriteError`] if the store cannot be persisted.
    fn write(&self, key: &str, value: Value) -> Result<(), ConfigWriteError>;
}

/// Reads a string setting.  Non-string values yield `default`.
pub fn read_string(store: &dyn SettingsStore, key: &str, default: &str) -> String {
    match store.read(key, Value::String(default.to_string())) {
        Value::String(s) => s,
        _ => default.to_string(),
    }
}

/// Reads a boolean-like setting.
///
/// JSON booleans are taken as-is; strings and numbers are matched against the
/// truthy spellings (`"true"`, `"1"`, `"t"`, `"y"`, `"yes"`).
pub fn read_flag(store: &dyn SettingsStore, key: &str, default: bool) -> bool {
    match store.read(key, Value::Bool(default)) {
        Value::Bool(b) => b,
        Value::String(s) => is_truthy_flag(&s),
        Value::Number(n) => is_truthy_flag(&n.to_string()),
        _ => default,
    }
}

// ── Dialog presenter ──────────────────────────────────────────────────────────

/// Error raised by a dialog surface.
#[derive(Debug, Error)]
pub enum PresenterError {
    /// The surface could not be built or shown.
    #[error("dialog could not be shown: {0}")]
    Unavailable(String),

    /// The surface reported an edit or exit the session rejected.
    #[error("dialog reported an invalid interaction: {0}")]
    Session(#[from] SessionError),

    /// Reading user input from the surface failed.
    #[error("dialog input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A toolkit able to show a modal dialog.
#[cfg_attr(test, mockall::automock)]
pub trait DialogPresenter: Send + Sync {
    /// Shows the session's schema and blocks until the user is done.
    ///
    /// The session is `Active` on entry.  The presenter reports edits through
    /// the session's edit methods and finishes with `confirm()` or `cancel()`.
    /// Returning with the session still active counts as a cancel.
    fn present(&self, session: &mut DialogSession) -> Result<(), PresenterError>;

    /// Shows a blocking message box.  Best effort; failures are swallowed.
    fn notify(&self, title: &str, message: &str);
}

// ── Text document ─────────────────────────────────────────────────────────────

/// Position in the document's text, as reported by the view cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition(pub usize);

/// Error raised by the document collaborator.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document has no view cursor")]
    NoViewCursor,

    #[error("text insertion failed: {0}")]
    Insert(String),
}

/// The host document the instruction workflow writes into.
#[cfg_attr(test, mockall::automock)]
pub trait TextDocument: Send + Sync {
    /// `false` when the current component has no text body (e.g. a drawing).
    fn supports_text(&self) -> bool;

    /// Current position of the view cursor.
    fn view_cursor(&self) -> Result<CursorPosition, DocumentError>;

    /// Inserts `text` at `at` without replacing any existing content.
    fn insert_text(&self, at: CursorPosition, text: &str) -> Result<(), DocumentError>;
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Warning,
    Error,
}

/// Destination for diagnostic entries.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    /// Records one entry.  `debug_logging` is the value of the `debug_logging`
    /// setting at the time of the trigger call.
    fn record(&self, severity: Severity, message: &str, debug_logging: bool);
}

/// A sink bound to the debug flag of one trigger call.
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    sink: &'a dyn DiagnosticSink,
    debug_logging: bool,
}

impl<'a> Diagnostics<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink, debug_logging: bool) -> Self {
        Self {
            sink,
            debug_logging,
        }
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn debug(&self, message: &str) {
        self.sink.record(Severity::Debug, message, self.debug_logging);
    }

    pub fn warn(&self, message: &str) {
        self.sink
            .record(Severity::Warning, message, self.debug_logging);
    }

    pub fn error(&self, message: &str) {
        self.sink.record(Severity::Error, message, self.debug_logging);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
