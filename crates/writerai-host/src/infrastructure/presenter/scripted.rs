//! Scripted dialog presenter for headless runs and tests.
//!
//! Each call to [`DialogPresenter::present`] consumes the next queued
//! [`DialogScript`] and replays its steps against the session, as if a user
//! had typed and clicked.  Every schema shown and every message box raised is
//! recorded so tests can inspect what the user would have seen.
//!
//! # Usage in tests
//!
//! ```ignore
//! let presenter = Arc::new(ScriptedPresenter::new());
//! presenter.push(DialogScript::new().set_text("api_key", "sk-test").confirm());
//!
//! dispatcher.dispatch("setting");
//!
//! assert_eq!(presenter.shown_titles(), vec!["WriterAI Settings"]);
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use writerai_core::{DialogSchema, DialogSession};

use crate::application::collaborators::{DialogPresenter, PresenterError};

/// One simulated user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    SetText { field: String, text: String },
    Select { field: String, index: Option<usize> },
    Confirm,
    Cancel,
    /// Close the window without choosing.
    Close,
    /// The toolkit fails while the dialog is open.
    Fail(String),
}

/// Ordered steps for one dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogScript {
    steps: Vec<ScriptStep>,
}

impl DialogScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(mut self, field: &str, text: &str) -> Self {
        self.steps.push(ScriptStep::SetText {
            field: field.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn select(mut self, field: &str, index: Option<usize>) -> Self {
        self.steps.push(ScriptStep::Select {
            field: field.to_string(),
            index,
        });
        self
    }

    pub fn confirm(mut self) -> Self {
        self.steps.push(ScriptStep::Confirm);
        self
    }

    pub fn cancel(mut self) -> Self {
        self.steps.push(ScriptStep::Cancel);
        self
    }

    pub fn close(mut self) -> Self {
        self.steps.push(ScriptStep::Close);
        self
    }

    pub fn fail(mut self, reason: &str) -> Self {
        self.steps.push(ScriptStep::Fail(reason.to_string()));
        self
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }
}

/// A presenter that replays queued scripts.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    scripts: Mutex<VecDeque<DialogScript>>,
    /// Schemas in the order they were presented.
    pub shown: Mutex<Vec<DialogSchema>>,
    /// `(title, message)` pairs passed to `notify`.
    pub notifications: Mutex<Vec<(String, String)>>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the script for the next dialog.
    pub fn push(&self, script: DialogScript) {
        self.scripts
            .lock()
            .expect("lock poisoned")
            .push_back(script);
    }

    /// Titles of the dialogs shown so far.
    pub fn shown_titles(&self) -> Vec<String> {
        self.shown
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|s| s.title().to_string())
            .collect()
    }

    /// Number of scripts not yet consumed.
    pub fn pending(&self) -> usize {
        self.scripts.lock().expect("lock poisoned").len()
    }
}

impl DialogPresenter for ScriptedPresenter {
    fn present(&self, session: &mut DialogSession) -> Result<(), PresenterError> {
        let script = self
            .scripts
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .ok_or_else(|| PresenterError::Unavailable("no scripted interaction queued".into()))?;
        self.shown
            .lock()
            .expect("lock poisoned")
            .push(session.schema().clone());

        for step in script.steps {
            match step {
                ScriptStep::SetText { field, text } => session.set_text(&field, &text)?,
                ScriptStep::Select { field, index } => session.select(&field, index)?,
                ScriptStep::Confirm => session.confirm()?,
                ScriptStep::Cancel => session.cancel()?,
                ScriptStep::Close => break,
                ScriptStep::Fail(reason) => return Err(PresenterError::Unavailable(reason)),
            }
        }
        Ok(())
    }

    fn notify(&self, title: &str, message: &str) {
        self.notifications
            .lock()
            .expect("lock poisoned")
            .push((title.to_string(), message.to_string()));
    }
}
