//! TriggerDispatcher: the single entry point the host calls.
//!
//! The host invokes [`TriggerDispatcher::dispatch`] with an action identifier
//! each time the user picks a menu entry or toolbar button.  The dispatcher
//! selects the workflow, runs its dialog, and applies the confirmed result.
//!
//! # Failure policy
//!
//! `dispatch` always returns normally.  Settings write failures are recorded
//! per key and do not stop the workflow.  Dialog or document failures end the
//! workflow without further side effects, are shown to the user in a message
//! box, and are recorded as diagnostics.
//!
//! The `debug_logging` setting is read at the start of every call and passed
//! along with each diagnostic entry for that call.

use std::sync::Arc;

use thiserror::Error;
use writerai_core::domain::settings::KEY_DEBUG_LOGGING;
use writerai_core::{PresetCatalog, SchemaError, SessionOutcome, TriggerAction};

use super::collaborators::{
    read_flag, DiagnosticSink, Diagnostics, DialogPresenter, DocumentError, PresenterError,
    SettingsStore, TextDocument,
};
use super::configure_backend::{apply_settings, settings_schema};
use super::format_document::{apply_instruction, instruction_schema};
use super::run_dialog::run_dialog;

/// Title of the message box shown when a workflow fails.
pub const ERROR_TITLE: &str = "WriterAI";

/// A workflow failure that ends the current trigger call.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Presenter(#[from] PresenterError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("invalid dialog definition: {0}")]
    Schema(#[from] SchemaError),
}

/// Routes host triggers to the instruction and settings workflows.
pub struct TriggerDispatcher {
    store: Arc<dyn SettingsStore>,
    presenter: Arc<dyn DialogPresenter>,
    document: Arc<dyn TextDocument>,
    diagnostics: Arc<dyn DiagnosticSink>,
    catalog: PresetCatalog,
}

impl TriggerDispatcher {
    /// Creates a dispatcher using the built-in preset catalog.
    pub fn new(
        store: Arc<dyn SettingsStore>,
        presenter: Arc<dyn DialogPresenter>,
        document: Arc<dyn TextDocument>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            store,
            presenter,
            document,
            diagnostics,
            catalog: PresetCatalog::builtin(),
        }
    }

    /// Replaces the preset catalog.
    pub fn with_catalog(mut self, catalog: PresetCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Runs the workflow named by `action_id`.  Unknown actions are ignored.
    pub fn dispatch(&self, action_id: &str) {
        let debug_logging = read_flag(self.store.as_ref(), KEY_DEBUG_LOGGING, false);
        let diag = Diagnostics::new(self.diagnostics.as_ref(), debug_logging);

        let Some(action) = TriggerAction::parse(action_id) else {
            diag.debug(&format!("ignoring unknown trigger action {action_id:?}"));
            return;
        };
        diag.debug(&format!("trigger {action}"));

        let result = match action {
            TriggerAction::Format => self.run_format(&diag),
            TriggerAction::Setting => self.run_setting(&diag),
        };
        if let Err(e) = result {
            diag.error(&format!("{action} failed: {e}"));
            self.presenter.notify(ERROR_TITLE, &e.to_string());
        }
    }

    fn run_format(&self, diag: &Diagnostics<'_>) -> Result<(), WorkflowError> {
        if !self.document.supports_text() {
            diag.debug("current document has no text body; skipping format");
            return Ok(());
        }
        let outcome = run_dialog(self.presenter.as_ref(), instruction_schema()?)?;
        let SessionOutcome::Confirmed(result) = outcome else {
            diag.debug("instruction dialog cancelled");
            return Ok(());
        };
        if apply_instruction(self.document.as_ref(), &result)? {
            diag.debug("instruction inserted into document");
        } else {
            diag.debug("empty instruction; nothing inserted");
        }
        Ok(())
    }

    fn run_setting(&self, diag: &Diagnostics<'_>) -> Result<(), WorkflowError> {
        let schema = settings_schema(self.store.as_ref(), &self.catalog)?;
        let outcome = run_dialog(self.presenter.as_ref(), schema)?;
        let SessionOutcome::Confirmed(result) = outcome else {
            diag.debug("settings dialog cancelled");
            return Ok(());
        };
        let failed = apply_settings(self.store.as_ref(), &self.catalog, &result, diag);
        if failed.is_empty() {
            diag.debug("settings saved");
        }
        Ok(())
    }
}
