//! Runs one modal dialog session through a presenter.

use tracing::debug;
use writerai_core::{DialogSchema, DialogSession, SessionOutcome, SessionState};

use super::collaborators::{DialogPresenter, PresenterError};

/// Creates a session for `schema`, shows it, and returns how it ended.
///
/// A presenter that returns without confirming or cancelling (the window was
/// closed) produces [`SessionOutcome::Cancelled`].
///
/// # Errors
///
/// Returns [`PresenterError`] if the surface fails; no outcome is produced in
/// that case and the caller must not apply any side effects.
pub fn run_dialog(
    presenter: &dyn DialogPresenter,
    schema: DialogSchema,
) -> Result<SessionOutcome, PresenterError> {
    let mut session = DialogSession::new(schema);
    session.activate()?;
    presenter.present(&mut session)?;
    if session.state() == SessionState::Active {
        debug!(title = %session.schema().title(), "dialog closed without a choice");
        session.cancel()?;
    }
    Ok(session.into_outcome())
}
