//! Modal dialog model: schema in, confirmed values or nothing out.
//!
//! A [`DialogSchema`] lists the fields a dialog shows.  A [`DialogSession`]
//! runs one interaction over that schema and is driven by whatever surface
//! the host provides (a native toolkit window, a terminal prompt, or a
//! scripted test harness).  The surface only reports edits and the final
//! confirm/cancel choice; it never decides what the values mean.
//!
//! # Session lifecycle
//!
//! ```text
//! Initial ──activate──►  Active ──confirm──►  Confirmed
//!                          │
//!                          └────cancel───►  Cancelled
//! ```
//!
//! - `Initial`: constructed with the schema's initial values, not yet shown.
//! - `Active`: shown; fields may be edited any number of times.
//! - `Confirmed`: terminal.  The [`ResultMapping`] is captured from the values
//!   current at the moment of confirmation.
//! - `Cancelled`: terminal.  Edits are discarded and no mapping exists.
//!
//! Only one exit is ever taken: once terminal, every further call fails with
//! [`SessionError::NotActive`] and the state does not change.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

// ── Field model ───────────────────────────────────────────────────────────────

/// The kind of input a field presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// One-line text entry.
    SingleLineText {
        /// Input is hidden as it is typed (API keys).
        masked: bool,
        /// The initial text is selected when the surface opens, so typing
        /// replaces it.
        select_initial: bool,
    },
    /// Free-form text spanning several lines.
    MultiLineText,
    /// A list from which at most one option is selected.
    SingleSelect {
        /// Option labels in display order.
        options: Vec<String>,
    },
}

impl FieldKind {
    fn is_text(&self) -> bool {
        matches!(
            self,
            FieldKind::SingleLineText { .. } | FieldKind::MultiLineText
        )
    }

    fn option_count(&self) -> Option<usize> {
        match self {
            FieldKind::SingleSelect { options } => Some(options.len()),
            _ => None,
        }
    }
}

/// The value held by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Contents of a text field.
    Text(String),
    /// Selected option index of a list field; `None` when nothing is selected.
    Selection(Option<usize>),
}

impl FieldValue {
    /// Returns the text, or `None` for a list value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Selection(_) => None,
        }
    }

    /// Returns the selected index, or `None` for text values and empty selections.
    pub fn selection(&self) -> Option<usize> {
        match self {
            FieldValue::Selection(index) => *index,
            FieldValue::Text(_) => None,
        }
    }
}

/// One field of a dialog schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Identifier, unique within the schema.  Used as the result mapping key.
    pub id: String,
    /// Label shown next to the input.
    pub label: String,
    pub kind: FieldKind,
    /// Value the field holds when the session starts.
    pub initial: FieldValue,
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Errors raised while building a schema.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// Two fields share the same id.
    #[error("duplicate field id: {0}")]
    DuplicateFieldId(String),

    /// A list field's initial selection does not name one of its options.
    #[error("initial selection {index} of field {field} is out of range ({options} options)")]
    SelectionOutOfRange {
        field: String,
        index: usize,
        options: usize,
    },
}

/// Ordered set of fields shown by a dialog, plus its window title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSchema {
    title: String,
    fields: Vec<FieldDescriptor>,
}

impl DialogSchema {
    /// Starts building a schema with the given window title.
    pub fn builder(title: impl Into<String>) -> DialogSchemaBuilder {
        DialogSchemaBuilder {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fields in display order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by id.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }
}

/// Builder for [`DialogSchema`].
///
/// ```
/// use writerai_core::DialogSchema;
///
/// let schema = DialogSchema::builder("Settings")
///     .select_field("model", "Model:", vec!["A".into(), "B".into()], Some(1))
///     .masked_field("api_key", "API key:", "")
///     .build()
///     .unwrap();
/// assert_eq!(schema.fields().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DialogSchemaBuilder {
    title: String,
    fields: Vec<FieldDescriptor>,
}

impl DialogSchemaBuilder {
    /// Adds a plain single-line text field.
    pub fn text_field(self, id: &str, label: &str, initial: &str) -> Self {
        self.push_text(id, label, initial, false, false)
    }

    /// Adds a single-line text field whose initial value is pre-selected.
    pub fn placeholder_field(self, id: &str, label: &str, initial: &str) -> Self {
        self.push_text(id, label, initial, false, true)
    }

    /// Adds a single-line text field with hidden input.
    pub fn masked_field(self, id: &str, label: &str, initial: &str) -> Self {
        self.push_text(id, label, initial, true, false)
    }

    /// Adds a multi-line text field.
    pub fn multiline_field(mut self, id: &str, label: &str, initial: &str) -> Self {
        self.fields.push(FieldDescriptor {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::MultiLineText,
            initial: FieldValue::Text(initial.to_string()),
        });
        self
    }

    /// Adds a single-select list field.
    pub fn select_field(
        mut self,
        id: &str,
        label: &str,
        options: Vec<String>,
        selected: Option<usize>,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::SingleSelect { options },
            initial: FieldValue::Selection(selected),
        });
        self
    }

    fn push_text(
        mut self,
        id: &str,
        label: &str,
        initial: &str,
        masked: bool,
        select_initial: bool,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::SingleLineText {
                masked,
                select_initial,
            },
            initial: FieldValue::Text(initial.to_string()),
        });
        self
    }

    /// Validates and returns the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateFieldId`] if two fields share an id, or
    /// [`SchemaError::SelectionOutOfRange`] if a list's initial selection is
    /// not one of its options.
    pub fn build(self) -> Result<DialogSchema, SchemaError> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.id == field.id) {
                return Err(SchemaError::DuplicateFieldId(field.id.clone()));
            }
            if let (Some(options), Some(index)) =
                (field.kind.option_count(), field.initial.selection())
            {
                if index >= options {
                    return Err(SchemaError::SelectionOutOfRange {
                        field: field.id.clone(),
                        index,
                        options,
                    });
                }
            }
        }
        Ok(DialogSchema {
            title: self.title,
            fields: self.fields,
        })
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Lifecycle state of a [`DialogSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initial,
    Active,
    Confirmed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Confirmed | SessionState::Cancelled)
    }
}

/// Errors raised by session operations.  None of them change the session.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// The operation requires a different lifecycle state.
    #[error("operation not allowed in session state {0:?}")]
    NotActive(SessionState),

    /// The field id is not part of the schema.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A text edit was sent to a list field or vice versa.
    #[error("field {field} does not accept {attempted} values")]
    KindMismatch {
        field: String,
        attempted: &'static str,
    },

    /// A list selection does not name one of the field's options.
    #[error("selection {index} of field {field} is out of range ({options} options)")]
    SelectionOutOfRange {
        field: String,
        index: usize,
        options: usize,
    },
}

/// Field id → final value, produced only by a confirmed session.
///
/// Covers exactly the fields of the schema the session was built from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultMapping {
    values: BTreeMap<String, FieldValue>,
}

impl ResultMapping {
    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    /// Text of a text field, or `None` if the id is missing or not text.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.values.get(id).and_then(FieldValue::as_text)
    }

    /// Selected index of a list field, or `None` if missing or nothing is selected.
    pub fn selection(&self, id: &str) -> Option<usize> {
        self.values.get(id).and_then(FieldValue::selection)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Confirmed(ResultMapping),
    Cancelled,
}

/// One run of a modal field-collection interaction.
///
/// A session is single-use: after it reaches a terminal state it rejects all
/// further edits and transitions.
#[derive(Debug, Clone)]
pub struct DialogSession {
    schema: DialogSchema,
    values: Vec<FieldValue>,
    state: SessionState,
}

impl DialogSession {
    /// Creates a session in the `Initial` state holding the schema's initial values.
    pub fn new(schema: DialogSchema) -> Self {
        let values = initial_values(&schema);
        Self {
            schema,
            values,
            state: SessionState::Initial,
        }
    }

    pub fn schema(&self) -> &DialogSchema {
        &self.schema
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Marks the session as shown.  Only valid from `Initial`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotActive`] if the session was already activated.
    pub fn activate(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Initial {
            return Err(SessionError::NotActive(self.state));
        }
        self.state = SessionState::Active;
        debug!(title = %self.schema.title, "dialog session active");
        Ok(())
    }

    /// Current value of a field.
    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.schema.position(id).map(|i| &self.values[i])
    }

    /// Replaces the contents of a text field.
    ///
    /// # Errors
    ///
    /// Fails if the session is not active, the field does not exist, or the
    /// field is a list.
    pub fn set_text(&mut self, id: &str, text: &str) -> Result<(), SessionError> {
        let index = self.editable_field(id)?;
        if !self.schema.fields[index].kind.is_text() {
            return Err(SessionError::KindMismatch {
                field: id.to_string(),
                attempted: "text",
            });
        }
        self.values[index] = FieldValue::Text(text.to_string());
        Ok(())
    }

    /// Changes the selection of a list field; `None` clears it.
    ///
    /// # Errors
    ///
    /// Fails if the session is not active, the field does not exist, the field
    /// is not a list, or the index is not one of its options.
    pub fn select(&mut self, id: &str, selection: Option<usize>) -> Result<(), SessionError> {
        let index = self.editable_field(id)?;
        let options = self.schema.fields[index].kind.option_count().ok_or_else(|| {
            SessionError::KindMismatch {
                field: id.to_string(),
                attempted: "selection",
            }
        })?;
        if let Some(selected) = selection {
            if selected >= options {
                return Err(SessionError::SelectionOutOfRange {
                    field: id.to_string(),
                    index: selected,
                    options,
                });
            }
        }
        self.values[index] = FieldValue::Selection(selection);
        Ok(())
    }

    /// Ends the session, capturing the current value of every field.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotActive`] unless the session is `Active`.
    pub fn confirm(&mut self) -> Result<(), SessionError> {
        self.require_active()?;
        self.state = SessionState::Confirmed;
        debug!(title = %self.schema.title, "dialog session confirmed");
        Ok(())
    }

    /// Ends the session and discards every edit made while active.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotActive`] unless the session is `Active`.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.require_active()?;
        self.values = initial_values(&self.schema);
        self.state = SessionState::Cancelled;
        debug!(title = %self.schema.title, "dialog session cancelled");
        Ok(())
    }

    /// The captured values, available only once confirmed.
    pub fn result(&self) -> Option<ResultMapping> {
        if self.state != SessionState::Confirmed {
            return None;
        }
        let values = self
            .schema
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.id.clone(), value.clone()))
            .collect();
        Some(ResultMapping { values })
    }

    /// Consumes the session.  Anything other than `Confirmed` counts as cancelled.
    pub fn into_outcome(self) -> SessionOutcome {
        match self.result() {
            Some(mapping) => SessionOutcome::Confirmed(mapping),
            None => SessionOutcome::Cancelled,
        }
    }

    fn require_active(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Active {
            Ok(())
        } else {
            Err(SessionError::NotActive(self.state))
        }
    }

    fn editable_field(&self, id: &str) -> Result<usize, SessionError> {
        self.require_active()?;
        self.schema
            .position(id)
            .ok_or_else(|| SessionError::UnknownField(id.to_string()))
    }
}

fn initial_values(schema: &DialogSchema) -> Vec<FieldValue> {
    schema.fields.iter().map(|f| f.initial.clone()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_schema() -> DialogSchema {
        DialogSchema::builder("Settings")
            .select_field(
                "model",
                "Model:",
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                Some(0),
            )
            .masked_field("api_key", "API key:", "old-key")
            .build()
            .expect("schema must be valid")
    }

    fn active_session() -> DialogSession {
        let mut session = DialogSession::new(settings_schema());
        session.activate().expect("activate from Initial");
        session
    }

    // ── Schema ────────────────────────────────────────────────────────────────

    #[test]
    fn test_build_rejects_duplicate_field_ids() {
        let result = DialogSchema::builder("t")
            .text_field("x", "X", "")
            .multiline_field("x", "X again", "")
            .build();
        assert_eq!(result, Err(SchemaError::DuplicateFieldId("x".to_string())));
    }

    #[test]
    fn test_build_rejects_initial_selection_out_of_range() {
        let result = DialogSchema::builder("t")
            .select_field("m", "M", vec!["only".to_string()], Some(1))
            .build();
        assert!(matches!(
            result,
            Err(SchemaError::SelectionOutOfRange { index: 1, options: 1, .. })
        ));
    }

    #[test]
    fn test_placeholder_field_selects_initial_text() {
        let schema = DialogSchema::builder("t")
            .placeholder_field("instruction", "Input:", "example")
            .build()
            .unwrap();
        assert_eq!(
            schema.field("instruction").unwrap().kind,
            FieldKind::SingleLineText {
                masked: false,
                select_initial: true
            }
        );
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    #[test]
    fn test_new_session_starts_initial_with_schema_values() {
        let session = DialogSession::new(settings_schema());
        assert_eq!(session.state(), SessionState::Initial);
        assert_eq!(session.value("model"), Some(&FieldValue::Selection(Some(0))));
        assert_eq!(
            session.value("api_key"),
            Some(&FieldValue::Text("old-key".to_string()))
        );
    }

    #[test]
    fn test_edits_are_rejected_before_activation() {
        let mut session = DialogSession::new(settings_schema());
        assert_eq!(
            session.set_text("api_key", "new"),
            Err(SessionError::NotActive(SessionState::Initial))
        );
        assert_eq!(
            session.confirm(),
            Err(SessionError::NotActive(SessionState::Initial))
        );
    }

    #[test]
    fn test_activate_twice_fails() {
        let mut session = active_session();
        assert_eq!(
            session.activate(),
            Err(SessionError::NotActive(SessionState::Active))
        );
    }

    #[test]
    fn test_confirm_captures_latest_values() {
        // Arrange
        let mut session = active_session();
        session.set_text("api_key", "first").unwrap();
        session.set_text("api_key", "second").unwrap();
        session.select("model", Some(2)).unwrap();

        // Act
        session.confirm().unwrap();

        // Assert
        let result = session.result().expect("confirmed session has a mapping");
        assert_eq!(result.len(), 2);
        assert_eq!(result.text("api_key"), Some("second"));
        assert_eq!(result.selection("model"), Some(2));
    }

    #[test]
    fn test_cancel_discards_edits_and_yields_no_mapping() {
        // Arrange
        let mut session = active_session();
        session.set_text("api_key", "typed but abandoned").unwrap();
        session.select("model", Some(1)).unwrap();

        // Act
        session.cancel().unwrap();

        // Assert
        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(session.result().is_none());
        assert_eq!(
            session.value("api_key"),
            Some(&FieldValue::Text("old-key".to_string()))
        );
        assert_eq!(session.into_outcome(), SessionOutcome::Cancelled);
    }

    #[test]
    fn test_first_exit_wins() {
        // Arrange
        let mut session = active_session();
        session.confirm().unwrap();

        // Act
        let cancel = session.cancel();
        let confirm_again = session.confirm();

        // Assert
        assert_eq!(cancel, Err(SessionError::NotActive(SessionState::Confirmed)));
        assert_eq!(
            confirm_again,
            Err(SessionError::NotActive(SessionState::Confirmed))
        );
        assert_eq!(session.state(), SessionState::Confirmed);
    }

    #[test]
    fn test_terminal_session_rejects_edits() {
        let mut session = active_session();
        session.cancel().unwrap();
        assert_eq!(
            session.set_text("api_key", "late"),
            Err(SessionError::NotActive(SessionState::Cancelled))
        );
        assert_eq!(
            session.select("model", Some(1)),
            Err(SessionError::NotActive(SessionState::Cancelled))
        );
    }

    // ── Edit validation ───────────────────────────────────────────────────────

    #[test]
    fn test_set_text_on_unknown_field_fails() {
        let mut session = active_session();
        assert_eq!(
            session.set_text("nope", "x"),
            Err(SessionError::UnknownField("nope".to_string()))
        );
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut session = active_session();
        assert!(matches!(
            session.set_text("model", "A"),
            Err(SessionError::KindMismatch { attempted: "text", .. })
        ));
        assert!(matches!(
            session.select("api_key", Some(0)),
            Err(SessionError::KindMismatch { attempted: "selection", .. })
        ));
    }

    #[test]
    fn test_select_out_of_range_is_rejected_and_keeps_value() {
        let mut session = active_session();
        let result = session.select("model", Some(3));
        assert!(matches!(
            result,
            Err(SessionError::SelectionOutOfRange { index: 3, options: 3, .. })
        ));
        assert_eq!(session.value("model"), Some(&FieldValue::Selection(Some(0))));
    }

    #[test]
    fn test_cleared_selection_is_reported_as_none() {
        let mut session = active_session();
        session.select("model", None).unwrap();
        session.confirm().unwrap();
        let result = session.result().unwrap();
        assert_eq!(result.get("model"), Some(&FieldValue::Selection(None)));
        assert_eq!(result.selection("model"), None);
    }

    #[test]
    fn test_unfinished_session_outcome_is_cancelled() {
        let session = active_session();
        assert_eq!(session.into_outcome(), SessionOutcome::Cancelled);
    }
}
