//! Instruction workflow: ask for a free-text instruction and hand it to the document.

use writerai_core::{DialogSchema, ResultMapping, SchemaError};

use super::collaborators::{DocumentError, TextDocument};

/// Window title of the instruction dialog.
pub const FORMAT_TITLE: &str = "AI Formatter";
/// Label of the instruction field.
pub const FORMAT_LABEL: &str = "Input format:";
/// Example instruction the field opens with, pre-selected.
pub const FORMAT_PLACEHOLDER: &str = "example:highlight the first line on page 1";
/// Field id of the instruction entry.
pub const FIELD_INSTRUCTION: &str = "instruction";
/// Prefix prepended to the instruction when it is inserted into the document.
pub const INSTRUCTION_PREFIX: &str = "User entered: ";

/// Builds the single-field instruction dialog.
///
/// # Errors
///
/// Never fails for the fixed field set; the `Result` mirrors the builder.
pub fn instruction_schema() -> Result<DialogSchema, SchemaError> {
    DialogSchema::builder(FORMAT_TITLE)
        .placeholder_field(FIELD_INSTRUCTION, FORMAT_LABEL, FORMAT_PLACEHOLDER)
        .build()
}

/// Inserts a confirmed instruction at the document's view cursor.
///
/// An empty instruction means "no input": nothing is inserted and `Ok(false)`
/// is returned.  Returns `Ok(true)` after exactly one insertion.
///
/// # Errors
///
/// Returns [`DocumentError`] if the cursor cannot be read or the insert fails.
pub fn apply_instruction(
    document: &dyn TextDocument,
    result: &ResultMapping,
) -> Result<bool, DocumentError> {
    let instruction = result.text(FIELD_INSTRUCTION).unwrap_or_default();
    if instruction.is_empty() {
        return Ok(false);
    }
    let cursor = document.view_cursor()?;
    document.insert_text(cursor, &format!("{INSTRUCTION_PREFIX}{instruction}"))?;
    Ok(true)
}
