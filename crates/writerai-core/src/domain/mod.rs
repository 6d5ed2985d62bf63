//! Domain entities for the WriterAI extension.
//!
//! Everything in this module is pure logic.  Code in the host crate (settings
//! file persistence, dialog surfaces, document access) depends on these types,
//! but nothing here depends on the host.

/// Dialog schema and the modal session state machine.
///
/// See [`dialog::DialogSession`] for the main type.
pub mod dialog;

/// Fixed catalog of AI backend presets.
pub mod preset;

/// Persisted settings keys and flag parsing.
pub mod settings;

/// Host trigger actions.
pub mod trigger;
