//! # writerai-core
//!
//! Shared domain library for the WriterAI document-assistant extension.
//!
//! This crate holds the parts of the extension that have real rules and no
//! host dependencies: it never touches the file system, the document model,
//! or a widget toolkit.
//!
//! # Architecture overview
//!
//! The extension reacts to two host triggers: `format` asks the user for a
//! free-text instruction and hands it to the document, and `setting` lets the
//! user pick an AI backend preset and enter an API key.  Both workflows are a
//! modal dialog followed by a side effect.
//!
//! - **`domain::preset`** – The fixed, ordered catalog of AI backend presets
//!   and the case-insensitive, default-to-first name resolution rule.
//!
//! - **`domain::dialog`** – A toolkit-independent model of a modal dialog: a
//!   schema of fields goes in, and either a confirmed result mapping or
//!   nothing comes out.
//!
//! - **`domain::settings`** – Names of the persisted settings keys and the
//!   truthy-string rule used for boolean flags.
//!
//! - **`domain::trigger`** – The closed set of trigger actions the host can
//!   invoke.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `writerai_core::PresetCatalog` instead of the full module path.
pub use domain::dialog::{
    DialogSchema, DialogSchemaBuilder, DialogSession, FieldDescriptor, FieldKind, FieldValue,
    ResultMapping, SchemaError, SessionError, SessionOutcome, SessionState,
};
pub use domain::preset::{ApiKind, BackendPreset, PresetCatalog};
pub use domain::trigger::TriggerAction;
