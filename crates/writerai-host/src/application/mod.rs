//! Application layer use cases for the WriterAI extension.
//!
//! Use cases in this layer orchestrate domain types from `writerai_core` to
//! fulfil one host trigger, and depend only on the traits in
//! [`collaborators`] rather than on concrete storage, toolkit or document
//! implementations.
//!
//! # Sub-modules
//!
//! - **`collaborators`** – The host seams: settings store, dialog presenter,
//!   text document and diagnostics sink.
//!
//! - **`run_dialog`** – Drives one dialog session through a presenter.
//!
//! - **`configure_backend`** – The settings workflow: seed the preset list
//!   from the stored model and persist the confirmed choice.
//!
//! - **`format_document`** – The instruction workflow: collect one line of
//!   text and insert it at the view cursor.
//!
//! - **`dispatch_trigger`** – Maps a host action identifier to a workflow and
//!   contains its failures.

pub mod collaborators;
pub mod configure_backend;
pub mod dispatch_trigger;
pub mod format_document;
pub mod run_dialog;
