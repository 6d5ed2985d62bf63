//! Infrastructure layer for the extension host.
//!
//! Contains the adapters behind the application traits: the JSON settings
//! file, the tracing-backed diagnostics sink, dialog presenters and text
//! documents (console-backed for the standalone binary, recording doubles
//! for tests).
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `writerai_core`, but MUST NOT be imported by the `application` layer.

pub mod diagnostics;
pub mod document;
pub mod presenter;
pub mod storage;
