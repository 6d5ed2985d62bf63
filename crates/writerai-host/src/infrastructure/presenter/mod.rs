//! Dialog presenters.
//!
//! A presenter turns a [`DialogSchema`](writerai_core::DialogSchema) into
//! something the user can interact with and reports the outcome back through
//! the session.  The core never depends on how that happens.
//!
//! - **`console`** – Prompts on a terminal; used by the standalone binary.
//! - **`scripted`** – Replays queued user actions; used by tests and headless
//!   automation.

pub mod console;
pub mod scripted;
