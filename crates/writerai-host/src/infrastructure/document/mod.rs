//! Text document adapters.
//!
//! The real document lives in the host; these implementations of
//! [`TextDocument`](crate::application::collaborators::TextDocument) stand in
//! for it outside the host.
//!
//! - **`console`** – Appends inserted text to a writer (stdout for the binary).
//! - **`mock`** – Records insertions in memory for tests.

pub mod console;
pub mod mock;
