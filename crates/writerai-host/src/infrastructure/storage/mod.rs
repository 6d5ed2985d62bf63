//! Storage infrastructure: settings file persistence.
//!
//! The `config_store` sub-module handles:
//!
//! - Reading the flat JSON settings object, treating a missing, unreadable or
//!   malformed file as empty.
//! - Merging a single key into the stored object and replacing the file
//!   atomically.
//! - Resolving a per-user configuration directory for the standalone binary.

pub mod config_store;
