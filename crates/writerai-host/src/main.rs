//! WriterAI host runner: entry point.
//!
//! Runs one trigger outside the office suite, with a terminal standing in for
//! the dialog toolkit and the document.  Settings are read from and written to
//! the same `writerai.json` the extension uses.
//!
//! # Usage
//!
//! ```text
//! writerai-host <ACTION> [OPTIONS]
//!
//! Arguments:
//!   <ACTION>  Trigger action identifier: `format` or `setting`
//!
//! Options:
//!   --config-dir <DIR>  Directory holding writerai.json
//!                       [env: WRITERAI_CONFIG_DIR] [default: per-user config dir]
//! ```
//!
//! Log output is controlled by `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use writerai_host::application::dispatch_trigger::TriggerDispatcher;
use writerai_host::infrastructure::diagnostics::TracingDiagnostics;
use writerai_host::infrastructure::document::console::ConsoleDocument;
use writerai_host::infrastructure::presenter::console::ConsolePresenter;
use writerai_host::infrastructure::storage::config_store::{default_config_dir, JsonConfigStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Runs a WriterAI trigger from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "writerai-host",
    about = "Runs a WriterAI trigger with terminal dialogs",
    version
)]
struct Cli {
    /// Trigger action identifier (`format` or `setting`).
    ///
    /// Unknown identifiers are accepted and ignored, the same as in the host.
    action: String,

    /// Directory holding `writerai.json`.
    #[arg(long, env = "WRITERAI_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

impl Cli {
    /// Resolves the configuration directory, falling back to the per-user default.
    fn resolve_config_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_config_dir()
                .context("cannot determine a config directory; pass --config-dir"),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = cli.resolve_config_dir()?;
    let store = JsonConfigStore::new(config_dir);
    info!("using settings file {}", store.path().display());

    let dispatcher = TriggerDispatcher::new(
        Arc::new(store),
        Arc::new(ConsolePresenter::stdio()),
        Arc::new(ConsoleDocument::stdout()),
        Arc::new(TracingDiagnostics),
    );
    dispatcher.dispatch(&cli.action);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_action() {
        assert!(Cli::try_parse_from(["writerai-host"]).is_err());
    }

    #[test]
    fn test_cli_accepts_any_action_string() {
        let cli = Cli::parse_from(["writerai-host", "export"]);
        assert_eq!(cli.action, "export");
    }

    #[test]
    fn test_cli_config_dir_override() {
        // Arrange
        let cli = Cli::parse_from(["writerai-host", "setting", "--config-dir", "/tmp/writerai"]);

        // Act
        let dir = cli.resolve_config_dir().unwrap();

        // Assert
        assert_eq!(dir, PathBuf::from("/tmp/writerai"));
    }
}
