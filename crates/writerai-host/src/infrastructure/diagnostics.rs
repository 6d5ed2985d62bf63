//! Diagnostic sinks.
//!
//! [`TracingDiagnostics`] forwards entries to the `tracing` subscriber the
//! host installed.  Warnings and errors are always emitted; debug entries only
//! when the `debug_logging` setting was on for the trigger call that produced
//! them.
//!
//! [`RecordingDiagnostics`] keeps entries in memory for assertions.

use std::sync::Mutex;

use tracing::{error, info, warn};

use crate::application::collaborators::{DiagnosticSink, Severity};

/// Forwards diagnostics to `tracing` under the `writerai` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record(&self, severity: Severity, message: &str, debug_logging: bool) {
        match severity {
            Severity::Error => error!(target: "writerai", "{message}"),
            Severity::Warning => warn!(target: "writerai", "{message}"),
            // Emitted at info so the entry shows up under the default filter
            // once the user turned debug logging on.
            Severity::Debug if debug_logging => info!(target: "writerai", "{message}"),
            Severity::Debug => {}
        }
    }
}

/// One entry captured by [`RecordingDiagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub debug_logging: bool,
}

/// In-memory sink that records every entry, including suppressed debug ones.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub entries: Mutex<Vec<RecordedDiagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries with the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<RecordedDiagnostic> {
        self.entries
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|e| e.severity == severity)
            .cloned()
            .collect()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn record(&self, severity: Severity, message: &str, debug_logging: bool) {
        self.entries
            .lock()
            .expect("lock poisoned")
            .push(RecordedDiagnostic {
                severity,
                message: message.to_string(),
                debug_logging,
            });
    }
}
