//! Progress telemetry for branch analyses.
//!
//! Events describe how far a run has progressed. Sinks decide where they go:
//! nowhere, stderr as JSON lines, or a console progress line in the binary.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted during a branch analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The branch tip is about to be resolved.
    RunStarted {
        /// `owner/repo@branch` being analysed.
        target: String,
        /// Requested commit cap.
        requested: u32,
    },
    /// A commit received a provenance label.
    CommitClassified {
        /// Abbreviated commit hash.
        sha: String,
        /// Commits examined so far.
        processed: u32,
        /// Requested commit cap.
        requested: u32,
    },
    /// A commit was skipped because its association lookup failed.
    CommitSkipped {
        /// Abbreviated commit hash.
        sha: String,
        /// Commits examined so far.
        processed: u32,
        /// Requested commit cap.
        requested: u32,
        /// Failure description.
        reason: String,
    },
    /// The run reached a terminal state.
    RunFinished {
        /// `owner/repo@branch` that was analysed.
        target: String,
        /// Commits examined.
        processed: u32,
        /// Human readable terminal state.
        outcome: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps every event in memory for later inspection.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Removes and returns the events recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
