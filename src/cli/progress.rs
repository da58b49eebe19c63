//! Console progress reporting for branch analyses.

use std::io::{self, Write};
use std::sync::Mutex;

use repominer::telemetry::{TelemetryEvent, TelemetrySink};

/// Rewrites a single `Processing commits: n/N` line as commits are examined.
pub struct ConsoleProgressSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl ConsoleProgressSink<io::Stderr> {
    /// Progress sink writing to stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleProgressSink<W> {
    /// Progress sink writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self, text: &str) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let _ignored = writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush());
    }
}

impl<W: Write + Send> TelemetrySink for ConsoleProgressSink<W> {
    fn record(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::CommitClassified {
                processed,
                requested,
                ..
            }
            | TelemetryEvent::CommitSkipped {
                processed,
                requested,
                ..
            } => self.write(&format!("\rProcessing commits: {processed}/{requested}")),
            TelemetryEvent::RunFinished { processed, .. } if processed > 0 => self.write("\n"),
            TelemetryEvent::RunStarted { .. } | TelemetryEvent::RunFinished { .. } => {}
        }
    }
}
