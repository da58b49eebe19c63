//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use camino::Utf8Path;
use repominer::{AnalysisReport, MiningError};

/// Writes the summary of a branch analysis to the given writer.
pub fn write_report<W: Write>(writer: &mut W, report: &AnalysisReport) -> Result<(), MiningError> {
    report.write_summary(writer).map_err(|e| io_error(&e))
}

/// Writes a numbered shortlist followed by its size and destination.
pub fn write_shortlist<W: Write, S: AsRef<str>>(
    writer: &mut W,
    names: &[S],
    results_path: &Utf8Path,
) -> Result<(), MiningError> {
    if names.is_empty() {
        writeln!(writer, "No results found.").map_err(|e| io_error(&e))?;
    } else {
        for (position, name) in (1..).zip(names) {
            writeln!(writer, "{position}. {}", name.as_ref()).map_err(|e| io_error(&e))?;
        }
        writeln!(writer, "Total items: {}", names.len()).map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "Results written to {results_path}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`MiningError::Io`].
pub(crate) fn io_error(error: &io::Error) -> MiningError {
    MiningError::Io {
        message: error.to_string(),
    }
}
