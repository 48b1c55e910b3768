//! Run reports.
//!
//! Every workflow writes one line per processed candidate and a trailer with
//! the elapsed time.

use std::{io, time::Duration};

/// Append-only destination for report lines.
pub trait ReportSink {
    /// Append `line`; implementations add the line terminator.
    fn record(&mut self, line: &str) -> io::Result<()>;
}

/// Report kept in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryReport {
    /// Lines recorded so far.
    pub lines: Vec<String>,
}

impl ReportSink for MemoryReport {
    fn record(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

/// Format `elapsed` as `HH:MM:SS`.
///
/// Hours are not wrapped at 24.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wikihum_core::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_secs(3_725)), "01:02:05");
/// assert_eq!(format_elapsed(Duration::from_secs(90_000)), "25:00:00");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total.div_euclid(3_600);
    let minutes = total.rem_euclid(3_600).div_euclid(60);
    let seconds = total.rem_euclid(60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Report trailer line for a run that took `elapsed`.
#[must_use]
pub fn execution_time_line(elapsed: Duration) -> String {
    format!("Execution time: {} s.", format_elapsed(elapsed))
}
