//! Run report written both to its log file and to the console.

use std::{io, io::Write, time::Duration};

use camino::Utf8Path;
use wikihum_core::{ReportSink, execution_time_line};
use wikihum_data::FileReport;

use crate::CliError;

pub(crate) struct RunReport<'a> {
    file: FileReport,
    out: &'a mut dyn Write,
}

impl<'a> RunReport<'a> {
    pub(crate) fn open(path: &Utf8Path, out: &'a mut dyn Write) -> Result<Self, CliError> {
        let file = FileReport::open(path).map_err(|source| CliError::OpenReport {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self { file, out })
    }

    /// Append the execution-time trailer to the file and the console.
    pub(crate) fn finish(self, elapsed: Duration) -> Result<(), CliError> {
        writeln!(self.out, "{}", execution_time_line(elapsed)).map_err(CliError::Output)?;
        self.file.finish(elapsed).map_err(CliError::Output)
    }
}

impl ReportSink for RunReport<'_> {
    fn record(&mut self, line: &str) -> io::Result<()> {
        self.file.record(line)?;
        writeln!(self.out, "{line}")
    }
}
