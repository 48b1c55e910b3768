//! Report sink appending to a UTF-8 file.

use std::{
    io::{self, Write},
    time::Duration,
};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::File;
use wikihum_core::{ReportSink, execution_time_line};
use wikihum_fs::append_utf8_file;

/// Report file opened for appending; earlier runs are kept.
///
/// Each line is written through immediately so an interrupted run leaves a
/// complete record of the candidates it handled.
#[derive(Debug)]
pub struct FileReport {
    path: Utf8PathBuf,
    file: File,
}

impl FileReport {
    /// Open `path` for appending, creating it and its parents when needed.
    ///
    /// # Errors
    /// Returns the I/O error raised while creating directories or opening the
    /// file.
    pub fn open(path: &Utf8Path) -> io::Result<Self> {
        let file = append_utf8_file(path)?;
        Ok(Self {
            path: path.to_owned(),
            file,
        })
    }

    /// Path of the report file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Append the execution-time trailer and flush.
    ///
    /// # Errors
    /// Returns the I/O error raised while writing.
    pub fn finish(mut self, elapsed: Duration) -> io::Result<()> {
        self.record(&execution_time_line(elapsed))?;
        self.file.flush()
    }
}

impl ReportSink for FileReport {
    fn record(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    fn appends_lines_across_runs() {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("logs/simc.log")).expect("utf8 path");

        let mut first = FileReport::open(&path).expect("open report");
        first.record("Q1 padded").expect("record");
        first.finish(Duration::from_secs(65)).expect("finish");

        let mut second = FileReport::open(&path).expect("reopen report");
        second.record("Q2 padded").expect("record");
        drop(second);

        assert_eq!(
            fs::read_to_string(&path).expect("read back"),
            "Q1 padded\nExecution time: 00:01:05 s.\nQ2 padded\n"
        );
    }

    #[rstest]
    fn remembers_its_path() {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("run.log")).expect("utf8 path");
        let report = FileReport::open(&path).expect("open report");
        assert_eq!(report.path(), path.as_path());
    }
}
