//! Report destinations
//!
//! The CSV sink keeps one append-mode handle per file for the whole run and
//! flushes after every line, so every record is on disk before the walk
//! moves on.

use super::error::{Result, SearchError};
use super::types::{ErrorRecord, ReportRecord, ERROR_HEADER, REPORT_HEADER};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only destination for search results.
pub trait ReportSink {
    fn append_match(&mut self, record: &ReportRecord) -> Result<()>;

    /// Record a per-attribute fault. Sinks without an error destination
    /// discard it.
    fn append_error(&mut self, record: &ErrorRecord) -> Result<()>;
}

/// A single append-mode text file written line by line.
struct LineFile {
    path: PathBuf,
    file: File,
}

impl LineFile {
    fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SearchError::SinkOpen {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{}", line)
            .and_then(|_| self.file.flush())
            .map_err(|source| SearchError::SinkWrite {
                path: self.path.clone(),
                source,
            })
    }

    fn sync(&mut self) -> Result<()> {
        self.file.sync_all().map_err(|source| SearchError::SinkWrite {
            path: self.path.clone(),
            source,
        })
    }
}

/// Comma-separated report file plus an optional error file
pub struct CsvReportSink {
    report: LineFile,
    errors: Option<LineFile>,
}

impl CsvReportSink {
    /// Open (create or append) the report file and, when given, the error
    /// file, writing each header line once.
    pub fn open(report_path: &Path, error_path: Option<&Path>) -> Result<Self> {
        let mut report = LineFile::open(report_path)?;
        report.write_line(REPORT_HEADER)?;

        let errors = match error_path {
            Some(path) => {
                let mut errors = LineFile::open(path)?;
                errors.write_line(ERROR_HEADER)?;
                Some(errors)
            }
            None => None,
        };

        debug!(report = %report_path.display(), errors = error_path.is_some(), "Opened report sink");
        Ok(Self { report, errors })
    }

    pub fn report_path(&self) -> &Path {
        &self.report.path
    }

    pub fn error_path(&self) -> Option<&Path> {
        self.errors.as_ref().map(|e| e.path.as_path())
    }

    /// Sync both files to disk.
    pub fn close(mut self) -> Result<()> {
        self.report.sync()?;
        if let Some(errors) = self.errors.as_mut() {
            errors.sync()?;
        }
        Ok(())
    }
}

impl ReportSink for CsvReportSink {
    fn append_match(&mut self, record: &ReportRecord) -> Result<()> {
        self.report.write_line(&record.to_line())
    }

    fn append_error(&mut self, record: &ErrorRecord) -> Result<()> {
        match self.errors.as_mut() {
            Some(errors) => errors.write_line(&record.to_line()),
            None => Ok(()),
        }
    }
}

/// Collects records in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub matches: Vec<ReportRecord>,
    pub errors: Vec<ErrorRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn append_match(&mut self, record: &ReportRecord) -> Result<()> {
        self.matches.push(record.clone());
        Ok(())
    }

    fn append_error(&mut self, record: &ErrorRecord) -> Result<()> {
        self.errors.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::error::AttributeFault;
    use std::fs;
    use tempfile::TempDir;

    fn sample_match() -> ReportRecord {
        ReportRecord {
            point_name: "Tag1".to_string(),
            attribute_name: "A1".to_string(),
            attribute_path: "\\\\AF01\\Plant\\Root|A1".to_string(),
            analysis: None,
            server: "AF01".to_string(),
            database: "Plant".to_string(),
            source_system: "PI01".to_string(),
        }
    }

    fn sample_error() -> ErrorRecord {
        ErrorRecord {
            fault: AttributeFault::Unclassified,
            attribute_name: "A2".to_string(),
            attribute_path: "\\\\AF01\\Plant\\Root|A2".to_string(),
            database: "Plant".to_string(),
        }
    }

    #[test]
    fn writes_header_then_records() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("Output.txt");

        let mut sink = CsvReportSink::open(&out, None).unwrap();
        sink.append_match(&sample_match()).unwrap();
        sink.close().unwrap();

        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], REPORT_HEADER);
        assert_eq!(lines[1], "Tag1, A1, \\\\AF01\\Plant\\Root|A1, NULL, AF01, Plant, PI01");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn records_are_visible_before_close() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("Output.txt");

        let mut sink = CsvReportSink::open(&out, None).unwrap();
        sink.append_match(&sample_match()).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 2);
        drop(sink);
    }

    #[test]
    fn errors_discarded_without_error_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("Output.txt");

        let mut sink = CsvReportSink::open(&out, None).unwrap();
        sink.append_error(&sample_error()).unwrap();
        assert!(sink.error_path().is_none());
        sink.close().unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 1);
    }

    #[test]
    fn error_file_gets_header_and_rows() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("Output.txt");
        let err = temp.path().join("Errors.txt");

        let mut sink = CsvReportSink::open(&out, Some(&err)).unwrap();
        sink.append_error(&sample_error()).unwrap();
        sink.close().unwrap();

        let content = fs::read_to_string(&err).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![ERROR_HEADER, "Unhandled, A2, \\\\AF01\\Plant\\Root|A2, Plant"]);
    }

    #[test]
    fn reopening_appends() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("Output.txt");

        for _ in 0..2 {
            let mut sink = CsvReportSink::open(&out, None).unwrap();
            sink.append_match(&sample_match()).unwrap();
            sink.close().unwrap();
        }

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().filter(|l| *l == REPORT_HEADER).count(), 2);
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn missing_directory_fails_to_open() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("missing").join("Output.txt");

        let err = CsvReportSink::open(&out, None).err().unwrap();
        assert!(matches!(err, SearchError::SinkOpen { .. }));
        assert!(!out.exists());
    }
}
