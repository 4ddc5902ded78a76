//! Core data types for the search engine

use super::error::AttributeFault;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Header line of the report file.
pub const REPORT_HEADER: &str =
    "PI Point, Attribute, Attribute Path, Analysis,AF Server, AF Database, PI Server";

/// Header line of the error file.
pub const ERROR_HEADER: &str = "Exception Type, Attribute,Attribute Path, AF Database";

/// Written in place of the analysis name when no analysis writes the attribute.
pub const NULL_ANALYSIS: &str = "NULL";

/// A resolved external data point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPoint {
    /// Data point (tag) name
    pub name: String,
    /// System the data point lives on
    pub source_system: String,
}

/// Server and database identity stamped on every record of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanScope {
    pub server: String,
    pub database: String,
}

impl ScanScope {
    pub fn new(server: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            database: database.into(),
        }
    }
}

/// Switches that change what a walk reports, never what it visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Record per-attribute faults to the error sink
    pub write_errors: bool,
    /// Report every visited element and leaf attribute on the console
    pub trace_console: bool,
}

/// One matched data point with its structural context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    pub point_name: String,
    pub attribute_name: String,
    pub attribute_path: String,
    /// Analysis writing this attribute, if any
    pub analysis: Option<String>,
    pub server: String,
    pub database: String,
    pub source_system: String,
}

impl ReportRecord {
    pub fn analysis_or_null(&self) -> &str {
        self.analysis.as_deref().unwrap_or(NULL_ANALYSIS)
    }

    /// Render as one report file line (without terminator).
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}, {}, {}",
            self.point_name,
            self.attribute_name,
            self.attribute_path,
            self.analysis_or_null(),
            self.server,
            self.database,
            self.source_system
        )
    }
}

/// One attribute that could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub fault: AttributeFault,
    pub attribute_name: String,
    pub attribute_path: String,
    pub database: String,
}

impl ErrorRecord {
    /// Render as one error file line (without terminator).
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.fault.label(),
            self.attribute_name,
            self.attribute_path,
            self.database
        )
    }
}

/// Statistics from a search run
#[derive(Debug, Clone, Serialize)]
pub struct ScanStats {
    /// When the walk started
    pub started_at: DateTime<Utc>,
    /// Number of databases walked
    pub databases: u64,
    /// Number of elements visited
    pub elements: u64,
    /// Number of attributes visited (all levels)
    pub attributes: u64,
    /// Number of attributes bound to a data point
    pub leaf_attributes: u64,
    /// Number of report records emitted
    pub matches: u64,
    /// Attributes with an invalid data point reference
    pub invalid_references: u64,
    /// Attributes that failed for any other reason
    pub unclassified_faults: u64,
    /// Element enumeration failures that were skipped
    pub element_failures: u64,
    /// Databases whose elements could not be listed
    pub databases_skipped: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ScanStats {
    pub fn started_now() -> Self {
        Self {
            started_at: Utc::now(),
            databases: 0,
            elements: 0,
            attributes: 0,
            leaf_attributes: 0,
            matches: 0,
            invalid_references: 0,
            unclassified_faults: 0,
            element_failures: 0,
            databases_skipped: 0,
            duration_ms: 0,
        }
    }

    pub fn faults(&self) -> u64 {
        self.invalid_references + self.unclassified_faults
    }

    pub(crate) fn record_fault(&mut self, fault: AttributeFault) {
        match fault {
            AttributeFault::InvalidReference => self.invalid_references += 1,
            AttributeFault::Unclassified => self.unclassified_faults += 1,
        }
    }
}
