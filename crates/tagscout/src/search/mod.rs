//! Search - Watch-list matching over asset hierarchies
//!
//! The walkers borrow the asset model through [`model`] traits, correlate
//! attributes with the analyses that write them, and stream every match to a
//! [`ReportSink`]. Per-attribute failures are recorded and skipped.

pub mod analysis;
pub mod error;
pub mod match_set;
pub mod model;
pub mod sink;
pub mod types;
pub mod walker;

pub use analysis::AnalysisIndex;
pub use error::{AttributeFault, ModelError, Result, SearchError};
pub use match_set::MatchSet;
pub use model::{Analysis, AssetDatabase, AssetServer, Attribute, Element, ModelResult};
pub use sink::{CsvReportSink, MemorySink, ReportSink};
pub use types::{
    DataPoint, ErrorRecord, ReportRecord, ScanOptions, ScanScope, ScanStats, ERROR_HEADER,
    NULL_ANALYSIS, REPORT_HEADER,
};
pub use walker::{resolve_database, run_search, Walker};
