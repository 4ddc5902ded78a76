//! tagscout - Watch-list search over asset hierarchies
//!
//! Walks every element and attribute of an asset database, resolves the data
//! points that leaf attributes are bound to, and reports each binding whose
//! data point appears in a watch list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Database   │     │   Element   │     │  Attribute  │     │   Report    │
//! │   walker    │────▶│   walker    │────▶│   walker    │────▶│    sink     │
//! │             │     │ (+analysis) │     │ (+matchset) │     │  (CSV file) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The asset model is consumed through the traits in [`search::model`]; the
//! [`catalog`] module provides a JSON-backed implementation.

pub mod catalog;
pub mod config;
pub mod search;

pub use catalog::Catalog;
pub use config::SearchConfig;
pub use search::{
    AnalysisIndex, AttributeFault, CsvReportSink, ErrorRecord, MatchSet, MemorySink,
    ReportRecord, ReportSink, ScanOptions, ScanStats, SearchError, Walker,
};
