//! Depth-first watch-list walk
//!
//! Order is fixed: for both elements and attributes every child subtree is
//! visited before the node's own evaluation. The walk is single-threaded and
//! records reach the sink in visit order.
//!
//! Failure handling:
//! - Attribute faults are recorded (when enabled) and skipped.
//! - Element enumeration failures are logged, counted and skipped; the rest
//!   of the element and its siblings are still walked.
//! - Database resolution, server communication and sink I/O failures are
//!   fatal and returned to the caller.

use super::analysis::AnalysisIndex;
use super::error::{AttributeFault, ModelError, Result, SearchError};
use super::match_set::MatchSet;
use super::model::{AssetDatabase, AssetServer, Attribute, Element};
use super::sink::ReportSink;
use super::types::{ErrorRecord, ReportRecord, ScanOptions, ScanScope, ScanStats};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Outcome of evaluating one attribute's own binding: number of records
/// emitted, or the fault that stopped it.
pub type Evaluation = std::result::Result<usize, AttributeFault>;

/// Resolve a database by exact name.
pub fn resolve_database<'s>(
    server: &'s dyn AssetServer,
    name: &str,
) -> Result<&'s dyn AssetDatabase> {
    let databases = server
        .databases()
        .map_err(|err| SearchError::from_model(server.name(), err))?;

    let mut found = databases.into_iter().filter(|db| db.name() == name);
    match (found.next(), found.next()) {
        (Some(db), None) => Ok(db),
        (Some(_), Some(_)) => Err(SearchError::AmbiguousName {
            kind: "database",
            name: name.to_string(),
        }),
        (None, _) => Err(SearchError::DatabaseNotFound {
            server: server.name().to_string(),
            database: name.to_string(),
        }),
    }
}

/// Search one database, or every database on `server` when `database` is
/// `None`.
pub fn run_search<S: ReportSink + ?Sized>(
    server: &dyn AssetServer,
    database: Option<&str>,
    match_set: &MatchSet,
    sink: &mut S,
    options: ScanOptions,
) -> Result<ScanStats> {
    let mut walker = Walker::new(match_set, sink, options);
    walker.scan(server, database)?;
    Ok(walker.finish())
}

/// Walks the asset hierarchy and streams matches to a sink
pub struct Walker<'a, S: ReportSink + ?Sized> {
    match_set: &'a MatchSet,
    sink: &'a mut S,
    options: ScanOptions,
    stats: ScanStats,
}

impl<'a, S: ReportSink + ?Sized> Walker<'a, S> {
    pub fn new(match_set: &'a MatchSet, sink: &'a mut S, options: ScanOptions) -> Self {
        Self {
            match_set,
            sink,
            options,
            stats: ScanStats::started_now(),
        }
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Stop the clock and hand back the statistics.
    pub fn finish(mut self) -> ScanStats {
        let elapsed = Utc::now() - self.stats.started_at;
        self.stats.duration_ms = elapsed.num_milliseconds().max(0) as u64;
        self.stats
    }

    /// Walk one named database, or all databases on the server.
    ///
    /// Resolving the named database happens before anything is emitted; a
    /// failure there is fatal. Once walking starts every database is
    /// visited regardless of failures in earlier ones.
    pub fn scan(&mut self, server: &dyn AssetServer, database: Option<&str>) -> Result<()> {
        match database {
            Some(name) => {
                let db = resolve_database(server, name)?;
                self.scan_database(server.name(), db)
            }
            None => {
                info!(server = %server.name(), "No database specified, searching all databases");
                let databases = server
                    .databases()
                    .map_err(|err| SearchError::from_model(server.name(), err))?;
                for db in databases {
                    self.scan_database(server.name(), db)?;
                }
                Ok(())
            }
        }
    }

    /// Walk every top-level element of `db`.
    pub fn scan_database(&mut self, server: &str, db: &dyn AssetDatabase) -> Result<()> {
        info!(server = %server, database = %db.name(), "Searching database");
        self.stats.databases += 1;
        let scope = ScanScope::new(server, db.name());

        let elements = match db.elements() {
            Ok(elements) => elements,
            Err(err) => {
                warn!(database = %db.name(), error = %err, "Cannot list database elements, skipping database");
                self.stats.databases_skipped += 1;
                return Ok(());
            }
        };

        for element in elements {
            self.visit_element(&scope, element)?;
        }
        Ok(())
    }

    /// Walk `element` and its descendants, children first.
    pub fn visit_element(&mut self, scope: &ScanScope, element: &dyn Element) -> Result<()> {
        self.stats.elements += 1;

        if element.has_children() {
            match element.children() {
                Ok(children) => {
                    for child in children {
                        self.visit_element(scope, child)?;
                    }
                }
                Err(err) => self.element_failed(element, "child elements", &err),
            }
        }

        let index = match AnalysisIndex::build_for(element) {
            Ok(index) => index,
            Err(err) => {
                self.element_failed(element, "analyses", &err);
                AnalysisIndex::default()
            }
        };

        if self.options.trace_console {
            info!(element = %element.name(), path = %element.path(), "Element");
        } else {
            debug!(element = %element.name(), path = %element.path(), "Element");
        }

        let attributes = match element.attributes() {
            Ok(attributes) => attributes,
            Err(err) => {
                self.element_failed(element, "attributes", &err);
                return Ok(());
            }
        };

        for attribute in attributes {
            self.visit_attribute(scope, &index, attribute)?;
        }
        Ok(())
    }

    /// Walk `attribute` and its descendants, children first, then evaluate
    /// its own binding.
    pub fn visit_attribute(
        &mut self,
        scope: &ScanScope,
        index: &AnalysisIndex,
        attribute: &dyn Attribute,
    ) -> Result<()> {
        self.stats.attributes += 1;

        let mut children_fault = None;
        if attribute.has_children() {
            match attribute.children() {
                Ok(children) => {
                    for child in children {
                        self.visit_attribute(scope, index, child)?;
                    }
                }
                Err(err) => children_fault = Some(AttributeFault::from(&err)),
            }
        }

        // One fault per attribute; a binding fault outranks a children fault
        let fault = match self.evaluate(scope, index, attribute)? {
            Err(fault) => Some(fault),
            Ok(_) => children_fault,
        };
        if let Some(fault) = fault {
            self.record_fault(scope, attribute, fault)?;
            debug!(attribute = %attribute.path(), fault = %fault, "Attribute fault");
        }
        Ok(())
    }

    /// Resolve the attribute's data point and emit one record per matching
    /// watch-list entry. Only sink failures escape as `Err`; a binding
    /// fault is returned for the caller to record.
    fn evaluate(
        &mut self,
        scope: &ScanScope,
        index: &AnalysisIndex,
        attribute: &dyn Attribute,
    ) -> Result<Evaluation> {
        let point = match attribute.data_point() {
            Ok(Some(point)) => point,
            Ok(None) => return Ok(Ok(0)),
            Err(err) => return Ok(Err(AttributeFault::from(&err))),
        };

        self.stats.leaf_attributes += 1;
        if self.options.trace_console {
            info!(attribute = %attribute.name(), point = %point.name, "Data point attribute");
        } else {
            debug!(attribute = %attribute.name(), point = %point.name, "Data point attribute");
        }

        let hits = self.match_set.matches(&point.name);
        if hits == 0 {
            return Ok(Ok(0));
        }

        let record = ReportRecord {
            point_name: point.name,
            attribute_name: attribute.name().to_string(),
            attribute_path: attribute.path().to_string(),
            analysis: index.lookup(attribute).map(str::to_string),
            server: scope.server.clone(),
            database: scope.database.clone(),
            source_system: point.source_system,
        };
        for _ in 0..hits {
            self.sink.append_match(&record)?;
        }
        self.stats.matches += hits as u64;
        Ok(Ok(hits))
    }

    fn record_fault(
        &mut self,
        scope: &ScanScope,
        attribute: &dyn Attribute,
        fault: AttributeFault,
    ) -> Result<()> {
        self.stats.record_fault(fault);

        if self.options.write_errors {
            self.sink.append_error(&ErrorRecord {
                fault,
                attribute_name: attribute.name().to_string(),
                attribute_path: attribute.path().to_string(),
                database: scope.database.clone(),
            })?;
        }
        Ok(())
    }

    fn element_failed(&mut self, element: &dyn Element, what: &str, err: &ModelError) {
        warn!(element = %element.path(), error = %err, "Cannot list {}, skipping", what);
        self.stats.element_failures += 1;
    }
}
