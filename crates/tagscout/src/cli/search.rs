//! Search command - Report attributes bound to watch-listed data points
//!
//! Setup failures (missing watch list, unknown server or database, an
//! output file that cannot be opened) stop the run before anything is
//! walked. The report header is written as soon as the output file is
//! opened, so a run that fails on database lookup leaves only the header.

use crate::cli::error::HelpfulError;
use crate::cli::output::{print_parameters, print_summary};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tagscout::search::run_search;
use tagscout::{Catalog, CsvReportSink, MatchSet, SearchConfig};
use tracing::{info, warn};

/// Arguments for a search run
#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Asset server name (default server when omitted)
    #[arg(long, env = "TAGSCOUT_SERVER")]
    pub server: Option<String>,

    /// Asset database name (all databases when omitted)
    #[arg(long, env = "TAGSCOUT_DATABASE")]
    pub database: Option<String>,

    /// Watch list file, one data point name per line
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Report file, appended to [default: Output.txt]
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Error file, appended to when --write-errors is set [default: Errors.txt]
    #[arg(long = "errors")]
    pub errors: Option<PathBuf>,

    /// Record attributes that could not be evaluated in the error file
    #[arg(long)]
    pub write_errors: bool,

    /// Report every visited element and bound attribute on the console
    #[arg(long)]
    pub trace: bool,

    /// Asset catalog (JSON)
    #[arg(long, env = "TAGSCOUT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Load parameters from a TOML file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SearchArgs {
    /// Merge flags over the config file (or defaults).
    pub fn resolve_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => SearchConfig::default(),
        };

        if let Some(server) = &self.server {
            config.server = Some(server.clone());
        }
        if let Some(database) = &self.database {
            config.database = Some(database.clone());
        }
        if let Some(input) = &self.input {
            config.watch_list = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(errors) = &self.errors {
            config.error_file = errors.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog = Some(catalog.clone());
        }
        config.write_errors |= self.write_errors;
        config.trace_console |= self.trace;

        Ok(config.normalized())
    }
}

/// Execute a search run
pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    let watch_list = config
        .watch_list
        .clone()
        .ok_or_else(HelpfulError::missing_watch_list)?;
    if !watch_list.exists() {
        return Err(HelpfulError::watch_list_not_found(&watch_list).into());
    }
    let catalog_path = config.catalog.clone().ok_or_else(HelpfulError::missing_catalog)?;

    print_parameters(&config);

    let match_set = MatchSet::from_file(&watch_list).map_err(HelpfulError::from)?;
    if match_set.is_empty() {
        warn!(path = %watch_list.display(), "Watch list is empty, nothing can match");
    }
    info!(entries = match_set.len(), "Loaded watch list");

    let catalog = Catalog::load(&catalog_path).map_err(HelpfulError::from)?;
    let server = catalog
        .server(config.server.as_deref())
        .map_err(HelpfulError::from)?;
    info!(server = %server.name, "Connected to asset server");

    let mut sink = CsvReportSink::open(&config.output_file, config.error_sink_path())
        .map_err(HelpfulError::from)?;

    let stats = run_search(
        server,
        config.database.as_deref(),
        &match_set,
        &mut sink,
        config.options(),
    )
    .map_err(HelpfulError::from)?;

    sink.close().map_err(HelpfulError::from)?;

    info!(
        matches = stats.matches,
        faults = stats.faults(),
        duration_ms = stats.duration_ms,
        "Search complete"
    );
    print_summary(&stats);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tagscout.toml");
        std::fs::write(
            &path,
            "server = \"AF01\"\ndatabase = \"Plant\"\noutput_file = \"from-file.txt\"\n",
        )
        .unwrap();

        let args = SearchArgs {
            database: Some("Other".to_string()),
            write_errors: true,
            config: Some(path),
            ..SearchArgs::default()
        };
        let config = args.resolve_config().unwrap();

        assert_eq!(config.server.as_deref(), Some("AF01"));
        assert_eq!(config.database.as_deref(), Some("Other"));
        assert_eq!(config.output_file, PathBuf::from("from-file.txt"));
        assert!(config.write_errors);
    }

    #[test]
    fn test_blank_database_means_all() {
        let args = SearchArgs {
            database: Some("  ".to_string()),
            ..SearchArgs::default()
        };
        assert!(args.resolve_config().unwrap().database.is_none());
    }

    #[test]
    fn test_missing_watch_list_is_setup_error() {
        let err = run(SearchArgs::default()).unwrap_err();
        assert!(err.to_string().contains("No input tag list file"));
    }

    #[test]
    fn test_nonexistent_watch_list_is_setup_error() {
        let temp = TempDir::new().unwrap();
        let args = SearchArgs {
            input: Some(temp.path().join("missing.txt")),
            ..SearchArgs::default()
        };
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("Error reading input file"));
    }
}
