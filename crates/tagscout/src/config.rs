//! Configuration for a search run

use crate::search::{Result, ScanOptions, SearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Effective search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Asset server name; the catalog's default server when unset
    pub server: Option<String>,

    /// Asset database name; every database on the server when unset
    pub database: Option<String>,

    /// Path to the asset catalog (JSON)
    pub catalog: Option<PathBuf>,

    /// Path to the watch list, one tag per line
    pub watch_list: Option<PathBuf>,

    /// Report file, appended to
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Error file, appended to when `write_errors` is set
    #[serde(default = "default_error_file")]
    pub error_file: PathBuf,

    pub write_errors: bool,

    pub trace_console: bool,
}

fn default_output_file() -> PathBuf {
    PathBuf::from("Output.txt")
}

fn default_error_file() -> PathBuf {
    PathBuf::from("Errors.txt")
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            server: None,
            database: None,
            catalog: None,
            watch_list: None,
            output_file: default_output_file(),
            error_file: default_error_file(),
            write_errors: false,
            trace_console: false,
        }
    }
}

impl SearchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SearchConfig =
            toml::from_str(&content).map_err(|e| SearchError::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SearchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Blank server and database names mean "not specified".
    pub fn normalized(mut self) -> Self {
        self.server = self.server.filter(|s| !s.trim().is_empty());
        self.database = self.database.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            write_errors: self.write_errors,
            trace_console: self.trace_console,
        }
    }

    /// Error file to open, if error reporting is enabled.
    pub fn error_sink_path(&self) -> Option<&Path> {
        self.write_errors.then_some(self.error_file.as_path())
    }
}
