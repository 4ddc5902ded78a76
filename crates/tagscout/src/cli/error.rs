//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::io;
use std::path::Path;
use tagscout::search::SearchError;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// No watch list was given
    pub fn missing_watch_list() -> Self {
        Self::new("No input tag list file has been specified")
            .with_context("A watch list file is required: one data point name per line")
            .with_suggestions([
                "TRY: tagscout --input tags.txt --catalog catalog.json",
                "TRY: Legacy form: tagscout /IF tags.txt",
            ])
    }

    /// No catalog was given
    pub fn missing_catalog() -> Self {
        Self::new("No asset catalog has been specified")
            .with_context("The asset hierarchy is read from a JSON catalog export")
            .with_suggestions([
                "TRY: Pass --catalog <FILE>",
                "TRY: Set TAGSCOUT_CATALOG in the environment",
            ])
    }

    /// Watch list file does not exist
    pub fn watch_list_not_found(path: &Path) -> Self {
        Self::new(format!("Error reading input file: {}", path.display()))
            .with_context("The watch list file does not exist")
            .with_suggestions([
                format!("TRY: Verify the file \"{}\" exists", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Watch list exists but cannot be read
    pub fn watch_list_unreadable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Error reading input file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check the permissions of \"{}\"", path.display()),
                "TRY: Make sure the path is a file, not a directory".to_string(),
            ])
    }

    /// Report or error file cannot be opened
    pub fn output_not_writable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Output file path does not exist: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!(
                    "TRY: Create the directory first: mkdir -p {}",
                    path.parent().map(|p| p.display().to_string()).unwrap_or_else(|| ".".to_string())
                ),
                "TRY: Choose another location with --output / --errors".to_string(),
            ])
    }

    /// Named database missing from the server
    pub fn database_not_found(server: &str, database: &str) -> Self {
        Self::new(format!("Database \"{}\" not found on server \"{}\"", database, server))
            .with_context("Database names are matched exactly, including case")
            .with_suggestions([
                format!("TRY: Verify the AF Database \"{}\" is correct", database),
                "TRY: Omit --database to search every database on the server".to_string(),
            ])
    }

    /// Named server missing from the catalog
    pub fn server_not_found(server: &str) -> Self {
        Self::new(format!("Server \"{}\" not found", server))
            .with_context("Server names are matched exactly against the catalog")
            .with_suggestions([
                format!("TRY: Verify the name of the AF Server \"{}\" is correct", server),
                "TRY: Omit --server to use the default server".to_string(),
            ])
    }

    /// Server could not be reached
    pub fn server_unreachable(server: &str, reason: &str) -> Self {
        Self::new(format!("Could not connect to server \"{}\"", server))
            .with_context(reason.to_string())
            .with_suggestions(["TRY: Check that the server is online and try again"])
    }
}

impl From<SearchError> for HelpfulError {
    fn from(err: SearchError) -> Self {
        match &err {
            SearchError::ServerNotFound(server) => HelpfulError::server_not_found(server),
            SearchError::DatabaseNotFound { server, database } => {
                HelpfulError::database_not_found(server, database)
            }
            SearchError::Communication { server, message } => {
                HelpfulError::server_unreachable(server, message)
            }
            SearchError::SinkOpen { path, source } => {
                HelpfulError::output_not_writable(path, &source.to_string())
            }
            SearchError::WatchList { path, source } if source.kind() == io::ErrorKind::NotFound => {
                HelpfulError::watch_list_not_found(path)
            }
            SearchError::WatchList { path, source } => {
                HelpfulError::watch_list_unreadable(path, &source.to_string())
            }
            _ => HelpfulError::new(err.to_string()),
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While walking elements")
            .with_suggestions(["Try again"]);

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While walking elements"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_database_not_found_from_search_error() {
        let err: HelpfulError = SearchError::DatabaseNotFound {
            server: "AF01".to_string(),
            database: "Nope".to_string(),
        }
        .into();

        let display = format!("{}", err);
        assert!(display.contains("\"Nope\""));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_missing_watch_list_says_missing() {
        let err: HelpfulError = SearchError::WatchList {
            path: "tags.txt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        }
        .into();

        assert_eq!(err.context.as_deref(), Some("The watch list file does not exist"));
    }

    #[test]
    fn test_unreadable_watch_list_keeps_cause() {
        let err: HelpfulError = SearchError::WatchList {
            path: "tags.txt".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }
        .into();

        let display = format!("{}", err);
        assert!(display.contains("permission denied"));
        assert!(!display.contains("does not exist"));
    }

    #[test]
    fn test_unmapped_errors_keep_message() {
        let err: HelpfulError = SearchError::Catalog("bad json".to_string()).into();
        assert!(err.message.contains("bad json"));
        assert!(err.suggestions.is_empty());
    }
}
