//! Error types for the search engine
//!
//! [`SearchError`] is the fatal tier: it stops the run. [`AttributeFault`] is
//! the per-node tier: it is recorded against one attribute and the walk
//! continues.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal search error
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Server not found: {0}")]
    ServerNotFound(String),

    #[error("No default server is defined in the catalog")]
    NoDefaultServer,

    #[error("Database '{database}' not found on server '{server}'")]
    DatabaseNotFound { server: String, database: String },

    #[error("Name '{name}' matches more than one {kind}")]
    AmbiguousName { kind: &'static str, name: String },

    #[error("Could not connect to server '{server}': {message}")]
    Communication { server: String, message: String },

    #[error("Asset model error on server '{server}': {source}")]
    Model {
        server: String,
        #[source]
        source: ModelError,
    },

    #[error("Cannot open report file {}: {source}", .path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write report file {}: {source}", .path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read watch list {}: {source}", .path.display())]
    WatchList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SearchError {
    /// Map a failure to enumerate a server's databases onto the fatal tier.
    pub fn from_model(server: &str, err: ModelError) -> Self {
        match err {
            ModelError::Communication(message) => SearchError::Communication {
                server: server.to_string(),
                message,
            },
            other => SearchError::Model {
                server: server.to_string(),
                source: other,
            },
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SearchError>;

/// Failure reported by an asset model implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The attribute is bound to a data point but the binding cannot be parsed.
    #[error("Invalid data point reference '{0}'")]
    InvalidPointReference(String),

    #[error("Communication failure: {0}")]
    Communication(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("{0}")]
    Other(String),
}

/// Why a single attribute could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeFault {
    InvalidReference,
    Unclassified,
}

impl AttributeFault {
    /// Label written to the error file.
    pub fn label(&self) -> &'static str {
        match self {
            AttributeFault::InvalidReference => "PIPointInvalidException",
            AttributeFault::Unclassified => "Unhandled",
        }
    }
}

impl fmt::Display for AttributeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&ModelError> for AttributeFault {
    fn from(err: &ModelError) -> Self {
        match err {
            ModelError::InvalidPointReference(_) => AttributeFault::InvalidReference,
            _ => AttributeFault::Unclassified,
        }
    }
}
