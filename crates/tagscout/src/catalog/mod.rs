//! Catalog - File-backed asset model
//!
//! A catalog is a JSON export of one or more asset servers. Loading it
//! computes every element and attribute path; after that the catalog is
//! read-only and is walked through the [`crate::search::model`] traits.

pub mod model;
pub mod reference;

pub use model::{CatalogAnalysis, CatalogAttribute, CatalogDatabase, CatalogElement, CatalogServer};
pub use reference::{resolve_reference, ReferenceContext};

use crate::search::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root of a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Server used when none is named; the first server when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server: Option<String>,

    #[serde(default)]
    pub servers: Vec<CatalogServer>,
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Catalog(format!("cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&content)
            .map_err(|e| SearchError::Catalog(format!("{}: {}", path.display(), e)))?;
        info!(
            path = %path.display(),
            servers = catalog.servers.len(),
            "Loaded asset catalog"
        );
        Ok(catalog)
    }

    /// Parse catalog JSON and compute derived paths.
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let mut catalog: Catalog = serde_json::from_str(content)?;
        catalog.link();
        Ok(catalog)
    }

    fn link(&mut self) {
        for server in &mut self.servers {
            let name = server.name.clone();
            for db in &mut server.databases {
                db.link(&name);
            }
        }
    }

    /// Resolve a server by exact name, or the default server when `name` is
    /// `None`.
    pub fn server(&self, name: Option<&str>) -> Result<&CatalogServer> {
        match name {
            Some(name) => {
                let mut found = self.servers.iter().filter(|s| s.name == name);
                match (found.next(), found.next()) {
                    (Some(server), None) => Ok(server),
                    (Some(_), Some(_)) => Err(SearchError::AmbiguousName {
                        kind: "server",
                        name: name.to_string(),
                    }),
                    (None, _) => Err(SearchError::ServerNotFound(name.to_string())),
                }
            }
            None => match self.default_server.as_deref() {
                Some(default) => self
                    .servers
                    .iter()
                    .find(|s| s.name == default)
                    .ok_or_else(|| SearchError::ServerNotFound(default.to_string())),
                None => self.servers.first().ok_or(SearchError::NoDefaultServer),
            },
        }
    }
}
