//! Serializable catalog nodes and their asset model implementations

use super::reference::{resolve_reference, ReferenceContext};
use crate::search::error::ModelError;
use crate::search::model::{
    Analysis, AssetDatabase, AssetServer, Attribute, Element, ModelResult,
};
use crate::search::types::DataPoint;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// An asset server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogServer {
    pub name: String,

    /// Unreachable servers fail every database enumeration
    #[serde(default)]
    pub offline: bool,

    #[serde(default)]
    pub databases: Vec<CatalogDatabase>,
}

/// An asset database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDatabase {
    pub name: String,

    #[serde(default)]
    pub elements: Vec<CatalogElement>,
}

/// An element with its children, attributes and analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogElement {
    pub name: String,

    /// Elements the caller may not read fail every enumeration
    #[serde(default = "default_true")]
    pub readable: bool,

    #[serde(default)]
    pub children: Vec<CatalogElement>,

    #[serde(default)]
    pub attributes: Vec<CatalogAttribute>,

    #[serde(default)]
    pub analyses: Vec<CatalogAnalysis>,

    #[serde(skip)]
    pub(crate) path: String,
}

/// An attribute, optionally bound to a data point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogAttribute {
    pub name: String,

    /// Data point reference, `\\<system>\<tag>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<String>,

    #[serde(default)]
    pub children: Vec<CatalogAttribute>,

    #[serde(skip)]
    pub(crate) path: String,

    #[serde(skip)]
    pub(crate) context: ReferenceContext,
}

/// An analysis and the attributes it writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogAnalysis {
    pub name: String,

    /// Output attribute paths relative to the owning element (`A1`, `A1|Sub`)
    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(skip)]
    pub(crate) output_paths: Vec<String>,
}

impl CatalogDatabase {
    /// Fill in derived paths for the whole database.
    pub(crate) fn link(&mut self, server: &str) {
        let root = format!("\\\\{}\\{}", server, self.name);
        for element in &mut self.elements {
            element.link(&root, server, &self.name);
        }
    }
}

impl CatalogElement {
    fn link(&mut self, parent_path: &str, server: &str, database: &str) {
        self.path = format!("{}\\{}", parent_path, self.name);

        for child in &mut self.children {
            child.link(&self.path, server, database);
        }

        let ctx = ReferenceContext {
            server: server.to_string(),
            database: database.to_string(),
            element: self.name.clone(),
            attribute: String::new(),
        };
        for attribute in &mut self.attributes {
            attribute.link(&self.path, &ctx);
        }

        for analysis in &mut self.analyses {
            analysis.output_paths = analysis
                .outputs
                .iter()
                .map(|rel| format!("{}|{}", self.path, rel.trim_start_matches('|')))
                .collect();
        }
    }

    fn ensure_readable(&self) -> ModelResult<()> {
        if self.readable {
            Ok(())
        } else {
            Err(ModelError::AccessDenied(self.path.clone()))
        }
    }
}

impl CatalogAttribute {
    fn link(&mut self, parent_path: &str, element_ctx: &ReferenceContext) {
        self.path = format!("{}|{}", parent_path, self.name);
        self.context = ReferenceContext {
            attribute: self.name.clone(),
            ..element_ctx.clone()
        };
        for child in &mut self.children {
            child.link(&self.path, element_ctx);
        }
    }
}

impl AssetServer for CatalogServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn databases(&self) -> ModelResult<Vec<&dyn AssetDatabase>> {
        if self.offline {
            return Err(ModelError::Communication(format!(
                "server '{}' is not reachable",
                self.name
            )));
        }
        Ok(self.databases.iter().map(|db| db as &dyn AssetDatabase).collect())
    }
}

impl AssetDatabase for CatalogDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn elements(&self) -> ModelResult<Vec<&dyn Element>> {
        Ok(self.elements.iter().map(|e| e as &dyn Element).collect())
    }
}

impl Element for CatalogElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn children(&self) -> ModelResult<Vec<&dyn Element>> {
        self.ensure_readable()?;
        Ok(self.children.iter().map(|e| e as &dyn Element).collect())
    }

    fn attributes(&self) -> ModelResult<Vec<&dyn Attribute>> {
        self.ensure_readable()?;
        Ok(self.attributes.iter().map(|a| a as &dyn Attribute).collect())
    }

    fn analyses(&self) -> ModelResult<Vec<&dyn Analysis>> {
        self.ensure_readable()?;
        Ok(self.analyses.iter().map(|a| a as &dyn Analysis).collect())
    }
}

impl Attribute for CatalogAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn children(&self) -> ModelResult<Vec<&dyn Attribute>> {
        Ok(self.children.iter().map(|a| a as &dyn Attribute).collect())
    }

    fn data_point(&self) -> ModelResult<Option<DataPoint>> {
        self.point
            .as_deref()
            .map(|raw| resolve_reference(raw, &self.context))
            .transpose()
    }
}

impl Analysis for CatalogAnalysis {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_paths(&self) -> ModelResult<Vec<String>> {
        Ok(self.output_paths.clone())
    }
}
