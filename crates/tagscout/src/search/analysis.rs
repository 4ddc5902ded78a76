//! Per-element analysis correlation
//!
//! Maps each attribute an element's analyses write to the analysis name.
//! Built once per element so the element's whole attribute tree shares one
//! lookup; never merged across elements.

use super::match_set::fold_case;
use super::model::{Attribute, Element, ModelResult};
use std::collections::HashMap;

/// Attribute path -> analysis name, scoped to one element
#[derive(Debug, Default)]
pub struct AnalysisIndex {
    /// Folded attribute path -> analysis name
    outputs: HashMap<String, String>,
}

impl AnalysisIndex {
    /// Index the outputs of every analysis defined on `element`.
    ///
    /// When two analyses declare the same output the first one wins.
    pub fn build_for(element: &dyn Element) -> ModelResult<Self> {
        let mut outputs = HashMap::new();
        for analysis in element.analyses()? {
            for path in analysis.output_paths()? {
                outputs
                    .entry(fold_case(&path))
                    .or_insert_with(|| analysis.name().to_string());
            }
        }
        Ok(Self { outputs })
    }

    /// Analysis writing `attribute`, if any.
    pub fn lookup(&self, attribute: &dyn Attribute) -> Option<&str> {
        self.lookup_path(attribute.path())
    }

    pub fn lookup_path(&self, path: &str) -> Option<&str> {
        self.outputs.get(&fold_case(path)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}
