//! Asset model capabilities consumed by the walkers
//!
//! The walkers never own nodes: every method hands out references borrowed
//! from the implementation for the duration of a visit. Enumeration methods
//! return `ModelResult` because a real asset server can fail on any call.

use super::error::ModelError;
use super::types::DataPoint;

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// A server hosting one or more asset databases.
pub trait AssetServer {
    fn name(&self) -> &str;

    /// All databases on the server, in server order.
    fn databases(&self) -> ModelResult<Vec<&dyn AssetDatabase>>;
}

/// One asset database.
pub trait AssetDatabase {
    fn name(&self) -> &str;

    /// Top-level elements of the database.
    fn elements(&self) -> ModelResult<Vec<&dyn Element>>;
}

/// A node in the element hierarchy.
pub trait Element {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
    fn has_children(&self) -> bool;
    fn children(&self) -> ModelResult<Vec<&dyn Element>>;
    /// Top-level attributes of this element.
    fn attributes(&self) -> ModelResult<Vec<&dyn Attribute>>;
    /// Analyses defined on this element only (not inherited).
    fn analyses(&self) -> ModelResult<Vec<&dyn Analysis>>;
}

/// A node in an element's attribute hierarchy.
pub trait Attribute {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
    fn has_children(&self) -> bool;
    fn children(&self) -> ModelResult<Vec<&dyn Attribute>>;

    /// Resolve the bound data point.
    ///
    /// `Ok(None)` means the attribute has no data point binding at all.
    /// A binding that exists but cannot be parsed fails with
    /// [`ModelError::InvalidPointReference`].
    fn data_point(&self) -> ModelResult<Option<DataPoint>>;
}

/// A computation defined on an element that writes into attributes.
pub trait Analysis {
    fn name(&self) -> &str;

    /// Full paths of the attributes this analysis writes.
    fn output_paths(&self) -> ModelResult<Vec<String>>;
}
