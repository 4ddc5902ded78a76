//! Data point reference parsing
//!
//! A reference has the form `\\<system>\<tag>`. Before parsing, the
//! substitution parameters `%Element%`, `%Attribute%`, `%Database%` and
//! `%Server%` are replaced (case-insensitive) with values from the
//! attribute's position in the hierarchy.

use crate::search::error::ModelError;
use crate::search::model::ModelResult;
use crate::search::types::DataPoint;

/// Hierarchy values available to substitution parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceContext {
    pub server: String,
    pub database: String,
    pub element: String,
    pub attribute: String,
}

/// Substitute parameters in `raw` and parse the result.
///
/// An unknown parameter fails with [`ModelError::Other`]; a reference that
/// does not have exactly a system and a tag fails with
/// [`ModelError::InvalidPointReference`].
pub fn resolve_reference(raw: &str, ctx: &ReferenceContext) -> ModelResult<DataPoint> {
    let expanded = substitute(raw, ctx)?;
    parse_reference(&expanded)
}

fn substitute(raw: &str, ctx: &ReferenceContext) -> ModelResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('%') else {
            // Unpaired '%' is literal text
            out.push_str(&rest[start..]);
            return Ok(out);
        };

        let token = &after[..end];
        let value = match token.to_ascii_lowercase().as_str() {
            "element" => &ctx.element,
            "attribute" => &ctx.attribute,
            "database" => &ctx.database,
            "server" => &ctx.server,
            _ => {
                return Err(ModelError::Other(format!(
                    "Unresolved substitution parameter %{}% in '{}'",
                    token, raw
                )))
            }
        };
        out.push_str(value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn parse_reference(reference: &str) -> ModelResult<DataPoint> {
    let invalid = || ModelError::InvalidPointReference(reference.to_string());

    let body = reference.trim().strip_prefix("\\\\").ok_or_else(invalid)?;
    let mut parts = body.split('\\');
    let system = parts.next().map(str::trim).filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let tag = parts.next().map(str::trim).filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(DataPoint {
        name: tag.to_string(),
        source_system: system.to_string(),
    })
}
