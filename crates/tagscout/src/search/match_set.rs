//! Case-insensitive watch-list lookup
//!
//! Built once from the watch list and read-only for the rest of the run.
//! Duplicate and differently-cased entries are kept: each one counts as a
//! separate match, so a data point listed twice is reported twice.

use super::error::{Result, SearchError};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Fold a name for case-insensitive ordinal comparison.
///
/// Folding is one char to one char: a char whose uppercase form expands
/// (`ß` -> `SS`) is kept as is.
pub(crate) fn fold_case(value: &str) -> String {
    value.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Immutable set of watch-list tags
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    entries: Vec<String>,
    /// Folded tag -> number of watch-list entries folding to it
    counts: HashMap<String, usize>,
}

impl MatchSet {
    /// Build a match set from watch-list entries.
    pub fn build<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = tags.into_iter().map(Into::into).collect();
        let mut counts = HashMap::with_capacity(entries.len());
        for entry in &entries {
            *counts.entry(fold_case(entry)).or_insert(0) += 1;
        }
        Self { entries, counts }
    }

    /// Load a watch list file: one tag per line, blank lines ignored.
    ///
    /// Invalid UTF-8 is decoded lossily; a bad byte only affects the entry
    /// it appears in.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| SearchError::WatchList {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if matches!(content, Cow::Owned(_)) {
            warn!(path = %path.display(), "Watch list is not valid UTF-8, invalid bytes replaced");
        }
        Ok(Self::from_lines(&content))
    }

    /// Parse watch-list text. `\r\n` and `\n` line endings are both
    /// accepted and a leading byte-order mark is dropped.
    pub fn from_lines(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self::build(content.lines().filter(|line| !line.trim().is_empty()))
    }

    /// Whether any entry equals `candidate`, ignoring case.
    pub fn contains(&self, candidate: &str) -> bool {
        self.matches(candidate) > 0
    }

    /// Number of watch-list entries equal to `candidate`, ignoring case.
    pub fn matches(&self, candidate: &str) -> usize {
        self.counts.get(&fold_case(candidate)).copied().unwrap_or(0)
    }

    /// Number of watch-list entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
