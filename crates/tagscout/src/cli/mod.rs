//! CLI module for tagscout
//!
//! The binary has a single command: search the asset hierarchy for
//! attributes bound to watch-listed data points.

pub mod error;
pub mod legacy;
pub mod output;
pub mod search;
