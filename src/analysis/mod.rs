//! Analysis modules.
//!
//! Grouping of trial records by ratio and reduction to summary statistics.

pub mod aggregator;

pub use aggregator::*;
