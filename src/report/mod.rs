//! Output generation.
//!
//! Console summaries and chart images built from aggregated ratio series.

pub mod chart;
pub mod summary;

pub use chart::{ChartOptions, ChartRenderer};
pub use summary::{generate_range_summary, generate_ratio_table, SeriesRanges};
