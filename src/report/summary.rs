//! Console summary formatting.
//!
//! Plain-text range lines printed after aggregation, and a per-ratio
//! table for verbose runs. Neither is a machine-readable contract.

use crate::models::{RatioSeries, RatioSummary, ValueRange};

/// Min/max of each of the three aligned sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRanges {
    pub ratio: ValueRange,
    pub mean_duration: ValueRange,
    pub satisfiable_fraction: ValueRange,
}

impl SeriesRanges {
    /// Ranges of a series; `None` when it holds no points.
    pub fn from_series(series: &RatioSeries) -> Option<Self> {
        Some(Self {
            ratio: ValueRange::of(series.ratios())?,
            mean_duration: ValueRange::of(series.mean_durations())?,
            satisfiable_fraction: ValueRange::of(series.satisfiable_fractions())?,
        })
    }
}

/// Generate the range summary lines.
pub fn generate_range_summary(ranges: &SeriesRanges) -> String {
    let lines = [
        format!(
            "Ratio range: {:.2} to {:.2}",
            ranges.ratio.min, ranges.ratio.max
        ),
        format!(
            "Duration range: {:.2} to {:.2} ms",
            ranges.mean_duration.min, ranges.mean_duration.max
        ),
        format!(
            "SAT prob range: {:.2} to {:.2}",
            ranges.satisfiable_fraction.min, ranges.satisfiable_fraction.max
        ),
    ];

    lines.join("\n")
}

/// Generate a table with one row per ratio group.
pub fn generate_ratio_table(summaries: &[RatioSummary]) -> String {
    let mut table = String::new();

    table.push_str("| L/N | ratio | trials | sat | mean duration (ms) | P(sat) |\n");
    table.push_str("|-----|-------|--------|-----|--------------------|--------|\n");

    for s in summaries {
        table.push_str(&format!(
            "| {} | {:.4} | {} | {} | {:.3} | {:.3} |\n",
            s.ratio,
            s.ratio.as_f64(),
            s.trials,
            s.satisfiable,
            s.mean_duration_ms,
            s.satisfiable_fraction
        ));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ratio;

    fn create_test_summaries() -> Vec<RatioSummary> {
        vec![
            RatioSummary {
                ratio: Ratio::new(1, 1).unwrap(),
                mean_duration_ms: 20.0,
                satisfiable_fraction: 1.0,
                trials: 1,
                satisfiable: 1,
            },
            RatioSummary {
                ratio: Ratio::new(10, 5).unwrap(),
                mean_duration_ms: 10.0,
                satisfiable_fraction: 0.5,
                trials: 2,
                satisfiable: 1,
            },
        ]
    }

    #[test]
    fn test_series_ranges() {
        let series = RatioSeries::from_summaries(&create_test_summaries());
        let ranges = SeriesRanges::from_series(&series).unwrap();

        assert_eq!(ranges.ratio, ValueRange { min: 1.0, max: 2.0 });
        assert_eq!(ranges.mean_duration, ValueRange { min: 10.0, max: 20.0 });
        assert_eq!(
            ranges.satisfiable_fraction,
            ValueRange { min: 0.5, max: 1.0 }
        );
    }

    #[test]
    fn test_series_ranges_empty() {
        assert!(SeriesRanges::from_series(&RatioSeries::default()).is_none());
    }

    #[test]
    fn test_generate_range_summary() {
        let series = RatioSeries::from_summaries(&create_test_summaries());
        let text = generate_range_summary(&SeriesRanges::from_series(&series).unwrap());

        assert!(text.contains("Ratio range: 1.00 to 2.00"));
        assert!(text.contains("Duration range: 10.00 to 20.00 ms"));
        assert!(text.contains("SAT prob range: 0.50 to 1.00"));
    }

    #[test]
    fn test_generate_ratio_table() {
        let table = generate_ratio_table(&create_test_summaries());

        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("| 2/1 | 2.0000 | 2 | 1 | 10.000 | 0.500 |"));
        assert!(table.contains("| 1/1 | 1.0000 | 1 | 1 | 20.000 | 1.000 |"));
    }
}
