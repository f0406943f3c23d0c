//! Data models for benchmark aggregation.
//!
//! This module contains the trial record read from the solver output,
//! the exact ratio key used for grouping, and the per-ratio summaries
//! handed to the chart renderer.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One solver run: problem size, outcome and timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Number of variables (`n`).
    #[serde(rename = "n")]
    pub variable_count: u64,
    /// Number of clauses (`l`).
    #[serde(rename = "l")]
    pub clause_count: u64,
    /// Whether the formula was satisfiable.
    #[serde(rename = "sat")]
    pub satisfiable: bool,
    /// Solve time in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: f64,
}

#[cfg(test)]
impl TrialRecord {
    pub fn new(variable_count: u64, clause_count: u64, satisfiable: bool, duration_ms: f64) -> Self {
        Self {
            variable_count,
            clause_count,
            satisfiable,
            duration_ms,
        }
    }
}

impl TrialRecord {
    /// Returns the reason this record is unusable, if any.
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.variable_count == 0 {
            Some("variable count is zero")
        } else if !self.duration_ms.is_finite() {
            Some("duration is not a finite number")
        } else if self.duration_ms < 0.0 {
            Some("duration is negative")
        } else {
            None
        }
    }

    /// The clause-to-variable ratio, or `None` when `n` is zero.
    pub fn ratio(&self) -> Option<Ratio> {
        Ratio::new(self.clause_count, self.variable_count)
    }
}

impl fmt::Display for TrialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{n={}, l={}, sat={}, duration={}ms}}",
            self.variable_count, self.clause_count, self.satisfiable, self.duration_ms
        )
    }
}

/// Exact clause-to-variable ratio in lowest terms.
///
/// Two trials land in the same group exactly when their `l/n` fractions are
/// equal as rationals, so `10/5` and `4/2` share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: u64,
    denom: u64,
}

impl Ratio {
    /// Build a reduced ratio; `None` when the denominator is zero.
    pub fn new(numer: u64, denom: u64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let g = gcd(numer, denom);
        Some(Self {
            numer: numer / g,
            denom: denom / g,
        })
    }

    pub fn as_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numer as u128 * other.denom as u128;
        let rhs = other.numer as u128 * self.denom as u128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Statistics for all trials sharing one ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSummary {
    /// The shared ratio.
    pub ratio: Ratio,
    /// Arithmetic mean of the group's durations.
    pub mean_duration_ms: f64,
    /// Satisfiable trials divided by all trials, in `[0, 1]`.
    pub satisfiable_fraction: f64,
    /// Number of trials in the group.
    pub trials: usize,
    /// Number of satisfiable trials in the group.
    pub satisfiable: usize,
}

/// Index-aligned sequences handed to the renderer.
///
/// Position `i` of every sequence describes the same ratio group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioSeries {
    ratios: Vec<f64>,
    mean_durations: Vec<f64>,
    satisfiable_fractions: Vec<f64>,
}

impl RatioSeries {
    /// Split summaries into three aligned sequences, keeping their order.
    pub fn from_summaries(summaries: &[RatioSummary]) -> Self {
        let mut series = Self {
            ratios: Vec::with_capacity(summaries.len()),
            mean_durations: Vec::with_capacity(summaries.len()),
            satisfiable_fractions: Vec::with_capacity(summaries.len()),
        };

        for summary in summaries {
            series.ratios.push(summary.ratio.as_f64());
            series.mean_durations.push(summary.mean_duration_ms);
            series.satisfiable_fractions.push(summary.satisfiable_fraction);
        }

        series
    }

    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    pub fn mean_durations(&self) -> &[f64] {
        &self.mean_durations
    }

    pub fn satisfiable_fractions(&self) -> &[f64] {
        &self.satisfiable_fractions
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// (ratio, mean duration) points.
    pub fn duration_points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.ratios, &self.mean_durations)
    }

    /// (ratio, satisfiable fraction) points.
    pub fn fraction_points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.ratios, &self.satisfiable_fractions)
    }
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

/// Inclusive min/max of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range of the values, or `None` for an empty slice.
    pub fn of(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let init = Self {
            min: *first,
            max: *first,
        };
        Some(rest.iter().fold(init, |acc, &v| Self {
            min: acc.min.min(v),
            max: acc.max.max(v),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(numer: u64, denom: u64, mean: f64, fraction: f64) -> RatioSummary {
        RatioSummary {
            ratio: Ratio::new(numer, denom).unwrap(),
            mean_duration_ms: mean,
            satisfiable_fraction: fraction,
            trials: 2,
            satisfiable: 1,
        }
    }

    #[test]
    fn test_ratio_reduces_to_lowest_terms() {
        let r = Ratio::new(10, 5).unwrap();
        assert_eq!(r.numer, 2);
        assert_eq!(r.denom, 1);
        assert_eq!(r, Ratio::new(4, 2).unwrap());
        assert_eq!(Ratio::new(426, 100).unwrap(), Ratio::new(213, 50).unwrap());
    }

    #[test]
    fn test_ratio_zero_numerator() {
        let r = Ratio::new(0, 7).unwrap();
        assert_eq!(r, Ratio::new(0, 3).unwrap());
        assert_eq!(r.as_f64(), 0.0);
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert!(Ratio::new(10, 0).is_none());
    }

    #[test]
    fn test_ratio_ordering() {
        let third = Ratio::new(1, 3).unwrap();
        let half = Ratio::new(1, 2).unwrap();
        let two = Ratio::new(10, 5).unwrap();
        assert!(third < half);
        assert!(half < two);
        assert_eq!(two.cmp(&Ratio::new(2, 1).unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_record_deserialize_ignores_extra_keys() {
        let record: TrialRecord =
            serde_json::from_str(r#"{"n":5,"l":21,"k":3,"sat":false,"duration":3.5}"#).unwrap();
        assert_eq!(record, TrialRecord::new(5, 21, false, 3.5));
    }

    #[test]
    fn test_record_invalid_reason() {
        assert!(TrialRecord::new(5, 10, true, 1.0).invalid_reason().is_none());
        assert!(TrialRecord::new(0, 10, true, 1.0).invalid_reason().is_some());
        assert!(TrialRecord::new(5, 10, true, -1.0).invalid_reason().is_some());
        assert!(TrialRecord::new(5, 10, true, f64::NAN).invalid_reason().is_some());
    }

    #[test]
    fn test_series_alignment() {
        let summaries = vec![summary(1, 1, 20.0, 1.0), summary(2, 1, 10.0, 0.5)];
        let series = RatioSeries::from_summaries(&summaries);

        assert_eq!(series.len(), 2);
        assert_eq!(series.ratios(), &[1.0, 2.0]);
        assert_eq!(series.mean_durations(), &[20.0, 10.0]);
        assert_eq!(series.satisfiable_fractions(), &[1.0, 0.5]);
        assert_eq!(series.duration_points(), vec![(1.0, 20.0), (2.0, 10.0)]);
        assert_eq!(series.fraction_points(), vec![(1.0, 1.0), (2.0, 0.5)]);
    }

    #[test]
    fn test_value_range() {
        assert_eq!(ValueRange::of(&[]), None);
        let range = ValueRange::of(&[3.0, -1.0, 7.5]).unwrap();
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 7.5);
    }
}
