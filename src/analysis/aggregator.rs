//! Ratio grouping and per-group statistics.
//!
//! Trials are partitioned by their exact clause-to-variable ratio and each
//! partition is reduced to a mean duration and a satisfiable fraction.

use crate::error::{Result, VizError};
use crate::models::{Ratio, RatioSummary, TrialRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Trials keyed by their shared ratio, ascending. No group is ever empty.
pub type RatioGroups = BTreeMap<Ratio, Vec<TrialRecord>>;

/// Group trials by exact `l/n` ratio.
///
/// Every record is checked before any grouping happens; the first invalid
/// record aborts the whole call.
pub fn group_by_ratio(records: &[TrialRecord]) -> Result<RatioGroups> {
    for record in records {
        if let Some(reason) = record.invalid_reason() {
            return Err(VizError::InvalidRecord {
                record: *record,
                reason,
            });
        }
    }

    let mut grouped = RatioGroups::new();

    for record in records {
        let ratio = record.ratio().ok_or(VizError::InvalidRecord {
            record: *record,
            reason: "variable count is zero",
        })?;
        grouped.entry(ratio).or_default().push(*record);
    }

    debug!(
        "Grouped {} records into {} ratios",
        records.len(),
        grouped.len()
    );

    Ok(grouped)
}

/// Reduce each group to its summary statistics, in ascending ratio order.
pub fn summarize_groups(groups: RatioGroups) -> Vec<RatioSummary> {
    groups
        .into_iter()
        .map(|(ratio, trials)| summarize_group(ratio, &trials))
        .collect()
}

fn summarize_group(ratio: Ratio, trials: &[TrialRecord]) -> RatioSummary {
    let count = trials.len();
    let total_duration: f64 = trials.iter().map(|t| t.duration_ms).sum();
    let satisfiable = trials.iter().filter(|t| t.satisfiable).count();

    RatioSummary {
        ratio,
        mean_duration_ms: total_duration / count as f64,
        satisfiable_fraction: satisfiable as f64 / count as f64,
        trials: count,
        satisfiable,
    }
}

/// Validate, group and reduce in one step.
pub fn aggregate(records: &[TrialRecord]) -> Result<Vec<RatioSummary>> {
    if records.is_empty() {
        return Err(VizError::EmptyDataset);
    }

    let groups = group_by_ratio(records)?;
    Ok(summarize_groups(groups))
}
