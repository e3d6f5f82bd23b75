//! Threshold sweep over per-group cell counts.
//!
//! Every distinct count becomes a candidate threshold. For each one the sweep
//! reports how many groups have at least that many cells and how many cells
//! those groups hold together. Rows come out in descending threshold order,
//! so both aggregates only grow from one row to the next.

use thiserror::Error;

use crate::model::records::{CountRecord, ThresholdRow};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepError {
    #[error("invalid input: group '{group_id}' has negative count {count}")]
    InvalidInput { group_id: String, count: i64 },
    #[error("invalid input: cell total at threshold {threshold} exceeds {}", u64::MAX)]
    Overflow { threshold: u64 },
}

/// Rejects the first record with a negative count.
pub fn validate_counts(records: &[CountRecord]) -> Result<(), SweepError> {
    match records.iter().find(|r| r.count < 0) {
        Some(record) => Err(SweepError::InvalidInput {
            group_id: record.group_id.clone(),
            count: record.count,
        }),
        None => Ok(()),
    }
}

/// Builds the sweep table with one pass over the counts sorted in descending
/// order, emitting a row whenever the walk leaves a run of equal counts.
pub fn compute(records: &[CountRecord]) -> Result<Vec<ThresholdRow>, SweepError> {
    validate_counts(records)?;
    let mut counts = records.iter().map(|r| r.count as u64).collect::<Vec<_>>();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let mut rows = Vec::new();
    let mut group_count = 0u64;
    let mut total_count = 0u64;
    let mut i = 0usize;
    while i < counts.len() {
        let threshold = counts[i];
        while i < counts.len() && counts[i] == threshold {
            group_count += 1;
            total_count = total_count
                .checked_add(threshold)
                .ok_or(SweepError::Overflow { threshold })?;
            i += 1;
        }
        rows.push(ThresholdRow {
            threshold,
            group_count,
            total_count,
        });
    }

    Ok(rows)
}

/// Aggregate for an arbitrary cutoff: the row with the smallest sweep
/// threshold that is still `>= threshold`.
pub fn row_at(rows: &[ThresholdRow], threshold: u64) -> ThresholdRow {
    rows.iter()
        .rev()
        .find(|row| row.threshold >= threshold)
        .map(|row| ThresholdRow {
            threshold,
            group_count: row.group_count,
            total_count: row.total_count,
        })
        .unwrap_or_else(|| ThresholdRow::empty(threshold))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_sweep.rs"]
mod tests;
