use serde::Serialize;

use crate::model::records::{CountRecord, ThresholdRow};
use crate::model::thresholds::ThresholdRule;
use crate::pipeline::stage3_sweep::row_at;

#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub rule: ThresholdRule,
    pub threshold: u64,
    pub row: ThresholdRow,
    pub groups: Vec<CountRecord>,
}

pub fn choose_threshold(rows: &[ThresholdRow], rule: ThresholdRule) -> Option<ThresholdRow> {
    match rule {
        ThresholdRule::None => None,
        ThresholdRule::Explicit(t) => Some(row_at(rows, t)),
        // rows are sorted by descending threshold with growing group_count
        ThresholdRule::MinGroups(n) => rows.iter().find(|row| row.group_count >= n).copied(),
    }
}

/// Groups with at least `threshold` cells, largest first, ties by id.
pub fn select_groups(records: &[CountRecord], threshold: u64) -> Vec<CountRecord> {
    let mut out = records
        .iter()
        .filter(|r| r.count >= 0 && r.count as u64 >= threshold)
        .cloned()
        .collect::<Vec<_>>();
    sort_by_count_desc(&mut out);
    out
}

pub fn sort_by_count_desc(records: &mut [CountRecord]) {
    records.sort_by(|a, b| match b.count.cmp(&a.count) {
        std::cmp::Ordering::Equal => a.group_id.cmp(&b.group_id),
        other => other,
    });
}

pub fn run_stage4(
    records: &[CountRecord],
    rows: &[ThresholdRow],
    rule: ThresholdRule,
) -> Option<Selection> {
    let row = match choose_threshold(rows, rule) {
        Some(row) => row,
        None => {
            if rule != ThresholdRule::None {
                tracing::warn!(rule = %rule.label(), "no threshold satisfies the selection rule");
            }
            return None;
        }
    };
    let groups = select_groups(records, row.threshold);
    tracing::info!(
        threshold = row.threshold,
        groups = row.group_count,
        cells = row.total_count,
        "selected cell-count threshold"
    );
    Some(Selection {
        rule,
        threshold: row.threshold,
        row,
        groups,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_select.rs"]
mod tests;
