use serde::Serialize;

use crate::model::exclusions::ExclusionProfile;
use crate::model::records::{CountRecord, ThresholdRow};
use crate::model::thresholds::ThresholdRule;
use crate::pipeline::stage1_counts::CountMode;

pub mod html;
pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub path: String,
    #[serde(flatten)]
    pub mode: CountMode,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExclusionSummary {
    pub profile: ExclusionProfile,
    pub excluded_groups: Vec<String>,
    pub excluded_cells: i128,
}

#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub groups: u64,
    pub cells: u64,
    pub max_count: u64,
    pub median_count: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub rule: ThresholdRule,
    pub threshold: u64,
    pub group_count: u64,
    pub total_count: u64,
    pub group_fraction: f64,
    pub cell_fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputSummary,
    pub exclusions: ExclusionSummary,
    pub totals: Totals,
    pub selection: Option<SelectionSummary>,
    pub sweep: Vec<ThresholdRow>,
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn fraction(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

/// Median of non-negative counts; the mean of the two middle values for an
/// even number of records.
pub fn median_count(records: &[CountRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let mut counts = records.iter().map(|r| r.count).collect::<Vec<_>>();
    counts.sort_unstable();
    let n = counts.len();
    if n % 2 == 1 {
        counts[n / 2] as f64
    } else {
        (counts[n / 2 - 1] as f64 + counts[n / 2] as f64) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
