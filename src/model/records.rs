use serde::Serialize;

/// Cells observed for one group (variant or genotype).
///
/// The count stays signed until the sweep validates it, so a negative value in
/// the input surfaces as an error instead of being lost while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRecord {
    pub group_id: String,
    pub count: i64,
}

impl CountRecord {
    pub fn new(group_id: impl Into<String>, count: i64) -> Self {
        Self {
            group_id: group_id.into(),
            count,
        }
    }
}

/// Aggregate over every group whose count is at least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdRow {
    pub threshold: u64,
    pub group_count: u64,
    pub total_count: u64,
}

impl ThresholdRow {
    pub fn empty(threshold: u64) -> Self {
        Self {
            threshold,
            group_count: 0,
            total_count: 0,
        }
    }
}
