use serde::Serialize;

/// How the operating cell-count threshold is picked from a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum ThresholdRule {
    /// No threshold; the sweep is reported on its own.
    None,
    /// Use this cell count as the cutoff.
    Explicit(u64),
    /// Largest observed count that still keeps at least this many groups.
    MinGroups(u64),
}

impl ThresholdRule {
    pub fn from_args(threshold: Option<u64>, min_groups: Option<u64>) -> Self {
        match (threshold, min_groups) {
            (Some(t), _) => ThresholdRule::Explicit(t),
            (None, Some(n)) => ThresholdRule::MinGroups(n),
            (None, None) => ThresholdRule::None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ThresholdRule::None => "none".to_string(),
            ThresholdRule::Explicit(t) => format!("explicit (>= {t} cells)"),
            ThresholdRule::MinGroups(n) => format!("min-groups (>= {n} groups)"),
        }
    }
}
