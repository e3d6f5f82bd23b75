use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::input::InputError;
use crate::input::table::Table;
use crate::model::records::CountRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CountMode {
    /// One row per cell; the count of a group is the number of its rows.
    ValueCounts { group_column: String },
    /// One row per group with its cell count already in `count_column`.
    Precomputed {
        group_column: String,
        count_column: String,
    },
}

impl CountMode {
    pub fn group_column(&self) -> &str {
        match self {
            CountMode::ValueCounts { group_column } => group_column,
            CountMode::Precomputed { group_column, .. } => group_column,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountTable {
    pub source: PathBuf,
    pub mode: CountMode,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub records: Vec<CountRecord>,
}

impl CountTable {
    pub fn total_count(&self) -> i128 {
        self.records.iter().map(|r| i128::from(r.count)).sum()
    }
}

pub fn run_stage1(
    table: &Table,
    mode: &CountMode,
    source: &Path,
) -> Result<CountTable, InputError> {
    let (records, rows_skipped) = match mode {
        CountMode::ValueCounts { group_column } => value_counts(table, group_column)?,
        CountMode::Precomputed {
            group_column,
            count_column,
        } => (precomputed_counts(table, group_column, count_column)?, 0),
    };

    if rows_skipped > 0 {
        tracing::warn!(
            rows_skipped,
            column = mode.group_column(),
            "rows with an empty group value were skipped"
        );
    }
    let counts = CountTable {
        source: source.to_path_buf(),
        mode: mode.clone(),
        rows_read: table.n_rows(),
        rows_skipped,
        records,
    };
    tracing::info!(
        groups = counts.records.len(),
        cells = counts.total_count(),
        rows = counts.rows_read,
        "derived per-group cell counts"
    );
    Ok(counts)
}

/// Counts rows per group, keeping groups in order of first appearance.
pub fn value_counts(
    table: &Table,
    group_column: &str,
) -> Result<(Vec<CountRecord>, usize), InputError> {
    let col = table.column_index(group_column)?;
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut records: Vec<CountRecord> = Vec::new();
    let mut skipped = 0usize;

    for row in &table.rows {
        let group = row[col].as_str();
        if group.is_empty() {
            skipped += 1;
            continue;
        }
        match index.get(group) {
            Some(&idx) => records[idx].count += 1,
            None => {
                index.insert(group, records.len());
                records.push(CountRecord::new(group, 1));
            }
        }
    }

    Ok((records, skipped))
}

pub fn precomputed_counts(
    table: &Table,
    group_column: &str,
    count_column: &str,
) -> Result<Vec<CountRecord>, InputError> {
    let group_col = table.column_index(group_column)?;
    let count_col = table.column_index(count_column)?;
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut records = Vec::with_capacity(table.n_rows());

    for (row_idx, row) in table.rows.iter().enumerate() {
        let group = row[group_col].as_str();
        if group.is_empty() {
            return Err(InputError::InvalidInput(format!(
                "row {} has an empty '{}' value",
                row_idx + 1,
                group_column
            )));
        }
        if let Some(first) = seen.insert(group, row_idx) {
            return Err(InputError::InvalidInput(format!(
                "group '{}' appears in rows {} and {}",
                group,
                first + 1,
                row_idx + 1
            )));
        }
        let count = parse_count(&row[count_col]).ok_or_else(|| {
            InputError::InvalidInput(format!(
                "row {} has a non-integer '{}' value: '{}'",
                row_idx + 1,
                count_column,
                row[count_col]
            ))
        })?;
        records.push(CountRecord::new(group, count));
    }

    Ok(records)
}

/// Accepts integers and integral floats such as `12.0`, which pandas writes
/// for count columns that went through a float dtype.
fn parse_count(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_counts.rs"]
mod tests;
