use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::exclusions::ExclusionProfile;
use crate::model::records::{CountRecord, ThresholdRow};
use crate::pipeline::stage1_counts::CountTable;
use crate::pipeline::stage2_filter::FilterOutcome;
use crate::pipeline::stage4_select::{Selection, sort_by_count_desc};
use crate::report::html::render_report_html;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    ExclusionSummary, InputSummary, SelectionSummary, SummaryData, ToolMeta, Totals, fraction,
    median_count,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// `counts.tsv` only.
    Counts,
    /// Sweep table, selection (when any) and the summary reports.
    Sweep,
    /// `selected_groups.tsv` and `summary.json`.
    Select,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render HTML report")]
    Fmt(#[from] std::fmt::Error),
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub counts: &'a CountTable,
    pub filtered: &'a FilterOutcome,
    pub exclusions: &'a ExclusionProfile,
    pub sweep: &'a [ThresholdRow],
    pub selection: Option<&'a Selection>,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(
    input: &Stage5Input<'_>,
    out_dir: &Path,
    mode: ReportMode,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let group_column = input.counts.mode.group_column();
    let mut written = Vec::new();

    if mode == ReportMode::Counts {
        let path = out_dir.join("counts.tsv");
        let mut records = input.filtered.kept.clone();
        sort_by_count_desc(&mut records);
        io_at(&path, write_groups_tsv(&path, group_column, &records))?;
        tracing::info!(path = %path.display(), "wrote report");
        written.push(path);
        return Ok(written);
    }

    let summary = build_summary(input);

    if mode == ReportMode::Sweep {
        let path = out_dir.join("sweep.tsv");
        io_at(&path, write_sweep_tsv(&path, input.sweep))?;
        written.push(path);
    }

    if let Some(selection) = input.selection {
        let path = out_dir.join("selected_groups.tsv");
        io_at(
            &path,
            write_groups_tsv(&path, group_column, &selection.groups),
        )?;
        written.push(path);
    }

    let path = out_dir.join("summary.json");
    let json = render_summary_json(&summary)?;
    io_at(&path, write_text(&path, &json))?;
    written.push(path);

    if mode == ReportMode::Sweep {
        let path = out_dir.join("report.txt");
        io_at(&path, write_text(&path, &render_report_text(&summary)))?;
        written.push(path);

        let path = out_dir.join("report.html");
        let html = render_report_html(&summary)?;
        io_at(&path, write_text(&path, &html))?;
        written.push(path);
    }

    for path in &written {
        tracing::info!(path = %path.display(), "wrote report");
    }
    Ok(written)
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let kept = &input.filtered.kept;
    // the lowest threshold row already aggregates every kept group
    let (groups, cells) = input
        .sweep
        .last()
        .map(|row| (row.group_count, row.total_count))
        .unwrap_or((0, 0));
    let max_count = input.sweep.first().map(|row| row.threshold).unwrap_or(0);

    let selection = input.selection.map(|sel| SelectionSummary {
        rule: sel.rule,
        threshold: sel.threshold,
        group_count: sel.row.group_count,
        total_count: sel.row.total_count,
        group_fraction: fraction(sel.row.group_count, groups),
        cell_fraction: fraction(sel.row.total_count, cells),
    });

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputSummary {
            path: input.counts.source.display().to_string(),
            mode: input.counts.mode.clone(),
            rows_read: input.counts.rows_read,
            rows_skipped: input.counts.rows_skipped,
        },
        exclusions: ExclusionSummary {
            profile: input.exclusions.clone(),
            excluded_groups: input.filtered.excluded_ids(),
            excluded_cells: input.filtered.excluded_count(),
        },
        totals: Totals {
            groups,
            cells,
            max_count,
            median_count: median_count(kept),
        },
        selection,
        sweep: input.sweep.to_vec(),
    }
}

fn write_sweep_tsv(path: &Path, rows: &[ThresholdRow]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "threshold\tgroup_count\ttotal_count")?;
    for row in rows {
        writeln!(
            w,
            "{}\t{}\t{}",
            row.threshold, row.group_count, row.total_count
        )?;
    }
    w.flush()
}

fn write_groups_tsv(
    path: &Path,
    group_column: &str,
    records: &[CountRecord],
) -> std::io::Result<()> {
    // group ids come from quoted CSV cells and may hold tabs or newlines
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(File::create(path)?);
    w.write_record([group_column, "count"])?;
    for record in records {
        w.write_record([record.group_id.as_str(), record.count.to_string().as_str()])?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

fn io_at(path: &Path, result: std::io::Result<()>) -> Result<(), ReportError> {
    result.map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
