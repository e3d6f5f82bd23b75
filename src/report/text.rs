use crate::report::{SummaryData, format_f64_4};

/// Rows of the sweep shown in the text report before it is truncated.
const SWEEP_PREVIEW_ROWS: usize = 20;

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Cell-count Threshold Sweep Report\n");
    out.push_str("=================================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Source: {}\n", data.input.path));
    out.push_str(&format!("Group column: {}\n", data.input.mode.group_column()));
    out.push_str(&format!("Rows read: {}\n", data.input.rows_read));
    if data.input.rows_skipped > 0 {
        out.push_str(&format!(
            "Rows skipped (empty group): {}\n",
            data.input.rows_skipped
        ));
    }
    out.push('\n');

    out.push_str("2. Exclusions\n");
    if data.exclusions.excluded_groups.is_empty() {
        out.push_str("No groups excluded.\n\n");
    } else {
        out.push_str(&format!(
            "Excluded groups ({}): {}\n",
            data.exclusions.excluded_groups.len(),
            data.exclusions.excluded_groups.join(", ")
        ));
        out.push_str(&format!(
            "Excluded cells: {}\n\n",
            data.exclusions.excluded_cells
        ));
    }

    out.push_str("3. Totals\n");
    out.push_str(&format!("Groups: {}\n", data.totals.groups));
    out.push_str(&format!("Cells: {}\n", data.totals.cells));
    out.push_str(&format!("Max cells per group: {}\n", data.totals.max_count));
    out.push_str(&format!(
        "Median cells per group: {}\n\n",
        format_f64_4(data.totals.median_count)
    ));

    out.push_str("4. Selection\n");
    match &data.selection {
        Some(sel) => {
            out.push_str(&format!("Rule: {}\n", sel.rule.label()));
            out.push_str(&format!("Threshold: >= {} cells\n", sel.threshold));
            out.push_str(&format!(
                "Groups kept: {} ({})\n",
                sel.group_count,
                format_f64_4(sel.group_fraction)
            ));
            out.push_str(&format!(
                "Cells kept: {} ({})\n\n",
                sel.total_count,
                format_f64_4(sel.cell_fraction)
            ));
        }
        None => out.push_str("No threshold selected.\n\n"),
    }

    out.push_str("5. Sweep\n");
    out.push_str(&format!(
        "{:>10}  {:>12}  {:>12}\n",
        "threshold", "group_count", "total_count"
    ));
    for row in data.sweep.iter().take(SWEEP_PREVIEW_ROWS) {
        out.push_str(&format!(
            "{:>10}  {:>12}  {:>12}\n",
            row.threshold, row.group_count, row.total_count
        ));
    }
    if data.sweep.len() > SWEEP_PREVIEW_ROWS {
        out.push_str(&format!(
            "... {} more rows in sweep.tsv\n",
            data.sweep.len() - SWEEP_PREVIEW_ROWS
        ));
    }

    out
}
