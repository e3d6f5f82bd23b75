use std::fmt::Write;

use crate::report::{SummaryData, format_f64_4};

pub fn render_report_html(data: &SummaryData) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(16 * 1024 + data.sweep.len() * 96);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\"/>")?;
    writeln!(
        html,
        "<title>{} threshold sweep: {}</title>",
        escape(&data.tool.name),
        escape(&data.input.path)
    )?;
    writeln!(html, "<style>")?;
    writeln!(
        html,
        "body{{font-family:Arial,Helvetica,sans-serif;margin:20px;color:#222;background:#fff;}}"
    )?;
    writeln!(html, "h1{{margin:0 0 8px 0;font-size:24px;}}")?;
    writeln!(html, "h2{{margin:24px 0 8px 0;font-size:20px;}}")?;
    writeln!(
        html,
        ".meta{{color:#555;font-size:13px;margin-bottom:16px;}}"
    )?;
    writeln!(
        html,
        ".table{{border-collapse:collapse;max-width:900px;font-size:13px;}}"
    )?;
    writeln!(
        html,
        ".table th,.table td{{border:1px solid #ddd;padding:4px 8px;text-align:right;}}"
    )?;
    writeln!(
        html,
        ".table th:first-child,.table td:first-child{{text-align:left;}}"
    )?;
    writeln!(html, ".selected td{{background:#eef6ee;font-weight:bold;}}")?;
    writeln!(html, "</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;

    writeln!(html, "<h1>Cell-count threshold sweep</h1>")?;
    writeln!(
        html,
        "<div class=\"meta\">{} {} &middot; {} &middot; group column <code>{}</code></div>",
        escape(&data.tool.name),
        escape(&data.tool.version),
        escape(&data.input.path),
        escape(data.input.mode.group_column())
    )?;

    writeln!(html, "<h2>Summary</h2>")?;
    writeln!(html, "<table class=\"table\">")?;
    summary_row(&mut html, "Rows read", &data.input.rows_read.to_string())?;
    summary_row(&mut html, "Groups", &data.totals.groups.to_string())?;
    summary_row(&mut html, "Cells", &data.totals.cells.to_string())?;
    summary_row(
        &mut html,
        "Excluded groups",
        &data.exclusions.excluded_groups.join(", "),
    )?;
    summary_row(
        &mut html,
        "Median cells per group",
        &format_f64_4(data.totals.median_count),
    )?;
    if let Some(sel) = &data.selection {
        summary_row(&mut html, "Selection rule", &sel.rule.label())?;
        summary_row(&mut html, "Threshold", &format!(">= {}", sel.threshold))?;
        summary_row(
            &mut html,
            "Groups kept",
            &format!("{} ({})", sel.group_count, format_f64_4(sel.group_fraction)),
        )?;
        summary_row(
            &mut html,
            "Cells kept",
            &format!("{} ({})", sel.total_count, format_f64_4(sel.cell_fraction)),
        )?;
    }
    writeln!(html, "</table>")?;

    writeln!(html, "<h2>Sweep</h2>")?;
    writeln!(html, "<table class=\"table\">")?;
    writeln!(
        html,
        "<thead><tr><th>threshold</th><th>group_count</th><th>total_count</th></tr></thead>"
    )?;
    writeln!(html, "<tbody>")?;
    let selected = data.selection.as_ref().map(|s| s.threshold);
    for row in &data.sweep {
        let class = if Some(row.threshold) == selected {
            " class=\"selected\""
        } else {
            ""
        };
        writeln!(
            html,
            "<tr{}><td>{}</td><td>{}</td><td>{}</td></tr>",
            class, row.threshold, row.group_count, row.total_count
        )?;
    }
    writeln!(html, "</tbody>")?;
    writeln!(html, "</table>")?;

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

fn summary_row(html: &mut String, label: &str, value: &str) -> std::fmt::Result {
    writeln!(
        html,
        "<tr><th>{}</th><td>{}</td></tr>",
        escape(label),
        escape(value)
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
