use super::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::thresholds::ThresholdRule;
use crate::pipeline::stage1_counts::CountMode;
use crate::pipeline::stage2_filter::apply_exclusions;
use crate::pipeline::stage3_sweep::compute;
use crate::pipeline::stage4_select::run_stage4;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("fisseqtools_stage5_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn count_table() -> CountTable {
    CountTable {
        source: PathBuf::from("cells.tsv"),
        mode: CountMode::ValueCounts {
            group_column: "aaChanges".to_string(),
        },
        rows_read: 1014,
        rows_skipped: 0,
        records: vec![
            CountRecord::new("A", 5),
            CountRecord::new("WT", 1000),
            CountRecord::new("B", 5),
            CountRecord::new("C", 3),
            CountRecord::new("D", 1),
        ],
    }
}

struct Fixture {
    counts: CountTable,
    profile: ExclusionProfile,
    filtered: FilterOutcome,
    sweep: Vec<ThresholdRow>,
    selection: Option<Selection>,
}

impl Fixture {
    fn new(rule: ThresholdRule) -> Self {
        let counts = count_table();
        let profile = ExclusionProfile::default_v1();
        let filtered = apply_exclusions(&counts.records, &profile);
        let sweep = compute(&filtered.kept).unwrap();
        let selection = run_stage4(&filtered.kept, &sweep, rule);
        Self {
            counts,
            profile,
            filtered,
            sweep,
            selection,
        }
    }

    fn input(&self) -> Stage5Input<'_> {
        Stage5Input {
            counts: &self.counts,
            filtered: &self.filtered,
            exclusions: &self.profile,
            sweep: &self.sweep,
            selection: self.selection.as_ref(),
            tool_name: "fisseqtools".to_string(),
            tool_version: "test".to_string(),
        }
    }
}

#[test]
fn test_build_summary_totals() {
    let fx = Fixture::new(ThresholdRule::MinGroups(3));
    let summary = build_summary(&fx.input());
    assert_eq!(summary.totals.groups, 4);
    assert_eq!(summary.totals.cells, 14);
    assert_eq!(summary.totals.max_count, 5);
    assert_eq!(summary.totals.median_count, 4.0);
    assert_eq!(summary.exclusions.excluded_groups, vec!["WT".to_string()]);
    assert_eq!(summary.exclusions.excluded_cells, 1000);

    let sel = summary.selection.unwrap();
    assert_eq!(sel.threshold, 3);
    assert_eq!(sel.group_count, 3);
    assert_eq!(sel.total_count, 13);
    assert_eq!(sel.group_fraction, 0.75);
}

#[test]
fn test_write_sweep_reports() {
    let fx = Fixture::new(ThresholdRule::MinGroups(3));
    let dir = make_temp_dir().join("out");
    let written = write_reports(&fx.input(), &dir, ReportMode::Sweep).unwrap();
    assert_eq!(written.len(), 5);

    let sweep = fs::read_to_string(dir.join("sweep.tsv")).unwrap();
    assert_eq!(
        sweep,
        "threshold\tgroup_count\ttotal_count\n5\t2\t10\n3\t3\t13\n1\t4\t14\n"
    );

    let selected = fs::read_to_string(dir.join("selected_groups.tsv")).unwrap();
    assert_eq!(selected, "aaChanges\tcount\nA\t5\nB\t5\nC\t3\n");

    let json = fs::read_to_string(dir.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"]["name"], "fisseqtools");
    assert_eq!(value["input"]["mode"], "value_counts");
    assert_eq!(value["input"]["group_column"], "aaChanges");
    assert_eq!(value["selection"]["rule"]["rule"], "min_groups");
    assert_eq!(value["selection"]["rule"]["value"], 3);
    assert_eq!(value["sweep"][2]["total_count"], 14);

    let text = fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(text.contains("Threshold: >= 3 cells"));
    assert!(text.contains("Excluded groups (1): WT"));

    let html = fs::read_to_string(dir.join("report.html")).unwrap();
    assert!(html.contains("<tr class=\"selected\"><td>3</td><td>3</td><td>13</td></tr>"));
}

#[test]
fn test_write_counts_only() {
    let fx = Fixture::new(ThresholdRule::None);
    let dir = make_temp_dir();
    let written = write_reports(&fx.input(), &dir, ReportMode::Counts).unwrap();
    assert_eq!(written, vec![dir.join("counts.tsv")]);
    let counts = fs::read_to_string(dir.join("counts.tsv")).unwrap();
    assert_eq!(counts, "aaChanges\tcount\nA\t5\nB\t5\nC\t3\nD\t1\n");
    assert!(!dir.join("summary.json").exists());
}

#[test]
fn test_write_select_reports() {
    let fx = Fixture::new(ThresholdRule::Explicit(4));
    let dir = make_temp_dir();
    write_reports(&fx.input(), &dir, ReportMode::Select).unwrap();
    assert!(dir.join("selected_groups.tsv").exists());
    assert!(dir.join("summary.json").exists());
    assert!(!dir.join("sweep.tsv").exists());
    assert!(!dir.join("report.html").exists());
}

#[test]
fn test_sweep_without_selection() {
    let fx = Fixture::new(ThresholdRule::None);
    let summary = build_summary(&fx.input());
    assert!(summary.selection.is_none());
    let text = render_report_text(&summary);
    assert!(text.contains("No threshold selected."));
}

#[test]
fn test_group_ids_with_tabs_read_back_intact() {
    let mut fx = Fixture::new(ThresholdRule::None);
    fx.filtered.kept = vec![CountRecord::new("p.A\tB", 2), CountRecord::new("p.C\nD", 1)];
    let dir = make_temp_dir();
    write_reports(&fx.input(), &dir, ReportMode::Counts).unwrap();

    let file = File::open(dir.join("counts.tsv")).unwrap();
    let table = crate::input::table::parse_table(file, crate::input::table::Delimiter::Tab)
        .unwrap();
    assert_eq!(table.columns, vec!["aaChanges".to_string(), "count".to_string()]);
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.rows[0], vec!["p.A\tB".to_string(), "2".to_string()]);
    assert_eq!(table.rows[1], vec!["p.C\nD".to_string(), "1".to_string()]);
}
