use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

use crate::input::table::Delimiter;
use crate::model::exclusions::ExclusionProfile;
use crate::model::thresholds::ThresholdRule;
use crate::pipeline::stage1_counts::CountMode;
use crate::pipeline::stage5_report::ReportMode;

#[derive(Parser, Debug)]
#[command(
    name = "fisseqtools",
    version,
    about = "Cell-count threshold sweeps for FISSEQ variant tables"
)]
pub struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count cells per group and write counts.tsv
    Counts(InputArgs),
    /// Sweep every observed cell count as a threshold
    Sweep(SweepArgs),
    /// Write the groups that pass a cell-count threshold
    Select(SweepArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Per-cell (or per-group) table, TSV or CSV, optionally gzipped
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Column holding the variant / genotype label
    #[arg(long, default_value = "aaChanges", value_name = "COL")]
    pub group_column: String,

    /// Output directory, created if missing
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Field delimiter; detected from the file name when omitted
    #[arg(long, value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Drop this exact group id (repeatable)
    #[arg(long = "exclude", value_name = "ID")]
    pub exclude: Vec<String>,

    /// Drop groups containing this text, ignoring case (repeatable)
    #[arg(long = "exclude-containing", value_name = "TEXT")]
    pub exclude_containing: Vec<String>,

    /// Keep WT and synonymous groups
    #[arg(long, default_value_t = false)]
    pub no_default_exclusions: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Read cell counts from this column instead of counting rows per group
    #[arg(long, value_name = "COL")]
    pub count_column: Option<String>,

    /// Select groups with at least this many cells
    #[arg(long, value_name = "CELLS", conflicts_with = "min_groups")]
    pub threshold: Option<u64>,

    /// Select the largest threshold that keeps at least this many groups
    #[arg(long, value_name = "GROUPS")]
    pub min_groups: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DelimiterArg {
    #[value(name = "tab")]
    Tab,
    #[value(name = "comma")]
    Comma,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub report_mode: ReportMode,
    pub input_path: PathBuf,
    pub out_dir: PathBuf,
    pub delimiter: Option<Delimiter>,
    pub count_mode: CountMode,
    pub exclusions: ExclusionProfile,
    pub rule: ThresholdRule,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::INFO
        }
    }

    pub fn into_config(self) -> Result<RunConfig, String> {
        match self.command {
            Commands::Counts(args) => Ok(base_config(
                &args,
                ReportMode::Counts,
                CountMode::ValueCounts {
                    group_column: args.group_column.clone(),
                },
                ThresholdRule::None,
            )),
            Commands::Sweep(args) => Ok(sweep_config(args, ReportMode::Sweep)),
            Commands::Select(args) => {
                let config = sweep_config(args, ReportMode::Select);
                if config.rule == ThresholdRule::None {
                    return Err("select requires --threshold or --min-groups".to_string());
                }
                Ok(config)
            }
        }
    }
}

fn sweep_config(args: SweepArgs, report_mode: ReportMode) -> RunConfig {
    let count_mode = match &args.count_column {
        Some(count_column) => CountMode::Precomputed {
            group_column: args.input.group_column.clone(),
            count_column: count_column.clone(),
        },
        None => CountMode::ValueCounts {
            group_column: args.input.group_column.clone(),
        },
    };
    let rule = ThresholdRule::from_args(args.threshold, args.min_groups);
    base_config(&args.input, report_mode, count_mode, rule)
}

fn base_config(
    args: &InputArgs,
    report_mode: ReportMode,
    count_mode: CountMode,
    rule: ThresholdRule,
) -> RunConfig {
    let base = if args.no_default_exclusions {
        ExclusionProfile::none()
    } else {
        ExclusionProfile::default_v1()
    };
    RunConfig {
        report_mode,
        input_path: args.input.clone(),
        out_dir: args.out.clone(),
        delimiter: args.delimiter.map(|d| match d {
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Comma => Delimiter::Comma,
        }),
        count_mode,
        exclusions: base.with_extra(&args.exclude, &args.exclude_containing),
        rule,
    }
}
