mod cli;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::cli::{Cli, RunConfig};
use crate::input::{InputError, load_table};
use crate::pipeline::stage1_counts::run_stage1;
use crate::pipeline::stage2_filter::apply_exclusions;
use crate::pipeline::stage3_sweep::{SweepError, compute, validate_counts};
use crate::pipeline::stage4_select::run_stage4;
use crate::pipeline::stage5_report::{ReportError, ReportMode, Stage5Input, write_reports};

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Sweep(#[from] SweepError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level());
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<Vec<PathBuf>, AppError> {
    let config = cli.into_config().map_err(AppError::Config)?;
    tracing::info!("fisseqtools v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(?config, "resolved run configuration");
    run_config(&config)
}

fn run_config(config: &RunConfig) -> Result<Vec<PathBuf>, AppError> {
    let table = load_table(&config.input_path, config.delimiter)?;
    let counts = run_stage1(&table, &config.count_mode, &config.input_path)?;
    validate_counts(&counts.records)?;
    let filtered = apply_exclusions(&counts.records, &config.exclusions);

    let sweep = if config.report_mode == ReportMode::Counts {
        Vec::new()
    } else {
        let rows = compute(&filtered.kept)?;
        tracing::info!(thresholds = rows.len(), "threshold sweep complete");
        rows
    };
    let selection = run_stage4(&filtered.kept, &sweep, config.rule);
    if config.report_mode == ReportMode::Select && selection.is_none() {
        return Err(AppError::Config(format!(
            "no threshold satisfies {}",
            config.rule.label()
        )));
    }

    let input = Stage5Input {
        counts: &counts,
        filtered: &filtered,
        exclusions: &config.exclusions,
        sweep: &sweep,
        selection: selection.as_ref(),
        tool_name: "fisseqtools".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Ok(write_reports(&input, &config.out_dir, config.report_mode)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
