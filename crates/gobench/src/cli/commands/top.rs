use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use crate::config::RuntimeConfig;
use crate::models::{BenchmarkResult, ProfileReport};
use crate::render::render_profile_table;

#[derive(Debug, Clone, Args)]
pub struct TopArgs {
    #[arg(value_name = "PATH")]
    pub target: PathBuf,

    /// Show only the report with this label.
    #[arg(long)]
    pub label: Option<String>,

    /// Maximum rows printed per report.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

pub fn select_reports<'a, B>(
    result: &'a BenchmarkResult<B>,
    label: Option<&str>,
) -> Result<Vec<&'a ProfileReport>> {
    if result.pprof.is_empty() {
        bail!("result document has no profiler reports (was the benchmark run with --pprof?)");
    }

    match label {
        None => Ok(result.pprof.values().collect()),
        Some(label) => match result.profile(label) {
            Some(report) => Ok(vec![report]),
            None => bail!(
                "no profiler report labelled `{label}`; available: {}",
                result.pprof.keys().cloned().collect::<Vec<_>>().join(",")
            ),
        },
    }
}

pub fn run(args: &TopArgs, config: &RuntimeConfig) -> Result<()> {
    let source = config.resolve_input(&args.target)?;
    eprintln!("top: start source={}", source.display_name());

    let assembly = super::load_source(&source)?;
    for warning in &assembly.warnings {
        eprintln!("top: warning {warning}");
    }

    let reports = select_reports(&assembly.result, args.label.as_deref())?;
    let tables = reports
        .iter()
        .map(|report| render_profile_table(report, args.limit))
        .collect::<Vec<_>>();
    println!("{}", tables.join("\n\n"));

    eprintln!("top: complete reports={}", reports.len());
    Ok(())
}
