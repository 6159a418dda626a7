use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;
use serde::Serialize;

use crate::config::{InputSource, RuntimeConfig};
use crate::models::{Assembly, BenchmarkResult};
use crate::render::render_task_tree;

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    #[arg(value_name = "PATH")]
    pub target: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only list tasks whose label matches this pattern.
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub source: String,
    pub task_count: usize,
    pub failed_tasks: Vec<String>,
    pub message_counts: BTreeMap<String, usize>,
    pub profile_labels: Vec<String>,
    pub warnings: Vec<String>,
    pub result: BenchmarkResult<String>,
}

#[must_use]
pub fn build_report(assembly: Assembly<String>) -> InspectReport {
    let Assembly { result, warnings } = assembly;
    let mut task_count = 0usize;
    let mut failed_tasks = Vec::new();
    let mut message_counts = BTreeMap::new();

    for (_, task) in result.results.walk() {
        task_count += 1;
        if task.error.is_some() {
            failed_tasks.push(task.label.clone());
        }
        for message in task.messages() {
            *message_counts
                .entry(message.kind.as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    InspectReport {
        source: result.branch.clone(),
        task_count,
        failed_tasks,
        message_counts,
        profile_labels: result.pprof.keys().cloned().collect(),
        warnings,
        result,
    }
}

pub fn inspect_source(source: &InputSource) -> Result<InspectReport> {
    super::load_source(source).map(build_report)
}

#[must_use]
pub fn render_text_report(report: &InspectReport, filter: Option<&Regex>) -> String {
    let mut lines = vec![
        format!("source: {}", report.source),
        format!("tasks: {}", report.task_count),
    ];

    if !report.failed_tasks.is_empty() {
        lines.push(format!("failed_tasks: {}", report.failed_tasks.join(",")));
    }
    if !report.message_counts.is_empty() {
        lines.push(format!(
            "messages: {}",
            report
                .message_counts
                .iter()
                .map(|(kind, count)| format!("{kind}={count}"))
                .collect::<Vec<_>>()
                .join(",")
        ));
    }
    if !report.profile_labels.is_empty() {
        lines.push(format!("profiles: {}", report.profile_labels.join(",")));
    }
    if !report.warnings.is_empty() {
        lines.push("warnings:".to_string());
        lines.extend(report.warnings.iter().map(|warning| format!("- {warning}")));
    }

    lines.push("tree:".to_string());
    lines.push(render_task_tree(&report.result.results, filter));
    lines.join("\n")
}

pub fn render_json_report(report: &InspectReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to encode inspect report as JSON")
}

pub fn compile_filter(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|pattern| {
            Regex::new(pattern).with_context(|| format!("invalid --filter pattern: {pattern}"))
        })
        .transpose()
}

pub fn run(args: &InspectArgs, config: &RuntimeConfig) -> Result<()> {
    let filter = compile_filter(args.filter.as_deref())?;
    let source = config.resolve_input(&args.target)?;
    eprintln!("inspect: start source={}", source.display_name());

    let report = inspect_source(&source)?;
    if args.json {
        println!("{}", render_json_report(&report)?);
    } else {
        println!("{}", render_text_report(&report, filter.as_ref()));
    }

    eprintln!(
        "inspect: complete tasks={} profiles={} warnings={}",
        report.task_count,
        report.profile_labels.len(),
        report.warnings.len()
    );
    Ok(())
}
