use std::collections::BTreeMap;

use serde::Serialize;

use super::profile::ProfileReport;
use super::task::{RootTask, Task};

/// Decoded outcome of one benchmark run.
///
/// `branch` is whatever context the caller ran the benchmark under; it is
/// stored as given and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult<B> {
    pub branch: B,
    pub results: Task,
    pub pprof: BTreeMap<String, ProfileReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assembly<B> {
    pub result: BenchmarkResult<B>,
    pub warnings: Vec<String>,
}

impl<B> BenchmarkResult<B> {
    /// Folds the root task's profiler list into a label-keyed map.
    ///
    /// A later report replaces an earlier one with the same label; each
    /// replacement is reported in `warnings`.
    pub fn assemble(branch: B, root: RootTask) -> Assembly<B> {
        let RootTask { task, pprof } = root;
        let mut warnings = Vec::new();
        let mut reports = BTreeMap::new();

        for (index, report) in pprof.unwrap_or_default().into_iter().enumerate() {
            if report.unit.is_none() {
                warnings.push(format!(
                    "pprof[{index}]: report `{}` has no recognized unit (expected ms, us or s)",
                    report.label
                ));
            }
            let label = report.label.clone();
            if reports.insert(label.clone(), report).is_some() {
                warnings.push(format!(
                    "pprof[{index}]: duplicate report label `{label}`; keeping the later report"
                ));
            }
        }

        Assembly {
            result: Self {
                branch,
                results: task,
                pprof: reports,
            },
            warnings,
        }
    }

    #[must_use]
    pub fn profile(&self, label: &str) -> Option<&ProfileReport> {
        self.pprof.get(label)
    }
}
