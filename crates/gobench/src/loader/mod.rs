//! Produces a [`BenchmarkResult`](crate::models::BenchmarkResult) for a
//! benchmark, either from a result file left by an earlier run or by asking a
//! [`BenchmarkLauncher`] to run it.
//!
//! Starting the benchmark program, composing its environment and turning
//! [`BenchmarkOptions`] into command-line flags all belong to the launcher.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::decode;
use crate::models::Assembly;

pub const BENCHMARK_PROGRAM: &str = "benchmark.go";
pub const DEFAULT_RESULT_FILE: &str = "benchmark.js";

/// Where the benchmark program leaves its result document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultMode {
    /// Printed on the program's stdout.
    Stdout,
    /// Written to [`DEFAULT_RESULT_FILE`] inside the benchmark's workdir.
    #[default]
    DefaultFile,
    /// Written to the given path; relative paths are taken from the workdir.
    File(PathBuf),
}

impl ResultMode {
    #[must_use]
    pub fn result_path(&self, workdir: &Path) -> Option<PathBuf> {
        match self {
            Self::Stdout => None,
            Self::DefaultFile => Some(workdir.join(DEFAULT_RESULT_FILE)),
            Self::File(path) if path.is_absolute() => Some(path.clone()),
            Self::File(path) => Some(workdir.join(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PprofOption {
    #[default]
    Off,
    On,
    /// Profile and keep the raw CPU profile at this path.
    CpuProfile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BenchmarkOptions {
    pub pprof: PprofOption,
    /// Node count for a rendered call graph; `Some(0)` lets the program pick.
    pub callgraph: Option<u32>,
    pub result: ResultMode,
}

/// Everything a launcher needs to run one benchmark.
#[derive(Debug, Clone, Copy)]
pub struct LaunchRequest<'a> {
    pub label: &'a str,
    pub workdir: &'a Path,
    pub program: &'a str,
    pub options: &'a BenchmarkOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    Success,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutput {
    pub status: LaunchStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs the benchmark program and captures what it printed.
pub trait BenchmarkLauncher {
    fn launch(&self, request: &LaunchRequest<'_>) -> Result<LaunchOutput>;
}

/// Maps a benchmark label to the directory its program lives in.
pub trait BenchmarkBranch {
    fn workdir(&self, benchmark_label: &str) -> PathBuf;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkFailure {
    pub label: String,
    pub reason: String,
}

impl fmt::Display for BenchmarkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "benchmark {} failed: {}", self.label, self.reason)
    }
}

impl std::error::Error for BenchmarkFailure {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
    pub label: String,
    pub program: String,
}

impl Benchmark {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            program: BENCHMARK_PROGRAM.to_string(),
        }
    }

    /// Runs the benchmark and decodes the result it produced.
    pub fn execute<B, L>(
        &self,
        branch: B,
        options: &BenchmarkOptions,
        launcher: &L,
    ) -> Result<Assembly<B>>
    where
        B: BenchmarkBranch,
        L: BenchmarkLauncher + ?Sized,
    {
        let workdir = branch.workdir(&self.label);
        let request = LaunchRequest {
            label: &self.label,
            workdir: &workdir,
            program: &self.program,
            options,
        };
        let output = launcher
            .launch(&request)
            .with_context(|| format!("failed to launch benchmark {}", self.label))?;

        if let LaunchStatus::Failed { reason } = output.status {
            return Err(BenchmarkFailure {
                label: self.label.clone(),
                reason,
            }
            .into());
        }

        let mut assembly = match options.result.result_path(&workdir) {
            None => decode::load(branch, output.stdout.as_slice()).with_context(|| {
                format!("failed to decode stdout of benchmark {}", self.label)
            })?,
            Some(path) => load_file(branch, &path)?,
        };
        if !output.stderr.is_empty() {
            assembly.warnings.push(format!(
                "benchmark {} wrote {} byte(s) to stderr",
                self.label,
                output.stderr.len()
            ));
        }
        Ok(assembly)
    }

    /// Reuses an existing result file when there is one, otherwise runs the
    /// benchmark. Results always go through a file here, so
    /// [`ResultMode::Stdout`] is treated as [`ResultMode::DefaultFile`].
    pub fn load_or_execute<B, L>(
        &self,
        branch: B,
        options: &BenchmarkOptions,
        launcher: &L,
    ) -> Result<Assembly<B>>
    where
        B: BenchmarkBranch,
        L: BenchmarkLauncher + ?Sized,
    {
        let mut options = options.clone();
        if options.result == ResultMode::Stdout {
            options.result = ResultMode::DefaultFile;
        }

        let workdir = branch.workdir(&self.label);
        if let Some(path) = options.result.result_path(&workdir)
            && path.is_file()
        {
            return load_file(branch, &path);
        }

        self.execute(branch, &options, launcher)
    }
}

/// Decodes a result document from disk.
pub fn load_file<B>(branch: B, path: &Path) -> Result<Assembly<B>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open result document: {}", path.display()))?;
    decode::load(branch, std::io::BufReader::new(file))
        .with_context(|| format!("failed to decode result document: {}", path.display()))
}
