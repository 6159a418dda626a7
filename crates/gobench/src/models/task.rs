use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;

use super::profile::ProfileReport;

/// Label the benchmark harness gives the outermost task of a run.
pub const ROOT_LABEL: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum MessageKind {
    #[serde(rename = "MsgError")]
    #[schemars(rename = "MsgError")]
    Error,
    #[serde(rename = "MsgInfo")]
    #[schemars(rename = "MsgInfo")]
    Info,
    #[serde(rename = "MsgDebug")]
    #[schemars(rename = "MsgDebug")]
    Debug,
    #[serde(rename = "MsgOpt")]
    #[schemars(rename = "MsgOpt")]
    Opt,
}

impl MessageKind {
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Error => "MsgError",
            Self::Info => "MsgInfo",
            Self::Debug => "MsgDebug",
            Self::Opt => "MsgOpt",
        }
    }

    #[must_use]
    pub fn from_wire_name(value: &str) -> Option<Self> {
        match value {
            "MsgError" => Some(Self::Error),
            "MsgInfo" => Some(Self::Info),
            "MsgDebug" => Some(Self::Debug),
            "MsgOpt" => Some(Self::Opt),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Opt => "Opt",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// One unit of reported benchmark work.
///
/// `total` and `active` are nanosecond counts; `count` is the number of
/// iterations the harness started for this task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Task {
    pub label: String,
    pub total: i64,
    pub active: i64,
    pub count: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Task>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

impl Task {
    pub fn new(label: impl Into<String>, total: i64, active: i64, count: i64) -> Self {
        Self {
            label: label.into(),
            total,
            active,
            count,
            error: None,
            children: None,
            messages: None,
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.label == ROOT_LABEL
    }

    #[must_use]
    pub fn children(&self) -> &[Task] {
        self.children.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.messages.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn total_duration(&self) -> time::Duration {
        time::Duration::nanoseconds(self.total)
    }

    #[must_use]
    pub fn active_duration(&self) -> time::Duration {
        time::Duration::nanoseconds(self.active)
    }

    /// Depth-first walk in source order, yielding each task with its depth
    /// below `self` (which is depth 0).
    #[must_use]
    pub fn walk(&self) -> Vec<(usize, &Task)> {
        let mut visited = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, task)) = stack.pop() {
            visited.push((depth, task));
            for child in task.children().iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        visited
    }

    #[must_use]
    pub fn find(&self, label: &str) -> Option<&Task> {
        self.walk()
            .into_iter()
            .map(|(_, task)| task)
            .find(|task| task.label == label)
    }
}

/// The `"."` task of a result document together with the profiler reports
/// recorded next to it.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RootTask {
    #[serde(flatten)]
    pub task: Task,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pprof: Option<Vec<ProfileReport>>,
}

impl RootTask {
    #[must_use]
    pub fn new(task: Task, pprof: Option<Vec<ProfileReport>>) -> Self {
        Self { task, pprof }
    }

    #[must_use]
    pub fn reports(&self) -> &[ProfileReport] {
        self.pprof.as_deref().unwrap_or_default()
    }
}
