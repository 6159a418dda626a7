use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

/// Column order of a flat/cumulative profile table.
pub const PROFILE_COLUMNS: [&str; 6] = ["flat", "flat%", "sum%", "cum", "cum%", "function"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum ProfileUnit {
    #[serde(rename = "ms")]
    #[schemars(rename = "ms")]
    Ms,
    #[serde(rename = "us")]
    #[schemars(rename = "us")]
    Us,
    #[serde(rename = "s")]
    #[schemars(rename = "s")]
    S,
}

impl ProfileUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ms => "ms",
            Self::Us => "us",
            Self::S => "s",
        }
    }

    #[must_use]
    pub fn from_wire_name(value: &str) -> Option<Self> {
        match value {
            "ms" => Some(Self::Ms),
            "us" => Some(Self::Us),
            "s" => Some(Self::S),
            _ => None,
        }
    }
}

impl fmt::Display for ProfileUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileCell<'a> {
    Number(f64),
    Text(&'a str),
}

impl fmt::Display for ProfileCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ProfileRow {
    pub flat: f64,
    #[serde(rename = "flat%")]
    #[schemars(rename = "flat%")]
    pub flat_percent: f64,
    #[serde(rename = "sum%")]
    #[schemars(rename = "sum%")]
    pub sum_percent: f64,
    pub cum: f64,
    #[serde(rename = "cum%")]
    #[schemars(rename = "cum%")]
    pub cum_percent: f64,
    pub function: String,
}

impl ProfileRow {
    pub fn new(
        flat: f64,
        flat_percent: f64,
        sum_percent: f64,
        cum: f64,
        cum_percent: f64,
        function: impl Into<String>,
    ) -> Self {
        Self {
            flat,
            flat_percent,
            sum_percent,
            cum,
            cum_percent,
            function: function.into(),
        }
    }

    /// Looks up a cell by its column header (`"flat%"`, `"function"`, ...).
    #[must_use]
    pub fn get(&self, column: &str) -> Option<ProfileCell<'_>> {
        let cell = match column {
            "flat" => ProfileCell::Number(self.flat),
            "flat%" => ProfileCell::Number(self.flat_percent),
            "sum%" => ProfileCell::Number(self.sum_percent),
            "cum" => ProfileCell::Number(self.cum),
            "cum%" => ProfileCell::Number(self.cum_percent),
            "function" => ProfileCell::Text(&self.function),
            _ => return None,
        };
        Some(cell)
    }

    /// Cells in [`PROFILE_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [ProfileCell<'_>; 6] {
        [
            ProfileCell::Number(self.flat),
            ProfileCell::Number(self.flat_percent),
            ProfileCell::Number(self.sum_percent),
            ProfileCell::Number(self.cum),
            ProfileCell::Number(self.cum_percent),
            ProfileCell::Text(&self.function),
        ]
    }
}

/// One named profiler capture, e.g. the `top-cum` table of a CPU profile.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ProfileReport {
    pub label: String,

    /// `None` when the document carried a unit outside `ms`, `us` and `s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<ProfileUnit>,

    /// Always written, as `null` when absent: the `rows` key is what marks an
    /// object as a report.
    pub rows: Option<Vec<ProfileRow>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,

    #[serde(default)]
    pub image: String,
}

impl ProfileReport {
    pub fn new(label: impl Into<String>, unit: Option<ProfileUnit>) -> Self {
        Self {
            label: label.into(),
            unit,
            rows: None,
            errors: None,
            image: String::new(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[ProfileRow] {
        self.rows.as_deref().unwrap_or_default()
    }

    /// Error strings the profiler printed while producing this report.
    #[must_use]
    pub fn error_lines(&self) -> Vec<String> {
        match &self.errors {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(Value::String(text)) => vec![text.clone()],
            Some(other) => vec![other.to_string()],
        }
    }
}
