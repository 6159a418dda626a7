//! Decoder for benchmark result documents.
//!
//! A document is parsed into a `serde_json::Value` and then folded bottom-up:
//! array elements and object members are decoded before the object holding
//! them, so every object is classified with its nested records already built.
//! See [`sniff`] for the classification rules.

mod fields;
pub mod sniff;

use std::fmt;
use std::io::Read;

use serde_json::Value;

use crate::models::{
    Assembly, BenchmarkResult, Message, ProfileReport, ProfileRow, RootTask, Task,
};

pub use sniff::{RecordShape, classify};

#[derive(Debug)]
pub enum DecodeError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidEnum {
        record: &'static str,
        field: &'static str,
        value: String,
    },
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    InvalidField {
        record: &'static str,
        field: &'static str,
        detail: String,
    },
    Structural {
        detail: String,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "failed to read result document: {error}"),
            Self::Json(error) => write!(f, "result document is not valid JSON: {error}"),
            Self::InvalidEnum {
                record,
                field,
                value,
            } => write!(f, "{record}.{field} has unrecognized value `{value}`"),
            Self::MissingField { record, field } => {
                write!(f, "{record} is missing required field `{field}`")
            }
            Self::InvalidField {
                record,
                field,
                detail,
            } => write!(f, "{record}.{field} is invalid: {detail}"),
            Self::Structural { detail } => write!(f, "unexpected document structure: {detail}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

/// A decoded JSON value: either a recognized record or the plain JSON it
/// came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Message(Message),
    ProfileRow(ProfileRow),
    ProfileReport(ProfileReport),
    Task(Task),
    Root(RootTask),
    Array(Vec<Decoded>),
    /// Members in source order.
    Object(Vec<(String, Decoded)>),
    Scalar(Value),
}

impl Decoded {
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Message(_) => "a message",
            Self::ProfileRow(_) => "a profile row",
            Self::ProfileReport(_) => "a profile report",
            Self::Task(_) => "a task",
            Self::Root(_) => "a root task",
            Self::Array(_) => "an array",
            Self::Object(_) => "an unrecognized object",
            Self::Scalar(Value::Null) => "null",
            Self::Scalar(Value::Bool(_)) => "a boolean",
            Self::Scalar(Value::Number(_)) => "a number",
            Self::Scalar(Value::String(_)) => "a string",
            Self::Scalar(_) => "a JSON value",
        }
    }

    /// Converts back to plain JSON, re-encoding any records in wire form.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Message(message) => record_value(&message),
            Self::ProfileRow(row) => record_value(&row),
            Self::ProfileReport(report) => record_value(&report),
            Self::Task(task) => record_value(&task),
            Self::Root(root) => record_value(&root),
            Self::Array(items) => Value::Array(items.into_iter().map(Self::into_value).collect()),
            Self::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(key, member)| (key, member.into_value()))
                    .collect(),
            ),
            Self::Scalar(value) => value,
        }
    }
}

fn record_value<T: serde::Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

/// Runs the classification pass over an already-parsed JSON value.
pub fn decode_value(value: Value) -> Result<Decoded, DecodeError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(decode_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Decoded::Array),
        Value::Object(object) => {
            let mut members = Vec::with_capacity(object.len());
            for (key, member) in object {
                members.push((key, decode_value(member)?));
            }
            sniff::decode_object(members)
        }
        scalar => Ok(Decoded::Scalar(scalar)),
    }
}

/// Decodes any JSON document, whatever its top-level shape.
pub fn decode_document(input: &str) -> Result<Decoded, DecodeError> {
    let value = serde_json::from_str::<Value>(input)?;
    decode_value(value)
}

/// Decodes a result document whose top level must be the root task.
pub fn load_results_str(input: &str) -> Result<RootTask, DecodeError> {
    expect_root(decode_document(input)?)
}

pub fn load_results_slice(input: &[u8]) -> Result<RootTask, DecodeError> {
    let value = serde_json::from_slice::<Value>(input)?;
    expect_root(decode_value(value)?)
}

pub fn load_results_reader<R: Read>(mut reader: R) -> Result<RootTask, DecodeError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    load_results_slice(&buffer)
}

/// Decodes a result document and assembles it with the caller's branch.
pub fn load<B, R: Read>(branch: B, reader: R) -> Result<Assembly<B>, DecodeError> {
    let root = load_results_reader(reader)?;
    Ok(BenchmarkResult::assemble(branch, root))
}

fn expect_root(decoded: Decoded) -> Result<RootTask, DecodeError> {
    match decoded {
        Decoded::Root(root) => Ok(root),
        other => Err(DecodeError::Structural {
            detail: format!(
                "expected the top level to be the \".\" task, found {}",
                other.shape_name()
            ),
        }),
    }
}
