//! Key-set classification of result-document objects.
//!
//! The result format carries no type tag, so each object is identified by
//! which keys it has, checked in a fixed order:
//!
//! 1. `kind`  -> [`Message`]
//! 2. `flat%` -> [`ProfileRow`]
//! 3. `rows`  -> [`ProfileReport`]
//! 4. `label` -> [`Task`], or [`RootTask`] when the label is exactly `"."`
//! 5. anything else passes through as a plain mapping
//!
//! The order is part of the format: a task object that happened to carry a
//! `flat%` key would be read as a profile row.

use std::collections::BTreeMap;

use serde_json::Value;

use super::fields::Fields;
use super::{DecodeError, Decoded};
use crate::models::{
    Message, MessageKind, ProfileReport, ProfileRow, ProfileUnit, ROOT_LABEL, RootTask, Task,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Message,
    ProfileRow,
    ProfileReport,
    Task,
    Root,
    PassThrough,
}

fn member<'a>(members: &'a [(String, Decoded)], key: &str) -> Option<&'a Decoded> {
    members
        .iter()
        .find_map(|(name, value)| (name == key).then_some(value))
}

#[must_use]
pub fn classify(members: &[(String, Decoded)]) -> RecordShape {
    let has = |key| member(members, key).is_some();
    if has("kind") {
        RecordShape::Message
    } else if has("flat%") {
        RecordShape::ProfileRow
    } else if has("rows") {
        RecordShape::ProfileReport
    } else if let Some(label) = member(members, "label") {
        if matches!(label, Decoded::Scalar(Value::String(text)) if text == ROOT_LABEL) {
            RecordShape::Root
        } else {
            RecordShape::Task
        }
    } else {
        RecordShape::PassThrough
    }
}

/// Builds the record for one object whose members have already been decoded.
/// Unrecognized objects keep their members in source order.
pub(super) fn decode_object(members: Vec<(String, Decoded)>) -> Result<Decoded, DecodeError> {
    match classify(&members) {
        RecordShape::Message => build_message(keyed(members)).map(Decoded::Message),
        RecordShape::ProfileRow => build_profile_row(keyed(members)).map(Decoded::ProfileRow),
        RecordShape::ProfileReport => {
            build_profile_report(keyed(members)).map(Decoded::ProfileReport)
        }
        RecordShape::Task => {
            build_task(&mut Fields::new("task", keyed(members))).map(Decoded::Task)
        }
        RecordShape::Root => build_root(keyed(members)).map(Decoded::Root),
        RecordShape::PassThrough => Ok(Decoded::Object(members)),
    }
}

fn keyed(members: Vec<(String, Decoded)>) -> BTreeMap<String, Decoded> {
    members.into_iter().collect()
}

fn build_message(members: BTreeMap<String, Decoded>) -> Result<Message, DecodeError> {
    let mut fields = Fields::new("message", members);
    // Classification guarantees `kind` is present; `null` is a bad kind, not
    // a missing one.
    let kind_name = match fields.take_raw("kind") {
        Some(Decoded::Scalar(Value::String(name))) => name,
        Some(other) => other.into_value().to_string(),
        None => {
            return Err(DecodeError::MissingField {
                record: "message",
                field: "kind",
            });
        }
    };
    let kind = MessageKind::from_wire_name(&kind_name).ok_or(DecodeError::InvalidEnum {
        record: "message",
        field: "kind",
        value: kind_name,
    })?;
    let text = fields.string("text")?;
    Ok(Message { kind, text })
}

fn build_profile_row(members: BTreeMap<String, Decoded>) -> Result<ProfileRow, DecodeError> {
    let mut fields = Fields::new("profile row", members);
    Ok(ProfileRow {
        flat: fields.float("flat")?,
        flat_percent: fields.float("flat%")?,
        sum_percent: fields.float("sum%")?,
        cum: fields.float("cum")?,
        cum_percent: fields.float("cum%")?,
        function: fields.string("function")?,
    })
}

fn build_profile_report(members: BTreeMap<String, Decoded>) -> Result<ProfileReport, DecodeError> {
    let mut fields = Fields::new("profile report", members);
    let label = fields.string("label")?;
    let unit = match fields.require("unit")? {
        Decoded::Scalar(Value::String(text)) => ProfileUnit::from_wire_name(&text),
        _ => None,
    };
    let rows = fields.optional_list("rows", "a profile row", |item| match item {
        Decoded::ProfileRow(row) => Ok(row),
        other => Err(other),
    })?;
    let errors = fields.take("errors").map(Decoded::into_value);
    let image = fields.optional_string("image")?.unwrap_or_default();

    Ok(ProfileReport {
        label,
        unit,
        rows,
        errors,
        image,
    })
}

fn build_task(fields: &mut Fields) -> Result<Task, DecodeError> {
    let label = fields.string("label")?;
    let total = fields.integer("total")?;
    let active = fields.integer("active")?;
    let count = fields.integer("count")?;
    let error = fields.optional_string("error")?;
    let children = fields.optional_list("children", "a task", |item| match item {
        Decoded::Task(task) => Ok(task),
        other => Err(other),
    })?;
    let messages = fields.optional_list("messages", "a message", |item| match item {
        Decoded::Message(message) => Ok(message),
        other => Err(other),
    })?;

    Ok(Task {
        label,
        total,
        active,
        count,
        error,
        children,
        messages,
    })
}

fn build_root(members: BTreeMap<String, Decoded>) -> Result<RootTask, DecodeError> {
    let mut fields = Fields::new("root task", members);
    let task = build_task(&mut fields)?;
    let pprof = fields.optional_list("pprof", "a profile report", |item| match item {
        Decoded::ProfileReport(report) => Ok(report),
        other => Err(other),
    })?;
    Ok(RootTask { task, pprof })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{RecordShape, classify};
    use crate::decode::Decoded;

    fn members(value: serde_json::Value) -> Vec<(String, Decoded)> {
        value
            .as_object()
            .expect("fixture must be an object")
            .iter()
            .map(|(key, member)| (key.clone(), Decoded::Scalar(member.clone())))
            .collect()
    }

    #[test]
    fn precedence_follows_key_order() {
        assert_eq!(
            classify(&members(json!({"kind": "MsgInfo", "flat%": 1, "label": "x"}))),
            RecordShape::Message
        );
        assert_eq!(
            classify(&members(json!({"flat%": 1, "rows": [], "label": "x"}))),
            RecordShape::ProfileRow
        );
        assert_eq!(
            classify(&members(json!({"rows": [], "label": "cpu"}))),
            RecordShape::ProfileReport
        );
        assert_eq!(
            classify(&members(json!({"label": ".", "pprof": []}))),
            RecordShape::Root
        );
        assert_eq!(
            classify(&members(json!({"label": "sub", "pprof": []}))),
            RecordShape::Task
        );
        assert_eq!(
            classify(&members(json!({"version": 1}))),
            RecordShape::PassThrough
        );
    }

    #[test]
    fn non_string_root_label_is_a_plain_task_shape() {
        assert_eq!(
            classify(&members(json!({"label": 0}))),
            RecordShape::Task
        );
    }
}
