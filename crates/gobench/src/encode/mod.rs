//! Writes result documents in the shape the decoder reads back.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::RootTask;

pub fn encode_root(root: &RootTask) -> Result<Value> {
    serde_json::to_value(root).context("failed to encode result document")
}

pub fn to_string_pretty(root: &RootTask) -> Result<String> {
    serde_json::to_string_pretty(root).context("failed to encode result document")
}

pub fn write_document<W: Write>(mut writer: W, root: &RootTask) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, root)
        .context("failed to encode result document")?;
    writer
        .write_all(b"\n")
        .context("failed to terminate result document")?;
    writer.flush().context("failed to flush result document")
}

pub fn write_document_file(path: &Path, root: &RootTask) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create result directory: {}", parent.display())
        })?;
    }

    let encoded = to_string_pretty(root)?;
    std::fs::write(path, format!("{encoded}\n"))
        .with_context(|| format!("failed to write result document: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::encode_root;
    use crate::models::{Message, MessageKind, ProfileReport, ProfileRow, ProfileUnit, RootTask, Task};

    #[test]
    fn encodes_wire_names_and_omits_absent_fields() {
        let mut task = Task::new(".", 10, 4, 1);
        task.messages = Some(vec![Message::new(MessageKind::Debug, "warming up")]);
        let mut report = ProfileReport::new("top", Some(ProfileUnit::Us));
        report.rows = Some(vec![ProfileRow::new(0.5, 25.0, 25.0, 1.5, 75.0, "main.g")]);

        let value = encode_root(&RootTask::new(task, Some(vec![report]))).expect("encode");
        assert_eq!(
            value,
            json!({
                "label": ".",
                "total": 10,
                "active": 4,
                "count": 1,
                "messages": [{"kind": "MsgDebug", "text": "warming up"}],
                "pprof": [{
                    "label": "top",
                    "unit": "us",
                    "rows": [{
                        "flat": 0.5,
                        "flat%": 25.0,
                        "sum%": 25.0,
                        "cum": 1.5,
                        "cum%": 75.0,
                        "function": "main.g"
                    }],
                    "image": ""
                }]
            })
        );
    }

    #[test]
    fn rowless_report_keeps_rows_key() {
        let root = RootTask::new(
            Task::new(".", 0, 0, 0),
            Some(vec![ProfileReport::new("top-nort", None)]),
        );
        let value = encode_root(&root).expect("encode");
        assert_eq!(
            value["pprof"][0],
            json!({"label": "top-nort", "rows": null, "image": ""})
        );
    }
}
