use gobench::decode::{Decoded, decode_document, load, load_results_str};
use gobench::models::{MessageKind, ProfileRow, ProfileUnit};
use serde_json::json;

const END_TO_END: &str = r#"{"label":".", "total":1,"active":0,"count":1, "children":[{"label":"sub","total":1,"active":0,"count":1}], "pprof":[{"label":"cpu","unit":"ms","rows":[{"flat":1.0,"flat%":50.0,"sum%":50.0,"cum":2.0,"cum%":100.0,"function":"f"}]}]}"#;

#[test]
fn end_to_end_document_assembles_task_tree_and_profiles() {
    let assembly = load("main", END_TO_END.as_bytes()).expect("document should decode");
    assert!(assembly.warnings.is_empty(), "{:?}", assembly.warnings);

    let result = assembly.result;
    assert_eq!(result.branch, "main");
    assert_eq!(result.results.label, ".");
    assert_eq!(result.results.children().len(), 1);
    assert_eq!(result.results.children()[0].label, "sub");

    assert_eq!(result.pprof.len(), 1);
    let cpu = result.profile("cpu").expect("cpu report should exist");
    assert_eq!(cpu.unit, Some(ProfileUnit::Ms));
    assert_eq!(cpu.image, "");
    assert_eq!(
        cpu.rows(),
        &[ProfileRow::new(1.0, 50.0, 50.0, 2.0, 100.0, "f")]
    );
}

#[test]
fn decoding_is_deterministic() {
    let first = load((), END_TO_END.as_bytes()).expect("first decode");
    let second = load((), END_TO_END.as_bytes()).expect("second decode");
    assert_eq!(first, second);
}

#[test]
fn root_label_yields_pair_even_with_children_and_messages() {
    let root = load_results_str(
        r#"{
            "label": ".",
            "total": 10, "active": 5, "count": 1,
            "children": [{"label": "a", "total": 1, "active": 1, "count": 1}],
            "messages": [{"kind": "MsgInfo", "text": "hello!"}]
        }"#,
    )
    .expect("root document should decode");

    assert!(root.task.is_root());
    assert_eq!(root.pprof, None);
    assert_eq!(root.task.children().len(), 1);
    assert_eq!(root.task.messages()[0].kind, MessageKind::Info);
    assert_eq!(root.task.messages()[0].text, "hello!");
}

#[test]
fn non_root_label_ignores_pprof_key() {
    let decoded = decode_document(
        r#"{"label": "sub", "total": 1, "active": 1, "count": 1,
            "pprof": [{"label": "cpu", "unit": "ms", "rows": []}]}"#,
    )
    .expect("task should decode");

    match decoded {
        Decoded::Task(task) => {
            assert_eq!(task.label, "sub");
            assert_eq!(task.children, None);
        }
        other => panic!("expected a plain task, got {other:?}"),
    }
}

#[test]
fn children_and_messages_keep_source_order() {
    let root = load_results_str(
        r#"{"label": ".", "total": 0, "active": 0, "count": 0,
            "children": [
                {"label": "ItFails", "total": 3, "active": 0, "count": 0, "error": "it fails always"},
                {"label": "ItsSuccessful", "total": 2, "active": 0, "count": 0},
                {"label": "ItWritesMessages", "total": 1, "active": 0, "count": 0,
                 "messages": [
                    {"kind": "MsgInfo", "text": "hello!"},
                    {"kind": "MsgDebug", "text": "benchmarking in test ItWritesMessages"},
                    {"kind": "MsgError", "text": "something happened"},
                    {"kind": "MsgOpt", "text": "-O2"}
                 ]}
            ]}"#,
    )
    .expect("document should decode");

    let labels = root
        .task
        .children()
        .iter()
        .map(|task| task.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["ItFails", "ItsSuccessful", "ItWritesMessages"]);
    assert_eq!(
        root.task.children()[0].error.as_deref(),
        Some("it fails always")
    );

    let kinds = root.task.children()[2]
        .messages()
        .iter()
        .map(|message| message.kind)
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            MessageKind::Info,
            MessageKind::Debug,
            MessageKind::Error,
            MessageKind::Opt
        ]
    );
}

#[test]
fn harness_string_fields_are_coerced() {
    let root = load_results_str(
        r#"{"label": ".", "total": "1500", "active": "1200", "count": "3",
            "pprof": [{"label": "top", "unit": "ms", "image": "",
                       "errors": [],
                       "rows": [{"flat": "1.5", "flat%": "25", "sum%": "25",
                                 "cum": "3", "cum%": "50", "function": "runtime.mallocgc"}]}]}"#,
    )
    .expect("string-encoded numbers should decode");

    assert_eq!(root.task.total, 1500);
    assert_eq!(root.task.active, 1200);
    assert_eq!(root.task.count, 3);

    let report = &root.reports()[0];
    assert_eq!(
        report.rows()[0],
        ProfileRow::new(1.5, 25.0, 25.0, 3.0, 50.0, "runtime.mallocgc")
    );
    assert_eq!(report.errors, Some(json!([])));
}

#[test]
fn fractional_counters_truncate_toward_zero() {
    let root = load_results_str(r#"{"label": ".", "total": 1.9, "active": -2.5, "count": "4"}"#)
        .expect("fractional counters should decode");
    assert_eq!(root.task.total, 1);
    assert_eq!(root.task.active, -2);
    assert_eq!(root.task.count, 4);
}

#[test]
fn whole_float_counters_are_accepted() {
    let root = load_results_str(r#"{"label": ".", "total": 2.0, "active": 1e3, "count": 1}"#)
        .expect("whole floats should decode as integers");
    assert_eq!(root.task.total, 2);
    assert_eq!(root.task.active, 1000);
}

#[test]
fn unrecognized_unit_leaves_unit_unset() {
    let assembly = load(
        (),
        r#"{"label": ".", "total": 1, "active": 1, "count": 1,
            "pprof": [{"label": "alloc", "unit": "mb", "rows": []}]}"#
            .as_bytes(),
    )
    .expect("unknown unit is not fatal");

    let report = assembly.result.profile("alloc").expect("report kept");
    assert_eq!(report.unit, None);
    assert_eq!(report.rows, Some(Vec::new()));
    assert!(
        assembly
            .warnings
            .iter()
            .any(|warning| warning.contains("`alloc` has no recognized unit"))
    );
}

#[test]
fn null_optional_fields_are_treated_as_absent() {
    let root = load_results_str(
        r#"{"label": ".", "total": 1, "active": 1, "count": 1,
            "error": null, "children": null, "messages": null, "pprof": null}"#,
    )
    .expect("nulls should decode");
    assert_eq!(root.task.error, None);
    assert_eq!(root.task.children, None);
    assert_eq!(root.task.messages, None);
    assert_eq!(root.pprof, None);
}

#[test]
fn unrecognized_objects_keep_source_key_order() {
    let decoded = decode_document(r#"{"zeta": 1, "alpha": {"go": "1.11"}, "mid": [true]}"#)
        .expect("plain objects should decode");
    assert_eq!(
        decoded.into_value().to_string(),
        r#"{"zeta":1,"alpha":{"go":"1.11"},"mid":[true]}"#
    );
}

#[test]
fn unrecognized_objects_pass_through_unchanged() {
    let decoded = decode_document(r#"{"meta": {"go": "1.11", "cpus": 8}}"#)
        .expect("plain objects should decode");
    assert_eq!(
        decoded.into_value(),
        json!({"meta": {"go": "1.11", "cpus": 8}})
    );
}
