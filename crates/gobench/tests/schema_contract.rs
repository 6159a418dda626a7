use gobench::cli::commands::schema::render_schema;
use gobench::models::json_schema;
use serde_json::Value;

fn required(schema: &Value) -> Vec<&str> {
    schema["required"]
        .as_array()
        .expect("schema should list required properties")
        .iter()
        .filter_map(Value::as_str)
        .collect()
}

#[test]
fn root_schema_requires_counters_and_label() {
    let schema = json_schema();
    let required = required(&schema);
    for field in ["label", "total", "active", "count"] {
        assert!(required.contains(&field), "{field} missing from {required:?}");
    }
    assert!(!required.contains(&"pprof"));
    assert!(schema["properties"].get("pprof").is_some());
}

#[test]
fn profile_row_schema_uses_percent_column_names() {
    let schema = json_schema();
    let row = &schema["$defs"]["ProfileRow"];
    let required = required(row);
    for column in ["flat", "flat%", "sum%", "cum", "cum%", "function"] {
        assert!(required.contains(&column), "{column} missing from {required:?}");
    }
}

#[test]
fn message_kind_schema_lists_wire_names() {
    let rendered = render_schema(true).expect("schema should render");
    for kind in ["MsgError", "MsgInfo", "MsgDebug", "MsgOpt"] {
        assert!(rendered.contains(kind), "{kind} missing from schema");
    }
    assert!(!rendered.contains('\n'));
}
