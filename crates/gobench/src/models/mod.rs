pub mod profile;
pub mod result;
pub mod task;

use serde_json::Value;

pub use profile::{PROFILE_COLUMNS, ProfileCell, ProfileReport, ProfileRow, ProfileUnit};
pub use result::{Assembly, BenchmarkResult};
pub use task::{Message, MessageKind, ROOT_LABEL, RootTask, Task};

/// JSON Schema of a result document (the root task with its profiler list).
#[must_use]
pub fn json_schema() -> Value {
    let schema = schemars::schema_for!(RootTask);
    match serde_json::to_value(schema) {
        Ok(value) => value,
        Err(error) => {
            panic!("failed to serialize generated result document schema: {error}");
        }
    }
}
