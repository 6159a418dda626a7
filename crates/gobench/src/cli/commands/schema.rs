use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    /// Print on a single line.
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

pub fn render_schema(compact: bool) -> Result<String> {
    let schema = crate::models::json_schema();
    if compact {
        serde_json::to_string(&schema)
    } else {
        serde_json::to_string_pretty(&schema)
    }
    .context("failed to encode result document schema")
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    println!("{}", render_schema(args.compact)?);
    Ok(())
}
