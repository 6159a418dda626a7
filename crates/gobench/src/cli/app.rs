use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{inspect::InspectArgs, schema::SchemaArgs, top::TopArgs};

#[derive(Debug, Parser)]
#[command(
    name = "gobench",
    version,
    about = "Decode benchmark result trees and profiler tables"
)]
pub struct Cli {
    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct RuntimeArgs {
    #[arg(long, global = true, value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    #[arg(long, global = true, value_name = "PATH")]
    pub home_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Inspect(InspectArgs),
    Top(TopArgs),
    Schema(SchemaArgs),
}
