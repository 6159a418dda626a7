#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use gobench::cli::app::{Cli, Command, RuntimeArgs};
use gobench::cli::commands;
use gobench::config::RuntimeConfig;
use gobench::decode::DecodeError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME_FAILURE: i32 = 1;
const EXIT_DECODE_FAILURE: i32 = 2;
const EXIT_USAGE_ERROR: i32 = 64;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return exit_code_for_parse_error(error),
    };
    let command_name = command_name(&cli.command);
    eprintln!("gobench: starting `{command_name}`");

    match execute(cli) {
        Ok(()) => {
            eprintln!("gobench: completed `{command_name}` (exit_code={EXIT_SUCCESS})");
            EXIT_SUCCESS
        }
        Err(error) => {
            let exit_code = classify_runtime_error(&error);
            eprintln!("gobench: failed `{command_name}` (exit_code={exit_code})");
            eprintln!("{error:#}");
            exit_code
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Inspect(args) => {
            let config = resolve_runtime_config(&cli.runtime)?;
            commands::inspect::run(&args, &config)
        }
        Command::Top(args) => {
            let config = resolve_runtime_config(&cli.runtime)?;
            commands::top::run(&args, &config)
        }
        Command::Schema(args) => commands::schema::run(&args),
    }
}

fn classify_runtime_error(error: &anyhow::Error) -> i32 {
    if error
        .chain()
        .any(|cause| cause.downcast_ref::<DecodeError>().is_some())
    {
        EXIT_DECODE_FAILURE
    } else {
        EXIT_RUNTIME_FAILURE
    }
}

fn exit_code_for_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            EXIT_SUCCESS
        }
        _ => {
            let _ = error.print();
            EXIT_USAGE_ERROR
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Inspect(_) => "inspect",
        Command::Top(_) => "top",
        Command::Schema(_) => "schema",
    }
}

fn resolve_runtime_config(args: &RuntimeArgs) -> Result<RuntimeConfig> {
    let cwd = match &args.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let home_dir = match &args.home_dir {
        Some(path) => Some(path.clone()),
        None => std::env::var_os("HOME").map(PathBuf::from),
    };

    gobench::config::resolve_runtime_config(&cwd, home_dir.as_deref())
}
