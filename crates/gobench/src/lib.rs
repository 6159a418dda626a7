#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod decode;
pub mod encode;
pub mod loader;
pub mod models;
pub mod render;

pub use cli::app::{Cli, Command};
pub use decode::{DecodeError, decode_document, load, load_results_reader, load_results_str};
pub use models::{BenchmarkResult, Message, MessageKind, ProfileReport, ProfileRow, RootTask, Task};
