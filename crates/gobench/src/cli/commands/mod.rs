pub mod inspect;
pub mod schema;
pub mod top;

use std::io::Read;

use anyhow::{Context, Result};

use crate::config::InputSource;
use crate::decode;
use crate::models::Assembly;

/// Decodes a result document, using the source's display name as the branch.
pub fn load_source(source: &InputSource) -> Result<Assembly<String>> {
    let bytes = read_source(source)?;
    let name = source.display_name();
    decode::load(name.clone(), bytes.as_slice())
        .with_context(|| format!("failed to decode result document: {name}"))
}

fn read_source(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .context("failed to read result document from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => std::fs::read(path)
            .with_context(|| format!("failed to read result document: {}", path.display())),
    }
}
