//! CLI command implementations

pub mod init;
pub mod reconstruct;
pub mod sanitize;
pub mod validate;

use anyhow::Context;
use std::io::{Read, Write};
use std::path::Path;

/// Read a whole input file, or stdin when `path` is `-`
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the command.
pub(crate) fn read_input(path: &str) -> anyhow::Result<String> {
    let bytes = if path == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read input file: {path}"))?
    };
    Ok(decode_input(bytes))
}

fn decode_input(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::warn!(
                bytes = bytes.len(),
                "Input is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}
