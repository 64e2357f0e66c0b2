//! Reconstruct command implementation

use super::{read_input, write_output};
use crate::sanitization::models::DummyMapping;
use crate::sanitization::reconstruct::reconstruct;
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments for the reconstruct command
#[derive(Args, Debug)]
pub struct ReconstructArgs {
    /// Sanitized text file, or `-` for stdin
    pub input: String,

    /// Mapping JSON, either a bare mapping or a full `sanitize` result
    #[arg(short, long)]
    pub mapping: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReconstructArgs {
    /// Execute the reconstruct command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let mapping = load_mapping(&self.mapping)?;
        let sanitized = read_input(&self.input)?;

        tracing::debug!(placeholders = mapping.len(), "Reconstructing text");

        let restored = reconstruct(&sanitized, &mapping);
        write_output(self.output.as_deref(), &restored)?;

        eprintln!("✅ Restored {} placeholders", mapping.len());
        Ok(0)
    }
}

/// Read a mapping file, accepting a `sanitize` result document as well
fn load_mapping(path: &Path) -> anyhow::Result<DummyMapping> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in mapping file: {}", path.display()))?;

    let is_document = value.get("sanitized").is_some() && value.get("mapping").is_some();
    let mapping_value = if is_document {
        value["mapping"].clone()
    } else {
        value
    };

    serde_json::from_value(mapping_value)
        .with_context(|| format!("Mapping must be an object of strings: {}", path.display()))
}
