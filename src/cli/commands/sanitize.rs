//! Sanitize command implementation
//!
//! Runs detection and masking over one input and writes the result as the
//! full JSON document, the sanitized text alone, or the sanitized text with
//! masked spans marked.

use super::{read_input, write_output};
use crate::cli::Cli;
use crate::sanitization::highlight::{highlight_spans, render_marked};
use crate::sanitization::models::{CandidateSpan, DetectionMethod, SanitizedDocument};
use crate::sanitization::SanitizationEngine;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full result document as pretty JSON
    Json,
    /// Sanitized text only
    Text,
    /// Sanitized text with masked spans wrapped in [[ ]]
    Marked,
}

/// Arguments for the sanitize command
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Input file, or `-` for stdin
    pub input: String,

    /// Detection method (llm, regex); defaults to application.default_method
    #[arg(short, long)]
    pub method: Option<DetectionMethod>,

    /// Mask the spans in this JSON file instead of running a detector
    #[arg(long, conflicts_with = "method")]
    pub candidates: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Also write the placeholder mapping to this JSON file
    #[arg(long)]
    pub mapping_out: Option<PathBuf>,
}

impl SanitizeArgs {
    /// Execute the sanitize command
    pub async fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let config = match cli.load_config() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let engine = match SanitizationEngine::new(&config) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ Failed to initialize sanitization engine");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let text = read_input(&self.input)?;

        let document = match self.candidates {
            Some(ref path) => {
                let candidates = load_candidates(path)?;
                engine.mask_candidates(&text, candidates)?
            }
            None => engine.sanitize(&text, self.method).await?,
        };

        write_output(self.output.as_deref(), &self.render(&document)?)?;

        if let Some(ref path) = self.mapping_out {
            let mapping = serde_json::to_string_pretty(&document.mapping)
                .context("Failed to serialize mapping")?;
            std::fs::write(path, mapping)
                .with_context(|| format!("Failed to write mapping file: {}", path.display()))?;
        }

        if document.detection_failed() {
            let reason = document
                .detection
                .as_ref()
                .and_then(|d| d.error.as_deref())
                .unwrap_or("unknown error");
            eprintln!("⚠️  Detection failed, text was not masked: {reason}");
            return Ok(1);
        }

        eprintln!(
            "✅ Masked {} entities ({} ms)",
            document.total_entities(),
            document.processing_time_ms
        );
        Ok(0)
    }

    fn render(&self, document: &SanitizedDocument) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(document)
                    .context("Failed to serialize result")?;
                json.push('\n');
                json
            }
            OutputFormat::Text => document.sanitized.clone(),
            OutputFormat::Marked => {
                let spans = highlight_spans(&document.sanitized, &document.entities);
                render_marked(&document.sanitized, &spans, "[[", "]]")
            }
        })
    }
}

fn load_candidates(path: &Path) -> anyhow::Result<Vec<CandidateSpan>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidates file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid candidates file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitization::masker::mask_text;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(format: OutputFormat) -> SanitizeArgs {
        SanitizeArgs {
            input: "-".to_string(),
            method: None,
            candidates: None,
            output: None,
            format,
            mapping_out: None,
        }
    }

    fn document() -> SanitizedDocument {
        let text = "Hi Bob";
        SanitizedDocument::new(
            "req".to_string(),
            None,
            text.to_string(),
            mask_text(text, vec![CandidateSpan::new(3, 6, "name", "Bob")]),
            None,
            0,
        )
    }

    #[test]
    fn test_render_text_and_marked() {
        let doc = document();
        assert_eq!(args(OutputFormat::Text).render(&doc).unwrap(), "Hi nam");
        assert_eq!(args(OutputFormat::Marked).render(&doc).unwrap(), "Hi [[nam]]");
    }

    #[test]
    fn test_render_json() {
        let json = args(OutputFormat::Json).render(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sanitized"], "Hi nam");
        assert_eq!(value["mapping"]["nam"], "Bob");
    }

    #[test]
    fn test_load_candidates() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"start": 3, "end": 6, "label": "name", "text": "Bob"}]"#)
            .unwrap();
        file.flush().unwrap();

        let candidates = load_candidates(file.path()).unwrap();
        assert_eq!(candidates, vec![CandidateSpan::new(3, 6, "name", "Bob")]);
    }
}
