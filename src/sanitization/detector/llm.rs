//! Model-backed detector
//!
//! Sends the rendered prompt to an Ollama-compatible `/api/generate`
//! endpoint and reads the entity list out of the model's free-text answer.
//! The model only reports literals, so offsets are recovered by
//! first-occurrence search in the source text.

use super::prompt::{PromptTemplate, RuleSet};
use super::{Detection, EntityDetector};
use crate::config::{ApiToken, LlmConfig};
use crate::domain::{DetectorError, Result, SniffError};
use crate::sanitization::models::CandidateSpan;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const REQUIRED_FIELDS: [&str; 4] = ["type", "text", "category", "replacement"];

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Detector backed by a local model server
pub struct LlmDetector {
    client: Client,
    generate_url: String,
    model: String,
    api_key: Option<ApiToken>,
    prompt: PromptTemplate,
    timeout: Duration,
}

impl LlmDetector {
    /// Build the detector from configuration
    ///
    /// Loads the rules file named in the configuration, or the built-in
    /// rules, and renders the prompt template once.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let rules = match config.rules_file {
            Some(ref path) => RuleSet::from_file(path)?,
            None => RuleSet::default_rules()?,
        };
        Self::with_rules(config, &rules)
    }

    /// Build the detector with an explicit rule set
    pub fn with_rules(config: &LlmConfig, rules: &RuleSet) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .build()
            .map_err(|e| SniffError::Detection(DetectorError::Build(e.to_string())))?;

        Ok(Self {
            client,
            generate_url: config.generate_url(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            prompt: PromptTemplate::new(rules),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One generate round-trip, returning the model's raw answer
    async fn generate(&self, text: &str) -> std::result::Result<String, DetectorError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: self.prompt.render(text),
            stream: false,
        };

        let mut request = self.client.post(&self.generate_url).json(&body);
        if let Some(ref token) = self.api_key {
            request = request.bearer_auth(token.bearer());
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DetectorError::Timeout(format!("no answer within {}s", self.timeout.as_secs()))
            } else {
                DetectorError::ConnectionFailed(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = resp.text().await.unwrap_or_default();
            return Err(DetectorError::ServerError {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let generated: GenerateResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                DetectorError::Timeout(format!("no answer within {}s", self.timeout.as_secs()))
            } else {
                DetectorError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(generated.response)
    }
}

#[async_trait]
impl EntityDetector for LlmDetector {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn detect(&self, text: &str) -> Detection {
        let content = match self.generate(text).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    "Model backend request failed, continuing with no detections"
                );
                return Detection::failed(e);
            }
        };

        match parse_entities(text, &content) {
            Ok((spans, unlocatable)) => {
                tracing::debug!(
                    detector = self.name(),
                    candidates = spans.len(),
                    unlocatable = unlocatable,
                    "Model answer parsed"
                );
                Detection::completed(spans).with_unlocatable(unlocatable)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    answer_len = content.len(),
                    "Failed to parse entity list from model answer, continuing with no detections"
                );
                Detection::failed(e)
            }
        }
    }
}

/// Slice from the first `[` to the last `]`, if both exist in that order
fn extract_json_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    (end > start).then(|| &content[start..=end])
}

/// Parse the model's answer into located candidate spans
///
/// Returns the spans and the number of reported entities that were skipped
/// for missing fields or text that does not occur in `source`.
pub fn parse_entities(
    source: &str,
    content: &str,
) -> std::result::Result<(Vec<CandidateSpan>, usize), DetectorError> {
    let json_text = extract_json_array(content)
        .ok_or_else(|| DetectorError::MalformedEntities("no JSON array in answer".to_string()))?;

    let reported: Vec<Value> = serde_json::from_str(json_text)
        .map_err(|e| DetectorError::MalformedEntities(e.to_string()))?;

    let mut spans = Vec::with_capacity(reported.len());
    let mut skipped = 0;

    for item in &reported {
        let complete = item
            .as_object()
            .is_some_and(|obj| REQUIRED_FIELDS.iter().all(|k| obj.contains_key(*k)));
        if !complete {
            skipped += 1;
            continue;
        }

        let (Some(label), Some(literal)) = (item["type"].as_str(), item["text"].as_str()) else {
            skipped += 1;
            continue;
        };

        match CandidateSpan::locate(source, label, literal) {
            Some(span) => spans.push(span),
            None => skipped += 1,
        }
    }

    Ok((spans, skipped))
}
