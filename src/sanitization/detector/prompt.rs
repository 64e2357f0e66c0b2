//! Prompt rules and the instruction template for the model-backed detector
//!
//! Rules are loaded once when the detector is built and the prompt is
//! assembled around them immediately; only the input text varies per call.

use crate::domain::{Result, SniffError};
use serde::Deserialize;
use std::path::Path;

/// A named group of free-text instructions
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizationRule {
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<SanitizationRule>,
}

/// Ordered instruction rules injected into the prompt
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<SanitizationRule>,
}

impl RuleSet {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SniffError::Configuration(format!(
                "Failed to read rules file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: RuleFile = toml::from_str(content)
            .map_err(|e| SniffError::Configuration(format!("Failed to parse rules TOML: {e}")))?;
        Ok(Self { rules: file.rules })
    }

    /// Built-in rules
    pub fn default_rules() -> Result<Self> {
        Self::from_toml(include_str!("../../../rules/sanitization_rules.toml"))
    }

    pub fn rules(&self) -> &[SanitizationRule] {
        &self.rules
    }

    /// Every non-blank instruction as a `- ` bullet, one per line
    pub fn render_bullets(&self) -> String {
        self.rules
            .iter()
            .flat_map(|rule| rule.instructions.iter())
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const PREAMBLE: &str = "\nYou are a data sanitizer AI.\n\nFollow these rules to sanitize input text:\n";

const BODY: &str = r#"

Your job is to identify **all personal or sensitive entities** in the given text and return each entity as a JSON object.

Each JSON object MUST include:
- "type" - one of: name, email, phone, address, credit_card, ssn, zipcode, date, ipv4, ipv6, url
- "text" - the EXACT value from the input (verbatim)
- "category" - mask
- "replacement" - the sanitized version of "text"

Important Notes:
- Names include both single and full names (e.g., "Rebecca", "Rebecca Adams").
- Always mask all phone numbers, including those with dashes, spaces, or parentheses.
- Phone numbers can be in formats such as: 415-867-5309, (415) 867-5309, +1 415 867 5309.
- Do NOT mask common short words such as greetings ("Hi", "Hello") or filler words.
- Return entities in order of appearance.
- Do not miss masking any detected entities.

Examples:

Input:
Customer: Hi, this is Rebecca Adams. I called earlier but got disconnected.
Customer: My email is rebecca.adams1985@gmail.com.
Customer: My phone number is 415-867-5309.

Output:
[
  { "type": "name", "text": "Rebecca Adams", "category": "mask", "replacement": "User" },
  { "type": "email", "text": "rebecca.adams1985@gmail.com", "category": "mask", "replacement": "user@example.com" },
  { "type": "phone", "text": "415-867-5309", "category": "mask", "replacement": "XXX-XXX-XXXX" }
]

Now use the same format.

Text:
"#;

const SUFFIX: &str = "\n\nReturn ONLY a JSON array. Do NOT include commentary or explanation.\n";

/// Instruction template with the rules already rendered in
///
/// The input text is appended verbatim, so braces or other template-like
/// sequences in user input are never interpreted.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    prefix: String,
}

impl PromptTemplate {
    pub fn new(rules: &RuleSet) -> Self {
        let bullets = rules.render_bullets();
        let mut prefix = String::with_capacity(PREAMBLE.len() + bullets.len() + BODY.len());
        prefix.push_str(PREAMBLE);
        prefix.push_str(&bullets);
        prefix.push_str(BODY);
        Self { prefix }
    }

    /// Full prompt for one input text
    pub fn render(&self, text: &str) -> String {
        let mut prompt = String::with_capacity(self.prefix.len() + text.len() + SUFFIX.len());
        prompt.push_str(&self.prefix);
        prompt.push_str(text);
        prompt.push_str(SUFFIX);
        prompt
    }
}
