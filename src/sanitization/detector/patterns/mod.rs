//! Ordered pattern table for the regex detector

use crate::domain::{Result, SniffError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Entity label reported for matches
    pub label: String,
    /// Regex source
    pub pattern: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Compiled pattern with its label
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    patterns: Vec<PatternDefinition>,
}

/// Pattern registry, kept in table order
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Load a pattern table from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SniffError::Configuration(format!(
                "Failed to read pattern library {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and compile a pattern table from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            SniffError::Configuration(format!("Failed to parse pattern library TOML: {e}"))
        })?;

        if library.patterns.is_empty() {
            return Err(SniffError::Configuration(
                "Pattern library defines no patterns".to_string(),
            ));
        }

        let mut patterns = Vec::with_capacity(library.patterns.len());
        for def in library.patterns {
            if def.label.trim().is_empty() {
                return Err(SniffError::Configuration(format!(
                    "Pattern '{}' has an empty label",
                    def.pattern
                )));
            }
            let regex = Regex::new(&def.pattern).map_err(|e| {
                SniffError::Configuration(format!(
                    "Invalid regex for label '{}': {}",
                    def.label, e
                ))
            })?;
            patterns.push(CompiledPattern {
                regex,
                label: def.label,
            });
        }

        Ok(Self { patterns })
    }

    /// Built-in pattern table
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All patterns in table order
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Distinct labels in table order
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for pattern in &self.patterns {
            if !labels.contains(&pattern.label.as_str()) {
                labels.push(&pattern.label);
            }
        }
        labels
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_load_in_order() {
        let registry = PatternRegistry::default_patterns().unwrap();
        assert_eq!(
            registry.labels(),
            vec![
                "email",
                "ssn",
                "credit_card",
                "phone",
                "zipcode",
                "date",
                "ipv4",
                "ipv6",
                "url",
                "name"
            ]
        );
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let toml = r#"
[[patterns]]
label = "broken"
pattern = "(unclosed"
"#;
        let err = PatternRegistry::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_empty_library_is_rejected() {
        assert!(PatternRegistry::from_toml("").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PatternRegistry::from_file("/nonexistent/patterns.toml").unwrap_err();
        assert!(matches!(err, SniffError::Configuration(_)));
    }
}
