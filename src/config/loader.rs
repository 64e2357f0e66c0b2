//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SniffConfig;
use super::secret::ApiToken;
use crate::domain::errors::SniffError;
use crate::domain::result::Result;
use regex::Regex;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SniffConfig
/// 4. Applies environment variable overrides (SNIFFNMASK_* prefix, plus
///    `OLLAMA_HOST` and `MODEL_NAME`)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`SniffError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, an override has an invalid value,
/// or validation fails.
///
/// # Examples
///
/// ```no_run
/// use sniffnmask::config::loader::load_config;
///
/// let config = load_config("sniffnmask.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SniffConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SniffError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SniffError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents, env_lookup)
}

/// Loads configuration from `path` if given, otherwise from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<SniffConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = SniffConfig::default();
            apply_overrides(&mut config, env_lookup)?;
            validate(&config)?;
            Ok(config)
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_config<F>(contents: &str, lookup: F) -> Result<SniffConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let contents = substitute_vars(contents, &lookup)?;

    let mut config: SniffConfig = toml::from_str(&contents)
        .map_err(|e| SniffError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_overrides(&mut config, &lookup)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SniffConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| SniffError::Configuration(format!("Configuration validation failed: {e}")))
}

/// Substitutes variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in
/// one error.
fn substitute_vars<F>(input: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SniffError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match lookup(var_name) {
                Some(value) => value,
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
    }

    if !missing_vars.is_empty() {
        return Err(SniffError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| {
        SniffError::Configuration(format!("Invalid value '{value}' for {key}: {e}"))
    })
}

/// Applies overrides using the SNIFFNMASK_<SECTION>_<KEY> pattern
///
/// `OLLAMA_HOST` and `MODEL_NAME` are honoured for the model backend, with
/// the `SNIFFNMASK_LLM_*` variables taking precedence.
fn apply_overrides<F>(config: &mut SniffConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    // Application overrides
    if let Some(val) = lookup("SNIFFNMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val.trim().to_lowercase();
    }
    if let Some(val) = lookup("SNIFFNMASK_APPLICATION_DEFAULT_METHOD") {
        config.application.default_method =
            parse_override("SNIFFNMASK_APPLICATION_DEFAULT_METHOD", &val)?;
    }

    // Model backend overrides
    if let Some(val) = lookup("OLLAMA_HOST") {
        config.llm.base_url = val;
    }
    if let Some(val) = lookup("SNIFFNMASK_LLM_BASE_URL") {
        config.llm.base_url = val;
    }
    if let Some(val) = lookup("MODEL_NAME") {
        config.llm.model = val;
    }
    if let Some(val) = lookup("SNIFFNMASK_LLM_MODEL") {
        config.llm.model = val;
    }
    if let Some(val) = lookup("SNIFFNMASK_LLM_TIMEOUT_SECONDS") {
        config.llm.timeout_seconds = parse_override("SNIFFNMASK_LLM_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = lookup("SNIFFNMASK_LLM_RULES_FILE") {
        config.llm.rules_file = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("SNIFFNMASK_LLM_API_KEY") {
        config.llm.api_key = ApiToken::new(val);
    }

    // Regex overrides
    if let Some(val) = lookup("SNIFFNMASK_REGEX_PATTERN_LIBRARY") {
        config.regex.pattern_library = Some(PathBuf::from(val));
    }

    // Masking overrides
    if let Some(val) = lookup("SNIFFNMASK_MASKING_OVERLAP_POLICY") {
        config.masking.overlap_policy = parse_override("SNIFFNMASK_MASKING_OVERLAP_POLICY", &val)?;
    }

    // Audit overrides
    if let Some(val) = lookup("SNIFFNMASK_AUDIT_ENABLED") {
        config.audit.enabled = parse_override("SNIFFNMASK_AUDIT_ENABLED", &val)?;
    }
    if let Some(val) = lookup("SNIFFNMASK_AUDIT_LOG_PATH") {
        config.audit.log_path = PathBuf::from(val);
    }
    if let Some(val) = lookup("SNIFFNMASK_AUDIT_JSON_FORMAT") {
        config.audit.json_format = parse_override("SNIFFNMASK_AUDIT_JSON_FORMAT", &val)?;
    }

    // Logging overrides
    if let Some(val) = lookup("SNIFFNMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("SNIFFNMASK_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = lookup("SNIFFNMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = lookup("SNIFFNMASK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val.trim().to_lowercase();
    }

    Ok(())
}
