//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::NomadExportConfig;
use super::secret::secret_string;
use crate::domain::errors::NomadExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into NomadExportConfig
/// 4. Applies environment variable overrides (`NOMAD_*` and `NOMAD_EXPORT_*`)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is unset, TOML parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use nomad_export::config::loader::load_config;
///
/// let config = load_config("nomad-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NomadExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NomadExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NomadExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: NomadExportConfig = toml::from_str(&contents)
        .map_err(|e| NomadExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from `path` if given, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&str>) -> Result<NomadExportConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = NomadExportConfig::default();
            finish(&mut config)?;
            Ok(config)
        }
    }
}

fn finish(config: &mut NomadExportConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        NomadExportError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in a
/// single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| NomadExportError::Configuration(format!("Invalid substitution regex: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NomadExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// Connection settings use the standard Nomad CLI variables (`NOMAD_ADDR`,
/// `NOMAD_TOKEN`, `NOMAD_CACERT`, ...). Tool settings use `NOMAD_EXPORT_*`.
fn apply_env_overrides(config: &mut NomadExportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("NOMAD_EXPORT_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Nomad connection overrides
    if let Ok(val) = std::env::var("NOMAD_ADDR") {
        config.nomad.address = val;
    }
    if let Ok(val) = std::env::var("NOMAD_TOKEN") {
        config.nomad.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("NOMAD_CACERT") {
        config.nomad.ca_cert = Some(val);
    }
    if let Ok(val) = std::env::var("NOMAD_CAPATH") {
        config.nomad.ca_path = Some(val);
    }
    if let Ok(val) = std::env::var("NOMAD_CLIENT_CERT") {
        config.nomad.client_cert = Some(val);
    }
    if let Ok(val) = std::env::var("NOMAD_CLIENT_KEY") {
        config.nomad.client_key = Some(val);
    }
    if let Ok(val) = std::env::var("NOMAD_TLS_SERVER_NAME") {
        config.nomad.tls_server_name = Some(val);
    }
    if let Ok(val) = std::env::var("NOMAD_SKIP_VERIFY") {
        config.nomad.tls_skip_verify = parse_bool(&val).unwrap_or(false);
    }

    // Export overrides
    if let Ok(val) = std::env::var("NOMAD_EXPORT_OUTPUT") {
        config.export.output = Some(val);
    }
    if let Ok(val) = std::env::var("NOMAD_EXPORT_JOB_CONCURRENCY") {
        config.export.job_concurrency = val.trim().parse().map_err(|_| {
            NomadExportError::Configuration(format!(
                "NOMAD_EXPORT_JOB_CONCURRENCY must be a positive integer, got '{val}'"
            ))
        })?;
    }

    Ok(())
}

/// Parses the boolean spellings Nomad accepts for `NOMAD_SKIP_VERIFY`
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
