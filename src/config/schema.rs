//! Configuration schema types
//!
//! This module defines the configuration structure for nomad-export. Every
//! section has defaults so the tool runs without a configuration file.

use crate::config::SecretString;
use crate::core::export::ExclusionSet;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main nomad-export configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NomadExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Nomad server connection settings
    #[serde(default)]
    pub nomad: NomadConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NomadExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.nomad.validate(&self.environment)?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error, off)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Nomad server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NomadConfig {
    /// Address of the Nomad server
    #[serde(default = "default_address")]
    pub address: String,

    /// ACL token SecretID sent as `X-Nomad-Token`
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// File holding the ACL token, read when `token` is unset
    #[serde(default)]
    pub token_file: Option<String>,

    /// PEM encoded CA certificate used to verify the server
    #[serde(default)]
    pub ca_cert: Option<String>,

    /// Directory of PEM encoded CA certificates; ignored if `ca_cert` is set
    #[serde(default)]
    pub ca_path: Option<String>,

    /// PEM encoded client certificate, requires `client_key`
    #[serde(default)]
    pub client_cert: Option<String>,

    /// Unencrypted PEM encoded key for `client_cert`
    #[serde(default)]
    pub client_key: Option<String>,

    /// Server name used for SNI and certificate verification
    #[serde(default)]
    pub tls_server_name: Option<String>,

    /// Skip TLS certificate verification
    ///
    /// **SECURITY WARNING**: only for development. Rejected in production.
    #[serde(default)]
    pub tls_skip_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NomadConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("nomad.address cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.address)
            .map_err(|e| format!("nomad.address '{}' is not a valid URL: {e}", self.address))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("nomad.address must start with http:// or https://".to_string());
        }

        if self.client_cert.is_some() != self.client_key.is_some() {
            return Err(
                "nomad.client_cert and nomad.client_key must be specified together".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("nomad.timeout_seconds must be > 0".to_string());
        }

        if *environment == Environment::Production && self.tls_skip_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Provide a CA certificate using 'ca_cert' or 'ca_path' instead."
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for NomadConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            token: None,
            token_file: None,
            ca_cert: None,
            ca_path: None,
            client_cert: None,
            client_key: None,
            tls_server_name: None,
            tls_skip_verify: false,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output file path; `-` or unset writes to stdout
    #[serde(default)]
    pub output: Option<String>,

    /// Data types to exclude from the export
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Job definitions fetched concurrently within one namespace
    #[serde(default = "default_job_concurrency")]
    pub job_concurrency: usize,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        ExclusionSet::from_names(&self.exclude).map_err(|e| format!("export.exclude: {e}"))?;

        if self.job_concurrency == 0 || self.job_concurrency > 64 {
            return Err(format!(
                "export.job_concurrency must be between 1 and 64, got {}",
                self.job_concurrency
            ));
        }

        Ok(())
    }

    /// Returns the output path, or `None` when writing to stdout
    pub fn output_path(&self) -> Option<&str> {
        match self.output.as_deref() {
            None | Some("") | Some("-") => None,
            Some(path) => Some(path),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: None,
            exclude: Vec::new(),
            job_concurrency: default_job_concurrency(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_address() -> String {
    "http://127.0.0.1:4646".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_job_concurrency() -> usize {
    1
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
