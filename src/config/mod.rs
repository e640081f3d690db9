//! Configuration management for nomad-export.
//!
//! Configuration comes from three layers, later layers winning:
//!
//! 1. An optional TOML file (`--config`), with `${VAR_NAME}` substitution
//! 2. Environment variables: the standard Nomad CLI set (`NOMAD_ADDR`,
//!    `NOMAD_TOKEN`, `NOMAD_CACERT`, `NOMAD_CAPATH`, `NOMAD_CLIENT_CERT`,
//!    `NOMAD_CLIENT_KEY`, `NOMAD_TLS_SERVER_NAME`, `NOMAD_SKIP_VERIFY`) plus
//!    `NOMAD_EXPORT_*` for tool settings
//! 3. Command-line flags
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [nomad]
//! address = "https://nomad.example.com:4646"
//! token = "${NOMAD_TOKEN}"
//! ca_cert = "/etc/nomad.d/ca.pem"
//!
//! [export]
//! output = "nomad-backup.json"
//! exclude = ["acls"]
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nomad_export::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default(Some("nomad-export.toml"))?;
//! println!("Nomad address: {}", config.nomad.address);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, Environment, ExportConfig, LoggingConfig, NomadConfig, NomadExportConfig,
};
pub use secret::{read_token_file, secret_string, SecretString, SecretValue};
