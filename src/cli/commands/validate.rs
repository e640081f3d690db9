//! Validate config command implementation
//!
//! This module implements the `validate-config` command: load configuration
//! from file and environment, validate it and optionally check that the Nomad
//! server is reachable.

use crate::adapters::nomad::NomadClient;
use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Also connect to Nomad and check for a cluster leader
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("(defaults and environment)");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Nomad Address: {}", config.nomad.address);
        println!(
            "  ACL Token: {}",
            if config.nomad.token.is_some() {
                "set"
            } else if config.nomad.token_file.is_some() {
                "from file"
            } else {
                "none"
            }
        );
        if let Some(ca_cert) = &config.nomad.ca_cert {
            println!("  CA Certificate: {ca_cert}");
        } else if let Some(ca_path) = &config.nomad.ca_path {
            println!("  CA Directory: {ca_path}");
        }
        if let Some(server_name) = &config.nomad.tls_server_name {
            println!("  TLS Server Name: {server_name}");
        }
        println!(
            "  Output: {}",
            config.export.output_path().unwrap_or("stdout")
        );
        if !config.export.exclude.is_empty() {
            println!("  Excluded: {}", config.export.exclude.join(", "));
        }
        println!("  Job Concurrency: {}", config.export.job_concurrency);
        println!();

        if !self.check_connection {
            return Ok(0);
        }

        let client = match NomadClient::new(&config.nomad).await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to create Nomad client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match client.health_check().await {
            Ok(()) => {
                println!("✅ Connected to Nomad at {}", config.nomad.address);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to connect to Nomad at {}", config.nomad.address);
                println!("   Error: {e}");
                Ok(4)
            }
        }
    }
}
