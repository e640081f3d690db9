//! Export command implementation
//!
//! This module implements the `export` command: snapshot every namespace and
//! job definition from Nomad and write the document as JSON.

use crate::adapters::nomad::NomadClient;
use crate::config::{load_config_or_default, secret_string, NomadExportConfig};
use crate::core::export::{ExclusionSet, Exporter};
use crate::core::output::write_document;
use crate::domain::{NomadExportError, Result};
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// File to write the export to (`-` for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Data type to exclude (acls, catalog, config-entries); repeatable
    #[arg(long, value_name = "TYPE")]
    pub exclude: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "silent")]
    pub verbose: bool,

    /// Disable all logging
    #[arg(short, long)]
    pub silent: bool,

    /// Nomad HTTP API address
    #[arg(long, value_name = "URL")]
    pub address: Option<String>,

    /// Nomad ACL token
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// File containing the Nomad ACL token
    #[arg(long, value_name = "FILE", conflicts_with = "token")]
    pub token_file: Option<String>,

    /// CA certificate used to verify the Nomad server
    #[arg(long, value_name = "FILE")]
    pub ca_cert: Option<String>,

    /// Directory of CA certificates used to verify the Nomad server
    #[arg(long, value_name = "DIR")]
    pub ca_path: Option<String>,

    /// Client certificate for mutual TLS
    #[arg(long, value_name = "FILE", requires = "client_key")]
    pub client_cert: Option<String>,

    /// Client key for mutual TLS
    #[arg(long, value_name = "FILE", requires = "client_cert")]
    pub client_key: Option<String>,

    /// Server name used for SNI and certificate verification
    #[arg(long, value_name = "NAME")]
    pub tls_server_name: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub tls_skip_verify: bool,

    /// Job definitions fetched concurrently within a namespace
    #[arg(long, value_name = "N")]
    pub job_concurrency: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        if let Err(e) = self.resolve(&mut config) {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("{e}");
            return Ok(2);
        }

        let exclusions = match ExclusionSet::from_names(&config.export.exclude) {
            Ok(set) => set,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let client = match NomadClient::new(&config.nomad).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Nomad client");
                eprintln!("Failed to create Nomad client: {e}");
                let code = match e {
                    NomadExportError::Configuration(_) => 2,
                    _ => 4,
                };
                return Ok(code);
            }
        };

        let exporter = Exporter::new(Arc::new(client), exclusions)
            .with_job_concurrency(config.export.job_concurrency);

        let (document, summary) = match exporter.export_with_summary().await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "error exporting data");
                eprintln!("Error exporting data: {e}");
                return Ok(5);
            }
        };

        if let Err(e) = write_document(&document, config.export.output_path()) {
            tracing::error!(error = %e, "Failed to write export");
            eprintln!("{e}");
            return Ok(5);
        }

        if !self.silent {
            eprintln!();
            eprintln!("Export Summary:");
            eprintln!("  Namespaces: {}", summary.total_namespaces);
            eprintln!("  Jobs: {}", summary.total_jobs);
            if !summary.excluded.is_empty() {
                eprintln!("  Excluded: {}", summary.excluded.join(", "));
            }
            eprintln!("  Duration: {:.2}s", summary.duration.as_secs_f64());
            eprintln!("  Throughput: {:.1} jobs/s", summary.jobs_per_second());
        }

        Ok(0)
    }

    /// Apply command-line flags and validate the result
    ///
    /// # Errors
    ///
    /// Returns a validation error if the combined configuration is invalid.
    pub fn resolve(&self, config: &mut NomadExportConfig) -> Result<()> {
        self.apply_overrides(config);
        config.validate().map_err(NomadExportError::Validation)
    }

    /// Apply command-line flags on top of file and environment configuration
    ///
    /// Exclusions given on the command line are added to configured ones.
    /// `--token` wins over `--token-file`; `--token-file` alone replaces any
    /// token from the file or environment.
    pub fn apply_overrides(&self, config: &mut NomadExportConfig) {
        let nomad = &mut config.nomad;

        if let Some(address) = &self.address {
            nomad.address = address.clone();
        }
        if let Some(token) = &self.token {
            nomad.token = Some(secret_string(token.clone()));
        }
        if let (None, Some(token_file)) = (&self.token, &self.token_file) {
            nomad.token = None;
            nomad.token_file = Some(token_file.clone());
        }
        if let Some(ca_cert) = &self.ca_cert {
            nomad.ca_cert = Some(ca_cert.clone());
        }
        if let Some(ca_path) = &self.ca_path {
            nomad.ca_path = Some(ca_path.clone());
        }
        if let Some(client_cert) = &self.client_cert {
            nomad.client_cert = Some(client_cert.clone());
        }
        if let Some(client_key) = &self.client_key {
            nomad.client_key = Some(client_key.clone());
        }
        if let Some(server_name) = &self.tls_server_name {
            nomad.tls_server_name = Some(server_name.clone());
        }
        if self.tls_skip_verify {
            nomad.tls_skip_verify = true;
        }

        let export = &mut config.export;
        if let Some(output) = &self.output {
            export.output = Some(output.clone());
        }
        for name in &self.exclude {
            if !export.exclude.contains(name) {
                export.exclude.push(name.clone());
            }
        }
        if let Some(concurrency) = self.job_concurrency {
            export.job_concurrency = concurrency;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use secrecy::ExposeSecret;

    fn parse(args: &[&str]) -> ExportArgs {
        let argv = ["nomad-export", "export"].iter().chain(args.iter());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Export(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_export_args_defaults() {
        let args = parse(&[]);
        assert!(args.output.is_none());
        assert!(args.exclude.is_empty());
        assert!(!args.verbose);
        assert!(!args.silent);
    }

    #[test]
    fn test_repeated_exclude() {
        let args = parse(&["--exclude", "acls", "--exclude", "catalog"]);
        assert_eq!(args.exclude, vec!["acls", "catalog"]);
    }

    #[test]
    fn test_client_cert_requires_key() {
        let argv = ["nomad-export", "export", "--client-cert", "cli.pem"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = NomadExportConfig::default();
        config.export.exclude = vec!["acls".to_string()];

        let args = parse(&[
            "--address",
            "https://nomad.example.com:4646",
            "--token",
            "cli-token",
            "--output",
            "backup.json",
            "--exclude",
            "acls",
            "--exclude",
            "catalog",
            "--job-concurrency",
            "4",
        ]);
        args.apply_overrides(&mut config);

        assert_eq!(config.nomad.address, "https://nomad.example.com:4646");
        assert_eq!(
            config.nomad.token.as_ref().unwrap().expose_secret().as_str(),
            "cli-token"
        );
        assert_eq!(config.export.output_path(), Some("backup.json"));
        assert_eq!(config.export.exclude, vec!["acls", "catalog"]);
        assert_eq!(config.export.job_concurrency, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_file_replaces_configured_token() {
        let mut config = NomadExportConfig::default();
        config.nomad.token = Some(secret_string("env-token".to_string()));

        parse(&["--token-file", "/run/secrets/nomad"]).apply_overrides(&mut config);

        assert!(config.nomad.token.is_none());
        assert_eq!(config.nomad.token_file.as_deref(), Some("/run/secrets/nomad"));
    }

    #[test]
    fn test_token_and_token_file_conflict() {
        let argv = [
            "nomad-export",
            "export",
            "--token",
            "cli-token",
            "--token-file",
            "/run/secrets/nomad",
        ];
        let err = Cli::try_parse_from(argv).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_token_kept_when_token_file_also_set() {
        let args = ExportArgs {
            token: Some("cli-token".to_string()),
            token_file: Some("/run/secrets/nomad".to_string()),
            ..Default::default()
        };
        let mut config = NomadExportConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(
            config.nomad.token.as_ref().unwrap().expose_secret().as_str(),
            "cli-token"
        );
        assert!(config.nomad.token_file.is_none());
    }

    #[test]
    fn test_resolve_reports_validation_error() {
        let mut config = NomadExportConfig::default();
        let err = parse(&["--job-concurrency", "0"])
            .resolve(&mut config)
            .unwrap_err();

        assert!(matches!(err, NomadExportError::Validation(_)));
        assert!(err.to_string().contains("export.job_concurrency"));
    }

    #[test]
    fn test_invalid_exclude_fails_validation() {
        let mut config = NomadExportConfig::default();
        parse(&["--exclude", "jobs"]).apply_overrides(&mut config);

        let err = config.validate().unwrap_err();
        assert!(err.contains("Value \"jobs\" is not allowed"));
    }

    #[tokio::test]
    async fn test_execute_invalid_exclude_exit_code() {
        let args = parse(&["--exclude", "partitions"]);
        assert_eq!(args.execute(None).await.unwrap(), 2);
    }
}
