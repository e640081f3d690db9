//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for nomad-export using clap.

pub mod commands;

use crate::config::NomadExportConfig;
use clap::{Parser, Subcommand};

/// nomad-export - Nomad namespace and job snapshot tool
#[derive(Parser, Debug)]
#[command(name = "nomad-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "NOMAD_EXPORT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all namespaces and job definitions as JSON
    Export(commands::export::ExportArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Cli {
    /// Effective log level
    ///
    /// `--verbose`/`--silent` on export win, then `--log-level`, then the
    /// configured level.
    pub fn effective_log_level(&self, config: &NomadExportConfig) -> String {
        if let Commands::Export(args) = &self.command {
            if args.verbose {
                return "debug".to_string();
            }
            if args.silent {
                return "off".to_string();
            }
        }

        self.log_level
            .clone()
            .unwrap_or_else(|| config.application.log_level.clone())
    }
}
