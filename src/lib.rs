// nomad-export - Nomad namespace and job snapshot tool
// Copyright (c) 2025 nomad-export Contributors
// Licensed under the MIT License

//! # nomad-export - Nomad namespace and job snapshot
//!
//! nomad-export walks every namespace of a Nomad cluster, fetches the full
//! definition of every job in it, and writes the result as one JSON document
//! suitable for backup, audit or diffing between runs.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export traversal, exclusion set, output writer
//! - [`adapters`] - Nomad HTTP API client
//! - [`domain`] - Identifiers, records, the export document and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nomad_export::adapters::nomad::NomadClient;
//! use nomad_export::config::NomadConfig;
//! use nomad_export::core::export::{ExclusionSet, Exporter};
//! use nomad_export::core::output::render;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NomadClient::new(&NomadConfig::default()).await?;
//!     let exporter = Exporter::new(Arc::new(client), ExclusionSet::new());
//!
//!     let document = exporter.export().await?;
//!     println!("{}", render(&document)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Document Shape
//!
//! ```json
//! {
//!    "namespaces": {
//!       "default": {
//!          "definition": { "Name": "default" },
//!          "jobs": {
//!             "job-1": {
//!                "info": { "ID": "job-1", "Name": "web" },
//!                "definition": { "ID": "job-1", "Name": "web" }
//!             }
//!          }
//!       }
//!    }
//! }
//! ```
//!
//! Records are passed through unchanged. Keys are sorted, so two exports of
//! an unchanged cluster are byte-identical.
//!
//! ## Error Handling
//!
//! A run either produces a complete document or fails with the first error,
//! wrapped with the namespace and job it occurred at:
//!
//! ```text
//! error exporting namespace prod: error getting job web (job-1) definition in namespace prod: Not found: /v1/job/job-1
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
