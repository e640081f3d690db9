//! Core business logic for nomad-export.
//!
//! # Modules
//!
//! - [`export`] - Namespace and job traversal, exclusion set, run summary
//! - [`output`] - Rendering and writing the export document
//!
//! # Export Workflow
//!
//! 1. **List namespaces** from the Nomad API
//! 2. **List jobs** in each namespace
//! 3. **Fetch** each job's full definition
//! 4. **Assemble** the nested document, or fail on the first error
//! 5. **Write** the document as indented JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use nomad_export::adapters::nomad::NomadClient;
//! use nomad_export::config::load_config_or_default;
//! use nomad_export::core::export::{ExclusionSet, Exporter};
//! use nomad_export::core::output::write_document;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default(None)?;
//! let client = NomadClient::new(&config.nomad).await?;
//! let exclusions = ExclusionSet::from_names(&config.export.exclude)?;
//!
//! let exporter = Exporter::new(Arc::new(client), exclusions);
//! let (document, summary) = exporter.export_with_summary().await?;
//!
//! write_document(&document, config.export.output_path())?;
//! println!("Exported {} jobs", summary.total_jobs);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod output;
