//! Export traversal and aggregation
//!
//! This module provides the core export logic, including:
//! - The export engine that walks namespaces and jobs
//! - The exclusion vocabulary
//! - Summary and reporting

pub mod exclusion;
pub mod exporter;
pub mod summary;

pub use exclusion::{DataType, ExclusionSet};
pub use exporter::Exporter;
pub use summary::ExportSummary;
