//! Domain models and types for nomad-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed keys** ([`NamespaceName`], [`JobId`])
//! - **Opaque API records** ([`NamespaceRecord`], [`JobStub`], [`JobDefinition`])
//! - **The export document** ([`ExportDocument`], [`NamespaceEntry`], [`JobEntry`])
//! - **Error types** ([`NomadExportError`], [`NomadError`], [`ExportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Opaque records
//!
//! Nomad's namespace and job payloads are carried through as raw JSON. The
//! export never rewrites them:
//!
//! ```rust
//! use nomad_export::domain::JobStub;
//! use serde_json::json;
//!
//! let stub = JobStub::new(json!({"ID": "job-1", "Name": "web", "Status": "running"}));
//! assert_eq!(stub.id(), Some("job-1"));
//! assert_eq!(stub.as_value()["Status"], "running");
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{ExportDocument, JobEntry, NamespaceEntry};
pub use errors::{ExportError, NomadError, NomadExportError};
pub use ids::{JobId, NamespaceName};
pub use records::{JobDefinition, JobStub, NamespaceRecord};
pub use result::Result;
