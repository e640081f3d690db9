//! Domain error types
//!
//! This module defines the error hierarchy for nomad-export.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main nomad-export error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum NomadExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Nomad API errors raised outside of a traversal
    #[error("Nomad error: {0}")]
    Nomad(#[from] NomadError),

    /// Traversal errors, already wrapped with namespace/job context
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Nomad API errors
///
/// Errors that occur when talking to the Nomad HTTP API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NomadError {
    /// Failed to reach the Nomad server
    #[error("Failed to connect to Nomad server: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

/// Errors raised while walking namespaces and jobs
///
/// Each variant names the traversal step that failed so the failure can be
/// located without dumping the document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("error listing namespaces: {source}")]
    ListNamespaces {
        #[source]
        source: NomadError,
    },

    #[error("error exporting namespace {namespace}: {source}")]
    Namespace {
        namespace: String,
        #[source]
        source: Box<ExportError>,
    },

    #[error("error listing jobs for namespace {namespace}: {source}")]
    ListJobs {
        namespace: String,
        #[source]
        source: NomadError,
    },

    #[error("error getting job {job_name} ({job_id}) definition in namespace {namespace}: {source}")]
    GetJob {
        namespace: String,
        job_id: String,
        job_name: String,
        #[source]
        source: NomadError,
    },

    /// A record returned by the server lacks the field used to key it
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl ExportError {
    /// Wraps this error with the namespace being exported
    pub fn in_namespace(self, namespace: impl Into<String>) -> Self {
        ExportError::Namespace {
            namespace: namespace.into(),
            source: Box::new(self),
        }
    }

    /// Returns the underlying Nomad error, if the failure came from the API
    pub fn nomad_error(&self) -> Option<&NomadError> {
        match self {
            ExportError::ListNamespaces { source }
            | ExportError::ListJobs { source, .. }
            | ExportError::GetJob { source, .. } => Some(source),
            ExportError::Namespace { source, .. } => source.nomad_error(),
            ExportError::InvalidRecord(_) => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for NomadExportError {
    fn from(err: std::io::Error) -> Self {
        NomadExportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for NomadExportError {
    fn from(err: serde_json::Error) -> Self {
        NomadExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for NomadExportError {
    fn from(err: toml::de::Error) -> Self {
        NomadExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
