//! Logging and observability
//!
//! Log output goes to stderr so that stdout can carry the export document.
//! Optionally, JSON logs are also written to a rotating local file.
//!
//! # Example
//!
//! ```no_run
//! use nomad_export::logging::init_logging;
//! use nomad_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a namespace export
///
/// # Example
///
/// ```no_run
/// use nomad_export::log_namespace_start;
/// use nomad_export::domain::NamespaceName;
///
/// let namespace = NamespaceName::new("default").unwrap();
/// log_namespace_start!(&namespace);
/// ```
#[macro_export]
macro_rules! log_namespace_start {
    ($namespace:expr) => {
        tracing::info!(namespace = %$namespace, "Exporting namespace");
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use nomad_export::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(3, 42, Duration::from_secs(2));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($namespaces:expr, $jobs:expr, $duration:expr) => {
        tracing::info!(
            namespaces = $namespaces,
            jobs = $jobs,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}
