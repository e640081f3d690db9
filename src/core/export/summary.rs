//! Export summary and reporting

use crate::core::export::exclusion::ExclusionSet;
use crate::domain::ExportDocument;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of one export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of namespaces in the document
    pub total_namespaces: usize,

    /// Number of jobs across all namespaces
    pub total_jobs: usize,

    /// Categories excluded from the export
    pub excluded: Vec<String>,

    /// When the export started
    pub started_at: DateTime<Utc>,

    /// When the export finished
    pub completed_at: Option<DateTime<Utc>>,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new summary, stamped with the current time
    pub fn new(exclusions: &ExclusionSet) -> Self {
        Self {
            total_namespaces: 0,
            total_jobs: 0,
            excluded: exclusions.iter().map(|t| t.to_string()).collect(),
            started_at: Utc::now(),
            completed_at: None,
            duration: Duration::from_secs(0),
        }
    }

    /// Record the counts of a finished document
    pub fn record(&mut self, document: &ExportDocument) {
        self.total_namespaces = document.namespace_count();
        self.total_jobs = document.job_count();
    }

    /// Mark the summary complete
    pub fn finish(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self.completed_at = Some(Utc::now());
        self
    }

    /// Jobs exported per second
    pub fn jobs_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total_jobs as f64 / secs
    }
}
