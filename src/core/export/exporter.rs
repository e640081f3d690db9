//! Export engine
//!
//! Walks namespaces, then jobs within each namespace, and folds the results
//! into one [`ExportDocument`]. The first failure aborts the whole run; no
//! partially built document ever reaches the caller.

use crate::adapters::nomad::NomadApi;
use crate::core::export::exclusion::ExclusionSet;
use crate::core::export::summary::ExportSummary;
use crate::domain::{
    ExportDocument, ExportError, JobEntry, JobId, JobStub, NamespaceEntry, NamespaceName,
    NamespaceRecord,
};
use crate::{log_export_complete, log_namespace_start};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Export engine
///
/// # Example
///
/// ```no_run
/// use nomad_export::adapters::nomad::NomadClient;
/// use nomad_export::config::NomadConfig;
/// use nomad_export::core::export::{ExclusionSet, Exporter};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NomadClient::new(&NomadConfig::default()).await?;
/// let exporter = Exporter::new(Arc::new(client), ExclusionSet::new());
///
/// let document = exporter.export().await?;
/// println!("{} jobs exported", document.job_count());
/// # Ok(())
/// # }
/// ```
pub struct Exporter {
    client: Arc<dyn NomadApi>,
    exclusions: ExclusionSet,
    job_concurrency: usize,
}

impl Exporter {
    /// Create a new exporter. Performs no I/O.
    pub fn new(client: Arc<dyn NomadApi>, exclusions: ExclusionSet) -> Self {
        Self {
            client,
            exclusions,
            job_concurrency: 1,
        }
    }

    /// Fetch up to `concurrency` job definitions at once within a namespace
    ///
    /// The resulting document does not depend on this setting. Values below
    /// one are treated as one.
    pub fn with_job_concurrency(mut self, concurrency: usize) -> Self {
        self.job_concurrency = concurrency.max(1);
        self
    }

    /// Categories excluded from this export
    ///
    /// Validated at configuration time; traversal of namespaces and jobs is
    /// not gated on them.
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Export every namespace and job into a single document
    ///
    /// # Errors
    ///
    /// Returns the first listing or fetch failure, wrapped with the namespace
    /// and job it occurred at.
    pub async fn export(&self) -> Result<ExportDocument, ExportError> {
        tracing::info!(
            address = self.client.address(),
            excluded = %self.exclusions,
            job_concurrency = self.job_concurrency,
            "Starting data export"
        );

        let namespaces = self
            .client
            .list_namespaces()
            .await
            .map_err(|source| ExportError::ListNamespaces { source })?;

        tracing::debug!(count = namespaces.len(), "Listed namespaces");

        let namespaces = stream::iter(namespaces)
            .map(Ok::<_, ExportError>)
            .try_fold(BTreeMap::new(), |mut acc, record| async move {
                let (name, entry) = self.export_namespace(record).await?;
                acc.insert(name, entry);
                Ok::<_, ExportError>(acc)
            })
            .await?;

        Ok(ExportDocument::new(namespaces))
    }

    /// Export and report counts and timing alongside the document
    pub async fn export_with_summary(
        &self,
    ) -> Result<(ExportDocument, ExportSummary), ExportError> {
        let start = Instant::now();
        let mut summary = ExportSummary::new(&self.exclusions);

        let document = self.export().await?;

        summary.record(&document);
        let summary = summary.finish(start.elapsed());
        log_export_complete!(summary.total_namespaces, summary.total_jobs, summary.duration);

        Ok((document, summary))
    }

    async fn export_namespace(
        &self,
        record: NamespaceRecord,
    ) -> Result<(NamespaceName, NamespaceEntry), ExportError> {
        let name = match record.name() {
            Some(raw) => NamespaceName::new(raw).map_err(|_| {
                ExportError::InvalidRecord(format!("namespace record has blank Name {raw:?}"))
            })?,
            None => {
                return Err(ExportError::InvalidRecord(
                    "namespace record has no Name field".to_string(),
                ))
            }
        };

        log_namespace_start!(&name);

        let jobs = self
            .export_jobs(&name)
            .await
            .map_err(|e| e.in_namespace(name.as_str()))?;

        tracing::info!(namespace = %name, jobs = jobs.len(), "Exported namespace");

        Ok((name, NamespaceEntry::new(record, jobs)))
    }

    async fn export_jobs(
        &self,
        namespace: &NamespaceName,
    ) -> Result<BTreeMap<JobId, JobEntry>, ExportError> {
        let stubs = self
            .client
            .list_jobs(namespace.as_str())
            .await
            .map_err(|source| ExportError::ListJobs {
                namespace: namespace.to_string(),
                source,
            })?;

        tracing::debug!(namespace = %namespace, count = stubs.len(), "Listed jobs");

        stream::iter(stubs)
            .map(|stub| self.export_job(namespace, stub))
            .buffered(self.job_concurrency)
            .try_fold(BTreeMap::new(), |mut acc, (id, entry)| async move {
                acc.insert(id, entry);
                Ok::<_, ExportError>(acc)
            })
            .await
    }

    async fn export_job(
        &self,
        namespace: &NamespaceName,
        stub: JobStub,
    ) -> Result<(JobId, JobEntry), ExportError> {
        let id = match stub.id() {
            Some(raw) => JobId::new(raw).map_err(|_| {
                ExportError::InvalidRecord(format!(
                    "job stub in namespace {namespace} has blank ID {raw:?}"
                ))
            })?,
            None => {
                return Err(ExportError::InvalidRecord(format!(
                    "job stub in namespace {namespace} has no ID field"
                )))
            }
        };

        tracing::debug!(
            namespace = %namespace,
            job_id = %id,
            job_name = stub.name().unwrap_or_default(),
            "Fetching job definition"
        );

        let definition = self
            .client
            .get_job(id.as_str(), namespace.as_str())
            .await
            .map_err(|source| ExportError::GetJob {
                namespace: namespace.to_string(),
                job_id: id.to_string(),
                job_name: stub.name().unwrap_or(id.as_str()).to_string(),
                source,
            })?;

        Ok((id, JobEntry::new(stub, definition)))
    }
}
