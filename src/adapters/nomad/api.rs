//! Nomad API trait definition
//!
//! The export engine only needs three read-only calls. Abstracting them behind
//! a trait lets the engine run against the HTTP client in production and an
//! in-memory fake in tests.

use crate::domain::{JobDefinition, JobStub, NamespaceRecord, NomadError};
use async_trait::async_trait;

/// Result of a single Nomad API call
pub type ApiResult<T> = std::result::Result<T, NomadError>;

/// Read-only view of the Nomad namespace and job APIs
///
/// # Example
///
/// ```no_run
/// use nomad_export::adapters::nomad::{NomadApi, NomadClient};
/// use nomad_export::config::NomadConfig;
///
/// # async fn example() -> nomad_export::domain::Result<()> {
/// let client = NomadClient::new(&NomadConfig::default()).await?;
///
/// for namespace in client.list_namespaces().await? {
///     let name = namespace.name().unwrap_or_default();
///     let jobs = client.list_jobs(name).await?;
///     println!("{name}: {} jobs", jobs.len());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait NomadApi: Send + Sync {
    /// List every namespace visible to the token (`GET /v1/namespaces`)
    async fn list_namespaces(&self) -> ApiResult<Vec<NamespaceRecord>>;

    /// List job stubs in one namespace (`GET /v1/jobs?namespace=...`)
    async fn list_jobs(&self, namespace: &str) -> ApiResult<Vec<JobStub>>;

    /// Fetch a job's full definition (`GET /v1/job/:id?namespace=...`)
    async fn get_job(&self, job_id: &str, namespace: &str) -> ApiResult<JobDefinition>;

    /// Address of the Nomad server, for logging
    fn address(&self) -> &str;
}
