//! Export document model
//!
//! The nested snapshot produced by one export run. Mappings are keyed, not
//! sequenced, and use `BTreeMap` so serialized output is stable across runs.
//! Empty mappings and absent records are omitted when serialized.

use super::ids::{JobId, NamespaceName};
use super::records::{JobDefinition, JobStub, NamespaceRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete snapshot of namespaces and their jobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Namespace name to namespace entry
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub namespaces: BTreeMap<NamespaceName, NamespaceEntry>,
}

impl ExportDocument {
    /// Creates a document from an assembled namespace mapping
    pub fn new(namespaces: BTreeMap<NamespaceName, NamespaceEntry>) -> Self {
        Self { namespaces }
    }

    /// Returns true if no namespaces were exported
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Number of namespaces in the document
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Number of jobs across all namespaces
    pub fn job_count(&self) -> usize {
        self.namespaces.values().map(|ns| ns.jobs.len()).sum()
    }

    /// Looks up a namespace entry by name
    pub fn namespace(&self, name: &str) -> Option<&NamespaceEntry> {
        self.namespaces.get(name)
    }
}

/// One namespace and the jobs it contains
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    /// Namespace record, passed through verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<NamespaceRecord>,

    /// Job ID to job entry
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub jobs: BTreeMap<JobId, JobEntry>,
}

impl NamespaceEntry {
    /// Creates a namespace entry
    pub fn new(definition: NamespaceRecord, jobs: BTreeMap<JobId, JobEntry>) -> Self {
        Self {
            definition: Some(definition),
            jobs,
        }
    }

    /// Looks up a job entry by ID
    pub fn job(&self, id: &str) -> Option<&JobEntry> {
        self.jobs.get(id)
    }
}

/// One job: its list summary and its full definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<JobStub>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<JobDefinition>,
}

impl JobEntry {
    /// Creates a job entry from the list stub and fetched definition
    pub fn new(info: JobStub, definition: JobDefinition) -> Self {
        Self {
            info: Some(info),
            definition: Some(definition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> ExportDocument {
        let mut jobs = BTreeMap::new();
        jobs.insert(
            JobId::new("job-1").unwrap(),
            JobEntry::new(
                JobStub::new(json!({"ID": "job-1", "Name": "web"})),
                JobDefinition::new(json!({"ID": "job-1", "TaskGroups": [{"Name": "web"}]})),
            ),
        );

        let mut namespaces = BTreeMap::new();
        namespaces.insert(
            NamespaceName::new("default").unwrap(),
            NamespaceEntry::new(NamespaceRecord::new(json!({"Name": "default"})), jobs),
        );
        ExportDocument::new(namespaces)
    }

    #[test]
    fn test_empty_document_serializes_without_namespaces() {
        let doc = ExportDocument::default();
        assert_eq!(serde_json::to_string(&doc).unwrap(), "{}");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_document_shape() {
        let value = serde_json::to_value(sample_document()).unwrap();
        assert_eq!(
            value,
            json!({
                "namespaces": {
                    "default": {
                        "definition": {"Name": "default"},
                        "jobs": {
                            "job-1": {
                                "info": {"ID": "job-1", "Name": "web"},
                                "definition": {"ID": "job-1", "TaskGroups": [{"Name": "web"}]}
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_namespace_without_jobs_omits_jobs_key() {
        let mut namespaces = BTreeMap::new();
        namespaces.insert(
            NamespaceName::new("empty").unwrap(),
            NamespaceEntry::new(NamespaceRecord::new(json!({"Name": "empty"})), BTreeMap::new()),
        );
        let value = serde_json::to_value(ExportDocument::new(namespaces)).unwrap();
        assert_eq!(
            value,
            json!({"namespaces": {"empty": {"definition": {"Name": "empty"}}}})
        );
    }

    #[test]
    fn test_absent_records_are_omitted_not_null() {
        let json = serde_json::to_string(&JobEntry::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_counts_and_lookups() {
        let doc = sample_document();
        assert_eq!(doc.namespace_count(), 1);
        assert_eq!(doc.job_count(), 1);
        let ns = doc.namespace("default").unwrap();
        assert!(ns.job("job-1").is_some());
        assert!(ns.job("job-2").is_none());
        assert!(doc.namespace("missing").is_none());
    }

    #[test]
    fn test_document_deserializes_from_export_output() {
        let doc = sample_document();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
