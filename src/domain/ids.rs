//! Domain identifier types with validation
//!
//! Newtype wrappers for the two keys the export document is indexed by.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Nomad namespace name
///
/// # Examples
///
/// ```
/// use nomad_export::domain::ids::NamespaceName;
/// use std::str::FromStr;
///
/// let namespace = NamespaceName::from_str("default").unwrap();
/// assert_eq!(namespace.as_str(), "default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceName(String);

impl NamespaceName {
    /// Creates a new NamespaceName, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Namespace name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the namespace name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NamespaceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NamespaceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Nomad job identifier
///
/// Unique within a namespace only.
///
/// # Examples
///
/// ```
/// use nomad_export::domain::ids::JobId;
/// use std::str::FromStr;
///
/// let job_id = JobId::from_str("job-1").unwrap();
/// assert_eq!(job_id.to_string(), "job-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Creates a new JobId, rejecting blank IDs
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the job ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for JobId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_name_valid() {
        let namespace = NamespaceName::new("platform").unwrap();
        assert_eq!(namespace.as_str(), "platform");
        assert_eq!(namespace.to_string(), "platform");
    }

    #[test]
    fn test_namespace_name_empty() {
        assert!(NamespaceName::new("").is_err());
        assert!(NamespaceName::new("   ").is_err());
    }

    #[test]
    fn test_job_id_valid() {
        let id = JobId::from_str("web").unwrap();
        assert_eq!(id.into_inner(), "web");
    }

    #[test]
    fn test_job_id_empty() {
        assert!(JobId::new("").is_err());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = JobId::new("job-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"job-1\"");

        let namespace: NamespaceName = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(namespace.as_str(), "default");
    }
}
