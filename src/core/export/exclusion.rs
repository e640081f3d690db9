//! Exclusion set: data categories the caller asked to leave out
//!
//! Names are checked against a fixed vocabulary when the configuration is
//! built, so an unknown category fails before any request is sent.

use crate::domain::{NomadExportError, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Optional export category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    Catalog,
    Acls,
    ConfigEntries,
}

impl DataType {
    /// Every recognized category
    pub const ALL: [DataType; 3] = [DataType::Catalog, DataType::Acls, DataType::ConfigEntries];

    /// The name used on the command line and in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Catalog => "catalog",
            DataType::Acls => "acls",
            DataType::ConfigEntries => "config-entries",
        }
    }

    /// Allowed names, sorted and comma separated
    pub fn allowed_values() -> String {
        let mut names: Vec<&str> = Self::ALL.iter().map(DataType::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Value {s:?} is not allowed. Allowed values are: {}",
                    Self::allowed_values()
                )
            })
    }
}

/// Set of excluded categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    values: BTreeSet<DataType>,
}

impl ExclusionSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from category names, failing on the first unknown name
    ///
    /// # Examples
    ///
    /// ```
    /// use nomad_export::core::export::{DataType, ExclusionSet};
    ///
    /// let set = ExclusionSet::from_names(["acls", "catalog"]).unwrap();
    /// assert!(set.contains(DataType::Acls));
    /// assert!(ExclusionSet::from_names(["jobs"]).is_err());
    /// ```
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.as_ref())?;
        }
        Ok(set)
    }

    /// Adds a category by name
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the value and the allowed set.
    pub fn insert(&mut self, name: &str) -> Result<()> {
        let data_type = DataType::from_str(name).map_err(NomadExportError::Configuration)?;
        self.values.insert(data_type);
        Ok(())
    }

    /// Returns true if the category is excluded
    pub fn contains(&self, data_type: DataType) -> bool {
        self.values.contains(&data_type)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates the excluded categories in a stable order
    pub fn iter(&self) -> impl Iterator<Item = DataType> + '_ {
        self.values.iter().copied()
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.values.iter().map(DataType::as_str).collect();
        names.sort_unstable();
        f.write_str(&names.join(", "))
    }
}
