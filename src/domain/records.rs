//! Opaque Nomad API records
//!
//! Namespace, job stub and job definition payloads belong to Nomad's own
//! evolving schema. They are held as raw JSON and written back out untouched;
//! only the fields needed to key the export document are ever read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// Wraps a raw JSON value
            pub fn new(value: Value) -> Self {
                Self(value)
            }

            /// Borrows the raw JSON value
            pub fn as_value(&self) -> &Value {
                &self.0
            }

            /// Consumes self and returns the raw JSON value
            pub fn into_value(self) -> Value {
                self.0
            }

            fn str_field(&self, field: &str) -> Option<&str> {
                self.0.get(field).and_then(Value::as_str)
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

opaque_record!(
    /// Namespace record as returned by `GET /v1/namespaces`
    NamespaceRecord
);

opaque_record!(
    /// Lightweight job summary as returned by `GET /v1/jobs`
    JobStub
);

opaque_record!(
    /// Full job definition as returned by `GET /v1/job/:id`
    JobDefinition
);

impl NamespaceRecord {
    /// The namespace's `Name` field
    pub fn name(&self) -> Option<&str> {
        self.str_field("Name")
    }
}

impl JobStub {
    /// The job's `ID` field
    pub fn id(&self) -> Option<&str> {
        self.str_field("ID")
    }

    /// The job's `Name` field, used only for error messages
    pub fn name(&self) -> Option<&str> {
        self.str_field("Name")
    }
}

impl JobDefinition {
    /// The job's `ID` field
    pub fn id(&self) -> Option<&str> {
        self.str_field("ID")
    }
}
