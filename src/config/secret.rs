//! ACL token handling using the secrecy crate
//!
//! The Nomad ACL token is the only credential the exporter holds. It is kept
//! in a [`Secret`] so it is zeroized on drop, redacted from `Debug` output,
//! and only readable through `expose_secret()`.
//!
//! ```rust
//! use nomad_export::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("7f0f5c9a-2a3e-4c9b-8d38-000000000000".to_string());
//! assert!(!format!("{token:?}").contains("7f0f5c9a"));
//! assert_eq!(token.expose_secret().as_str(), "7f0f5c9a-2a3e-4c9b-8d38-000000000000");
//! ```

use crate::domain::{NomadExportError, Result};
use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Borrow the secret as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroized on drop, redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wraps a String in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Reads an ACL token from a file
///
/// Surrounding whitespace (typically a trailing newline) is stripped. An
/// empty file is a configuration error.
pub fn read_token_file(path: impl AsRef<Path>) -> Result<SecretString> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        NomadExportError::Configuration(format!(
            "Failed to read token file {}: {e}",
            path.display()
        ))
    })?;

    let token = contents.trim();
    if token.is_empty() {
        return Err(NomadExportError::Configuration(format!(
            "Token file {} is empty",
            path.display()
        )));
    }

    Ok(secret_string(token.to_string()))
}
