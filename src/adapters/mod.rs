//! External system integrations for nomad-export.
//!
//! - [`nomad`] - Nomad HTTP API client
//!
//! The export engine talks to Nomad only through the
//! [`NomadApi`](nomad::NomadApi) trait, so tests can substitute an
//! in-memory implementation for the HTTP client.
//!
//! ```rust,no_run
//! use nomad_export::adapters::nomad::{NomadApi, NomadClient};
//! use nomad_export::config::{secret_string, NomadConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NomadConfig {
//!     address: "https://nomad.example.com:4646".to_string(),
//!     token: Some(secret_string("my-acl-token".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = NomadClient::new(&config).await?;
//! let namespaces = client.list_namespaces().await?;
//! # Ok(())
//! # }
//! ```

pub mod nomad;
