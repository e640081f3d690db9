//! Nomad integration
//!
//! - [`api`] - The [`NomadApi`] trait the export engine depends on
//! - [`client`] - [`NomadClient`], the HTTP implementation

pub mod api;
pub mod client;

pub use api::{ApiResult, NomadApi};
pub use client::NomadClient;
