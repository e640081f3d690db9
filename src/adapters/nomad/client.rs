//! Nomad HTTP API client
//!
//! Implements [`NomadApi`] over the Nomad HTTP API with `reqwest`, including
//! ACL token authentication and TLS (custom CA, client certificate, SNI).

use super::api::{ApiResult, NomadApi};
use crate::config::{read_token_file, NomadConfig, SecretString};
use crate::domain::{JobDefinition, JobStub, NamespaceRecord, NomadError, NomadExportError, Result};
use async_trait::async_trait;
use reqwest::{Certificate, Client, ClientBuilder, Identity, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Header carrying the ACL token
const TOKEN_HEADER: &str = "X-Nomad-Token";

const PEM_CERTIFICATE_HEADER: &str = "-----BEGIN CERTIFICATE-----";

/// Nomad HTTP client
///
/// # Example
///
/// ```no_run
/// use nomad_export::adapters::nomad::NomadClient;
/// use nomad_export::config::NomadConfig;
///
/// # async fn example() -> nomad_export::domain::Result<()> {
/// let config = NomadConfig {
///     address: "https://nomad.example.com:4646".to_string(),
///     ca_cert: Some("/etc/nomad.d/ca.pem".to_string()),
///     ..Default::default()
/// };
/// let client = NomadClient::new(&config).await?;
/// client.health_check().await?;
/// # Ok(())
/// # }
/// ```
pub struct NomadClient {
    /// Address requests are sent to
    base_url: Url,

    /// Address as configured, for logging
    address: String,

    /// HTTP client for making requests
    client: Client,

    /// ACL token (if configured)
    token: Option<SecretString>,
}

impl NomadClient {
    /// Create a new Nomad client from configuration
    ///
    /// Reads the token file and TLS material up front so that configuration
    /// problems surface before the first API request. When `tls_server_name`
    /// is set, the address host is resolved once here.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid address, unreadable token
    /// file or TLS material, and a Nomad connection error if the address host
    /// cannot be resolved.
    pub async fn new(config: &NomadConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.address).map_err(|e| {
            NomadExportError::Configuration(format!(
                "Invalid Nomad address '{}': {e}",
                config.address
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(NomadExportError::Configuration(format!(
                "Invalid Nomad address '{}'",
                config.address
            )));
        }

        let token = match (&config.token, &config.token_file) {
            (Some(token), _) => Some(token.clone()),
            (None, Some(path)) => Some(read_token_file(path)?),
            (None, None) => None,
        };

        let timeout = Duration::from_secs(config.timeout_seconds);
        let mut builder = ClientBuilder::new()
            .use_rustls_tls()
            .user_agent(concat!("nomad-export/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)));

        if config.tls_skip_verify {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        for cert_path in ca_cert_files(config)? {
            builder = builder.add_root_certificate(load_certificate(&cert_path)?);
        }

        if let (Some(cert), Some(key)) = (&config.client_cert, &config.client_key) {
            builder = builder.identity(load_identity(Path::new(cert), Path::new(key))?);
        }

        if let Some(server_name) = &config.tls_server_name {
            builder = pin_server_name(builder, &mut base_url, server_name).await?;
        }

        let client = builder.build().map_err(|e| {
            NomadExportError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        tracing::debug!(
            address = %config.address,
            authenticated = token.is_some(),
            "Nomad client initialized"
        );

        Ok(Self {
            base_url,
            address: config.address.clone(),
            client,
            token,
        })
    }

    /// Check that the server is reachable and has an elected leader
    ///
    /// # Errors
    ///
    /// Returns an error if the server is not reachable or not responding.
    pub async fn health_check(&self) -> Result<()> {
        match self.get_json::<String>(&["v1", "status", "leader"], None).await {
            Ok(leader) => {
                tracing::info!(address = %self.address, leader = %leader, "Nomad health check passed");
                Ok(())
            }
            Err(e) => {
                tracing::error!(address = %self.address, error = %e, "Nomad health check failed");
                Err(e.into())
            }
        }
    }

    /// Returns true if requests carry an ACL token
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, segments: &[&str], namespace: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(namespace) = namespace {
            url.query_pairs_mut().append_pair("namespace", namespace);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        namespace: Option<&str>,
    ) -> ApiResult<T> {
        let url = self.endpoint(segments, namespace);
        tracing::trace!(url = %url, "GET");

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token.expose_secret().as_str());
        }

        let resp = request.send().await.map_err(transport_error)?;

        match resp.status() {
            status if status.is_success() => resp
                .json::<T>()
                .await
                .map_err(|e| NomadError::InvalidResponse(format!("{}: {e}", url.path()))),
            StatusCode::NOT_FOUND => Err(NomadError::NotFound(url.path().to_string())),
            status => {
                let message = resp.text().await.unwrap_or_default().trim().to_string();
                if status.is_client_error() {
                    Err(NomadError::ClientError {
                        status: status.as_u16(),
                        message,
                    })
                } else {
                    Err(NomadError::ServerError {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }
    }
}

#[async_trait]
impl NomadApi for NomadClient {
    async fn list_namespaces(&self) -> ApiResult<Vec<NamespaceRecord>> {
        self.get_json(&["v1", "namespaces"], None).await
    }

    async fn list_jobs(&self, namespace: &str) -> ApiResult<Vec<JobStub>> {
        self.get_json(&["v1", "jobs"], Some(namespace)).await
    }

    async fn get_job(&self, job_id: &str, namespace: &str) -> ApiResult<JobDefinition> {
        self.get_json(&["v1", "job", job_id], Some(namespace)).await
    }

    fn address(&self) -> &str {
        &self.address
    }
}

fn transport_error(e: reqwest::Error) -> NomadError {
    if e.is_timeout() {
        NomadError::Timeout(e.to_string())
    } else {
        NomadError::ConnectionFailed(e.to_string())
    }
}

/// CA certificate files to trust: `ca_cert` if set, else every file in `ca_path`
///
/// As with the Nomad CLI, file extensions are not checked; a file that is not
/// a PEM certificate fails client construction.
fn ca_cert_files(config: &NomadConfig) -> Result<Vec<PathBuf>> {
    if let Some(ca_cert) = &config.ca_cert {
        return Ok(vec![PathBuf::from(ca_cert)]);
    }

    let Some(ca_path) = &config.ca_path else {
        return Ok(Vec::new());
    };

    let entries = std::fs::read_dir(ca_path).map_err(|e| {
        NomadExportError::Configuration(format!("Failed to read CA directory {ca_path}: {e}"))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(NomadExportError::Configuration(format!(
            "No certificates found in CA directory {ca_path}"
        )));
    }

    Ok(files)
}

fn read_tls_file(path: &Path, kind: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        NomadExportError::Configuration(format!(
            "Failed to read {kind} {}: {e}",
            path.display()
        ))
    })
}

fn load_certificate(path: &Path) -> Result<Certificate> {
    let pem = read_tls_file(path, "CA certificate")?;
    if !String::from_utf8_lossy(&pem).contains(PEM_CERTIFICATE_HEADER) {
        return Err(NomadExportError::Configuration(format!(
            "Invalid CA certificate {}: no PEM certificate block",
            path.display()
        )));
    }
    Certificate::from_pem(&pem).map_err(|e| {
        NomadExportError::Configuration(format!(
            "Invalid CA certificate {}: {e}",
            path.display()
        ))
    })
}

fn load_identity(cert: &Path, key: &Path) -> Result<Identity> {
    let mut pem = read_tls_file(cert, "client certificate")?;
    pem.push(b'\n');
    pem.extend(read_tls_file(key, "client key")?);

    Identity::from_pem(&pem).map_err(|e| {
        NomadExportError::Configuration(format!("Invalid client certificate or key: {e}"))
    })
}

/// Send requests to `server_name` while connecting to the configured host
///
/// The configured host is resolved once and `server_name` is pinned to that
/// address, so SNI and certificate verification use `server_name`.
async fn pin_server_name(
    builder: ClientBuilder,
    base_url: &mut Url,
    server_name: &str,
) -> Result<ClientBuilder> {
    let host = base_url.host_str().unwrap_or_default().to_string();
    let port = base_url.port_or_known_default().unwrap_or(4646);

    let addr = tokio::net::lookup_host((host.as_str(), port))
        .await
        .map_err(|e| NomadError::ConnectionFailed(format!("Failed to resolve {host}: {e}")))?
        .next()
        .ok_or_else(|| NomadError::ConnectionFailed(format!("No addresses found for {host}")))?;

    base_url.set_host(Some(server_name)).map_err(|e| {
        NomadExportError::Configuration(format!("Invalid TLS server name '{server_name}': {e}"))
    })?;

    tracing::debug!(server_name = %server_name, addr = %addr, "Pinned TLS server name");

    Ok(builder.resolve(server_name, addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::Matcher;
    use tempfile::TempDir;

    async fn client_for(server: &mockito::ServerGuard, token: Option<&str>) -> NomadClient {
        let config = NomadConfig {
            address: server.url(),
            token: token.map(|t| secret_string(t.to_string())),
            ..Default::default()
        };
        NomadClient::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = NomadClient::new(&NomadConfig::default()).await.unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.address(), "http://127.0.0.1:4646");
    }

    #[tokio::test]
    async fn test_client_rejects_invalid_address() {
        let config = NomadConfig {
            address: "not a url".to_string(),
            ..Default::default()
        };
        let result = NomadClient::new(&config).await;
        assert!(matches!(result, Err(NomadExportError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_client_missing_token_file() {
        let config = NomadConfig {
            token_file: Some("/nonexistent/token".to_string()),
            ..Default::default()
        };
        let result = NomadClient::new(&config).await;
        assert!(matches!(result, Err(NomadExportError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_client_missing_ca_cert() {
        let config = NomadConfig {
            ca_cert: Some("/nonexistent/ca.pem".to_string()),
            ..Default::default()
        };
        let err = NomadClient::new(&config).await.err().unwrap();
        assert!(err.to_string().contains("Failed to read CA certificate"));
    }

    #[test]
    fn test_ca_path_without_certificates() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("old")).unwrap();

        let config = NomadConfig {
            ca_path: Some(dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        let err = ca_cert_files(&config).unwrap_err();
        assert!(err.to_string().contains("No certificates found"));
    }

    #[test]
    fn test_ca_path_loads_every_file() {
        let dir = TempDir::new().unwrap();
        for name in ["root.pem", "intermediate.cer", "issuing"] {
            std::fs::write(dir.path().join(name), "cert").unwrap();
        }
        std::fs::create_dir(dir.path().join("archive")).unwrap();

        let config = NomadConfig {
            ca_path: Some(dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        let files = ca_cert_files(&config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["intermediate.cer", "issuing", "root.pem"]);
    }

    #[tokio::test]
    async fn test_ca_path_rejects_non_certificate_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README"), "not a cert").unwrap();

        let config = NomadConfig {
            ca_path: Some(dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        let err = NomadClient::new(&config).await.err().unwrap();
        assert!(err.to_string().contains("Invalid CA certificate"));
    }

    #[test]
    fn test_ca_cert_takes_precedence_over_ca_path() {
        let config = NomadConfig {
            ca_cert: Some("/etc/nomad.d/ca.pem".to_string()),
            ca_path: Some("/etc/nomad.d/certs".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ca_cert_files(&config).unwrap(),
            vec![PathBuf::from("/etc/nomad.d/ca.pem")]
        );
    }

    #[tokio::test]
    async fn test_endpoint_encodes_job_id_and_namespace() {
        let client = NomadClient::new(&NomadConfig::default()).await.unwrap();
        let url = client.endpoint(&["v1", "job", "web/api"], Some("team a"));
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:4646/v1/job/web%2Fapi?namespace=team+a"
        );
    }

    #[tokio::test]
    async fn test_list_namespaces_sends_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/namespaces")
            .match_header("x-nomad-token", "secret-id")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"Name":"default","Description":"Default shared namespace"}]"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("secret-id")).await;
        let namespaces = client.list_namespaces().await.unwrap();

        mock.assert_async().await;
        assert_eq!(namespaces.len(), 1);
        assert_eq!(namespaces[0].name(), Some("default"));
    }

    #[tokio::test]
    async fn test_list_jobs_scoped_to_namespace() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/jobs")
            .match_query(Matcher::UrlEncoded("namespace".into(), "prod".into()))
            .with_status(200)
            .with_body(r#"[{"ID":"job-1","Name":"web"}]"#)
            .create_async()
            .await;

        let client = client_for(&server, None).await;
        let jobs = client.list_jobs("prod").await.unwrap();

        mock.assert_async().await;
        assert_eq!(jobs[0].id(), Some("job-1"));
    }

    #[tokio::test]
    async fn test_get_job_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/job/missing")
            .match_query(Matcher::UrlEncoded("namespace".into(), "default".into()))
            .with_status(404)
            .with_body("job not found")
            .create_async()
            .await;

        let client = client_for(&server, None).await;
        let err = client.get_job("missing", "default").await.unwrap_err();
        assert_eq!(err, NomadError::NotFound("/v1/job/missing".to_string()));
    }

    #[tokio::test]
    async fn test_permission_denied_is_client_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/namespaces")
            .with_status(403)
            .with_body("Permission denied\n")
            .create_async()
            .await;

        let client = client_for(&server, Some("bad-token")).await;
        let err = client.list_namespaces().await.unwrap_err();
        assert_eq!(
            err,
            NomadError::ClientError {
                status: 403,
                message: "Permission denied".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/namespaces")
            .with_status(500)
            .with_body("No cluster leader")
            .create_async()
            .await;

        let client = client_for(&server, None).await;
        let err = client.list_namespaces().await.unwrap_err();
        assert!(matches!(err, NomadError::ServerError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/namespaces")
            .with_status(200)
            .with_body("<html>proxy error</html>")
            .create_async()
            .await;

        let client = client_for(&server, None).await;
        let err = client.list_namespaces().await.unwrap_err();
        assert!(matches!(err, NomadError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/status/leader")
            .with_status(200)
            .with_body(r#""10.0.0.1:4647""#)
            .create_async()
            .await;

        let client = client_for(&server, None).await;
        assert!(client.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = NomadConfig {
            address: "http://127.0.0.1:1".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        };
        let client = NomadClient::new(&config).await.unwrap();
        let err = client.list_namespaces().await.unwrap_err();
        assert!(matches!(
            err,
            NomadError::ConnectionFailed(_) | NomadError::Timeout(_)
        ));
    }
}
