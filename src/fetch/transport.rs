//! Network transport behind the fetch worker
//!
//! The worker talks to a [`Transport`] rather than to reqwest directly so that
//! tests can substitute deterministic responses.

use crate::config::FetchConfig;
use crate::TransportError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};

/// One request/response exchange against a URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET and returns the body verbatim, whatever the status
    async fn get_body(&self, url: &str) -> Result<String, TransportError>;

    /// Performs a HEAD and returns the final status code
    async fn head_status(&self, url: &str) -> Result<u16, TransportError>;
}

/// Builds an HTTP client with the configured user agent, timeout and redirect limit
///
/// The client keeps no cookies and does no certificate pinning.
///
/// # Example
///
/// ```
/// use recon_fanout::config::FetchConfig;
/// use recon_fanout::fetch::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get_body(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Body(e.to_string())
            }
        })
    }

    async fn head_status(&self, url: &str) -> Result<u16, TransportError> {
        let response = self.client.head(url).send().await.map_err(map_reqwest_error)?;
        Ok(response.status().as_u16())
    }
}

/// Classifies a reqwest error into a transport error
fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    if err.is_redirect() {
        return TransportError::Redirect(err.to_string());
    }
    if err.is_connect() {
        return TransportError::Connect(err.to_string());
    }
    TransportError::Other(err.to_string())
}
