//! Fetch worker
//!
//! Performs one request for one job and reduces every outcome, including
//! failures, to a [`FetchOutcome`] value. Nothing above this layer sees an error.

use crate::fetch::Transport;
use crate::TransportError;
use serde::Serialize;
use std::time::Duration;

/// Prefix marking an outcome text as a transport error rather than page content
pub const TRANSPORT_ERROR_SENTINEL: &str = "CURL_ERROR: ";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Kind of request a job performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Full GET, body kept
    BodyFetch,
    /// HEAD only, status kept
    HeadOnly,
}

/// One unit of work for the dispatcher; identity is the URL string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchJob {
    pub url: String,
    pub mode: FetchMode,
}

impl FetchJob {
    pub fn body(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: FetchMode::BodyFetch,
        }
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: FetchMode::HeadOnly,
        }
    }
}

/// Result of one fetch job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Body of a completed GET, whatever its status
    Body(String),
    /// Status of a completed HEAD
    StatusOnly(u16),
    /// Transport failure; the message starts with [`TRANSPORT_ERROR_SENTINEL`]
    Error(String),
}

impl FetchOutcome {
    /// Wraps a transport error as a sentinel-prefixed error outcome
    pub fn transport_error(err: &TransportError) -> Self {
        FetchOutcome::Error(format!("{}{}", TRANSPORT_ERROR_SENTINEL, err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchOutcome::Error(_))
    }

    /// Page content, if this is a body outcome
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchOutcome::Body(content) => Some(content),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchOutcome::StatusOnly(code) => Some(*code),
            _ => None,
        }
    }

    /// Flattens the outcome to the plain-string form used at library boundaries
    ///
    /// Bodies pass through, statuses become their decimal text, and errors keep
    /// their sentinel prefix.
    pub fn to_wire(&self) -> String {
        match self {
            FetchOutcome::Body(content) => content.clone(),
            FetchOutcome::StatusOnly(code) => code.to_string(),
            FetchOutcome::Error(message) => message.clone(),
        }
    }

    /// Reads a plain-string outcome back; sentinel-prefixed text is an error
    pub fn from_wire(text: impl Into<String>) -> Self {
        let text = text.into();
        if is_transport_error(&text) {
            FetchOutcome::Error(text)
        } else {
            FetchOutcome::Body(text)
        }
    }
}

/// Returns true if `text` carries the transport-error sentinel
pub fn is_transport_error(text: &str) -> bool {
    text.starts_with(TRANSPORT_ERROR_SENTINEL)
}

/// Runs one job against the transport, bounded by `timeout`
///
/// The timeout wraps the whole exchange, so a transport that never answers
/// still yields an error outcome once it elapses.
pub async fn fetch_one(transport: &dyn Transport, job: &FetchJob, timeout: Duration) -> FetchOutcome {
    let exchange = async {
        match job.mode {
            FetchMode::BodyFetch => transport.get_body(&job.url).await.map(FetchOutcome::Body),
            FetchMode::HeadOnly => transport
                .head_status(&job.url)
                .await
                .map(FetchOutcome::StatusOnly),
        }
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            tracing::debug!("Transport error for {}: {}", job.url, err);
            FetchOutcome::transport_error(&err)
        }
        Err(_) => {
            tracing::debug!("No response from {} within {:?}", job.url, timeout);
            FetchOutcome::transport_error(&TransportError::Timeout(format!(
                "no response within {} ms",
                timeout.as_millis()
            )))
        }
    }
}
