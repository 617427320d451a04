//! Fetch module: the worker, its transport, and the scatter-gather dispatcher
//!
//! This module contains the core fan-out logic, including:
//! - A transport seam with a reqwest-backed implementation
//! - The fetch worker that turns every request into a tagged outcome
//! - The dispatcher that runs a batch of jobs concurrently and gathers them

mod dispatcher;
mod transport;
mod worker;

pub use dispatcher::{Dispatcher, ScrapeResultSet};
pub use transport::{build_http_client, ReqwestTransport, Transport};
pub use worker::{
    fetch_one, is_transport_error, FetchJob, FetchMode, FetchOutcome, DEFAULT_TIMEOUT,
    TRANSPORT_ERROR_SENTINEL,
};

#[cfg(test)]
pub(crate) mod testing {
    use super::Transport;
    use crate::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type BodyFn = Box<dyn Fn(&str) -> Result<String, TransportError> + Send + Sync>;
    type HeadFn = Box<dyn Fn(&str) -> Result<u16, TransportError> + Send + Sync>;

    /// Deterministic transport driven by closures over the URL
    pub struct MockTransport {
        body: BodyFn,
        head: HeadFn,
        calls: Arc<AtomicUsize>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                body: Box::new(|_| Ok(String::new())),
                head: Box::new(|_| Ok(404)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn with_body<F>(mut self, f: F) -> Self
        where
            F: Fn(&str) -> Result<String, TransportError> + Send + Sync + 'static,
        {
            self.body = Box::new(f);
            self
        }

        pub fn with_head<F>(mut self, f: F) -> Self
        where
            F: Fn(&str) -> Result<u16, TransportError> + Send + Sync + 'static,
        {
            self.head = Box::new(f);
            self
        }

        /// Shared counter of requests made through this transport
        pub fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get_body(&self, url: &str) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.body)(url)
        }

        async fn head_status(&self, url: &str) -> Result<u16, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.head)(url)
        }
    }
}
