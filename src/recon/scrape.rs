use crate::fetch::{Dispatcher, FetchJob, FetchOutcome, ScrapeResultSet};
use std::collections::BTreeMap;

/// Fetches every URL's body concurrently and returns the outcome per URL
pub async fn bulk_scrape(dispatcher: &Dispatcher, urls: Vec<String>) -> ScrapeResultSet {
    tracing::info!("Bulk scrape of {} URLs", urls.len());
    let jobs = urls.into_iter().map(FetchJob::body).collect();
    dispatcher.dispatch(jobs).await
}

/// Flattens a result set to `url -> body or sentinel-prefixed error`
pub fn to_wire(results: &ScrapeResultSet) -> BTreeMap<String, String> {
    results
        .iter()
        .map(|(url, outcome)| (url.clone(), outcome.to_wire()))
        .collect()
}

/// Reads a flattened result set back into typed outcomes
pub fn from_wire(results: BTreeMap<String, String>) -> ScrapeResultSet {
    results
        .into_iter()
        .map(|(url, text)| (url, FetchOutcome::from_wire(text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::MockTransport;
    use crate::TransportError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_bulk_scrape_wire_form() {
        let transport = MockTransport::new().with_body(|url| {
            if url.ends_with("/gone") {
                Err(TransportError::Timeout("Operation timed out".to_string()))
            } else {
                Ok("<p>hello</p>".to_string())
            }
        });
        let dispatcher = Dispatcher::with_default_timeout(Arc::new(transport));

        let results = bulk_scrape(
            &dispatcher,
            vec!["https://a.test/".to_string(), "https://a.test/gone".to_string()],
        )
        .await;
        let wire = to_wire(&results);

        assert_eq!(wire["https://a.test/"], "<p>hello</p>");
        assert!(wire["https://a.test/gone"].starts_with("CURL_ERROR: "));
        assert_eq!(from_wire(wire), results);
    }
}
