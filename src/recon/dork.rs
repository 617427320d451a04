//! Dork search
//!
//! Runs a fixed family of search-operator queries for one free-text query in a
//! single batch and lists the outbound result links each one returned. Links
//! are found by pattern, not by parsing the page.

use crate::config::{DorkConfig, SearchConfig};
use crate::fetch::Dispatcher;
use crate::recon::scrape::bulk_scrape;
use crate::url::build_search_url;
use crate::ReconError;
use regex::Regex;
use std::collections::BTreeMap;

/// Absolute link target inside an `href` attribute
const LINK_PATTERN: &str = r#"href="(https?://[^"]+)""#;

/// Result links keyed by dork (its first operator token)
pub type DorkResults = BTreeMap<String, Vec<String>>;

/// The dorks issued for `query`
pub fn dork_queries(query: &str) -> Vec<String> {
    vec![
        format!("\"{}\"", query),
        format!("site:go.in filetype:pdf \"{}\"", query),
        format!("site:*.gov filetype:pdf \"{}\"", query),
        format!("site:linkedin.com \"{}\"", query),
        format!("inurl:database \"index of\" \"{}\"", query),
    ]
}

/// Key a dork is reported under: its first whitespace-separated token
pub fn dork_key(dork: &str) -> &str {
    dork.split_whitespace().next().unwrap_or(dork)
}

/// Pulls up to `limit` absolute links out of a results page
///
/// Links back to `exclude_host` (the search engine itself) are dropped.
pub fn extract_links(body: &str, exclude_host: Option<&str>, limit: usize) -> Result<Vec<String>, regex::Error> {
    let pattern = Regex::new(LINK_PATTERN)?;

    let links = pattern
        .captures_iter(body)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|link| match (exclude_host, url::Url::parse(link)) {
            (Some(host), Ok(parsed)) => parsed.host_str() != Some(host),
            _ => true,
        })
        .take(limit)
        .map(str::to_string)
        .collect();

    Ok(links)
}

/// Runs every dork for `query` and collects result links per dork
///
/// A dork whose page failed or came back empty maps to an empty list.
pub async fn dork_search(
    dispatcher: &Dispatcher,
    query: &str,
    search: &SearchConfig,
    settings: &DorkConfig,
) -> Result<DorkResults, ReconError> {
    let dorks = dork_queries(query);
    let urls = dorks
        .iter()
        .map(|dork| build_search_url(&search.base_url, dork, settings.result_count))
        .collect::<Result<Vec<_>, _>>()?;
    let search_host = url::Url::parse(&search.base_url)?
        .host_str()
        .map(str::to_string);

    let pages = bulk_scrape(dispatcher, urls.clone()).await;

    let mut found = DorkResults::new();
    for (dork, url) in dorks.iter().zip(&urls) {
        let links = match pages.get(url).and_then(|outcome| outcome.body()) {
            Some(body) if !body.is_empty() => {
                extract_links(body, search_host.as_deref(), settings.result_count as usize)?
            }
            _ => Vec::new(),
        };
        found.insert(dork_key(dork).to_string(), links);
    }

    tracing::info!(
        "Dork search for '{}': {} links",
        query,
        found.values().map(Vec::len).sum::<usize>()
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::MockTransport;
    use crate::TransportError;
    use std::sync::Arc;

    #[test]
    fn test_dork_keys() {
        let dorks = dork_queries("acme");
        let keys: Vec<&str> = dorks.iter().map(|d| dork_key(d)).collect();
        assert_eq!(
            keys,
            vec![
                "\"acme\"",
                "site:go.in",
                "site:*.gov",
                "site:linkedin.com",
                "inurl:database"
            ]
        );
    }

    #[test]
    fn test_extract_links_skips_search_host_and_limits() {
        let body = r#"
            <a href="https://www.google.com/preferences">prefs</a>
            <a href="https://one.example/a">1</a>
            <a href="/relative">rel</a>
            <a href="http://two.example/b">2</a>
            <a href="https://three.example/c">3</a>
        "#;

        let links = extract_links(body, Some("www.google.com"), 2).unwrap();
        assert_eq!(links, vec!["https://one.example/a", "http://two.example/b"]);
    }

    #[tokio::test]
    async fn test_dork_search_maps_failures_to_empty_lists() {
        let transport = MockTransport::new().with_body(|url| {
            if url.contains("linkedin") {
                Err(TransportError::Connect("refused".to_string()))
            } else if url.contains("inurl") {
                Ok(String::new())
            } else {
                Ok(r#"<a href="https://hit.example/doc.pdf">x</a>"#.to_string())
            }
        });
        let dispatcher = Dispatcher::with_default_timeout(Arc::new(transport));

        let found = dork_search(
            &dispatcher,
            "acme",
            &SearchConfig::default(),
            &DorkConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(found.len(), 5);
        assert!(found["site:linkedin.com"].is_empty());
        assert!(found["inurl:database"].is_empty());
        assert_eq!(found["site:*.gov"], vec!["https://hit.example/doc.pdf"]);
        assert_eq!(found["\"acme\""], vec!["https://hit.example/doc.pdf"]);
    }
}
