//! Harvest-extract
//!
//! Builds a fixed set of search queries for a target domain, scrapes them in
//! one batch, and pulls candidate emails and subdomains out of every page that
//! came back. Error outcomes never reach the extractor.

use crate::config::{HarvestConfig, SearchConfig};
use crate::fetch::{Dispatcher, ScrapeResultSet};
use crate::recon::scrape::bulk_scrape;
use crate::url::build_search_url;
use crate::ReconError;
use regex::Regex;
use serde::Serialize;

/// Email-shaped token: local part, `@`, host labels, 2+ letter top label
pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Prefix of the subdomain pattern; the target domain is appended to it
const SUBDOMAIN_PREFIX: &str = r"([a-zA-Z0-9.-]+\.)";

/// Emails and subdomains found for a domain, in discovery order, duplicates kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestResult {
    pub emails: Vec<String>,
    pub subdomains: Vec<String>,
}

impl HarvestResult {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.subdomains.is_empty()
    }
}

/// Search queries issued for `domain`: emails at it, mentions of it, subdomains of it
pub fn harvest_queries(domain: &str) -> Vec<String> {
    vec![
        format!("site:google.com \"@{}\"", domain),
        format!("\"@{}\"", domain),
        format!("site:*.{}", domain),
    ]
}

/// Search URLs issued for `domain`, one per query
pub fn harvest_urls(
    domain: &str,
    search: &SearchConfig,
    settings: &HarvestConfig,
) -> Result<Vec<String>, url::ParseError> {
    harvest_queries(domain)
        .iter()
        .map(|query| build_search_url(&search.base_url, query, settings.result_count))
        .collect()
}

/// Email and subdomain scanner bound to one target domain
#[derive(Debug, Clone)]
pub struct Extractor {
    domain: String,
    email: Regex,
    subdomain: Regex,
}

impl Extractor {
    /// Compiles the scanners for `domain`
    ///
    /// Unless `escape_domain` is set, the domain is spliced into the subdomain
    /// pattern as-is, so its dots match any character. A domain that does not
    /// compile as a pattern falls back to literal matching.
    pub fn new(domain: &str, escape_domain: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            domain: domain.to_string(),
            email: Regex::new(EMAIL_PATTERN)?,
            subdomain: subdomain_regex(domain, escape_domain)?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Appends every qualifying match in `body` to `harvested`
    ///
    /// An email qualifies if its text contains the domain anywhere; every
    /// subdomain match qualifies.
    pub fn scan(&self, body: &str, harvested: &mut HarvestResult) {
        for found in self.email.find_iter(body) {
            let email = found.as_str();
            if email.contains(self.domain.as_str()) {
                harvested.emails.push(email.to_string());
            }
        }

        for found in self.subdomain.find_iter(body) {
            harvested.subdomains.push(found.as_str().to_string());
        }
    }

    /// Scans every page in the result set, skipping error outcomes
    pub fn extract(&self, results: &ScrapeResultSet) -> HarvestResult {
        let mut harvested = HarvestResult::default();

        for (url, outcome) in results {
            match outcome.body() {
                Some(body) => self.scan(body, &mut harvested),
                None => tracing::debug!("Skipping {} during extraction: {:?}", url, outcome),
            }
        }

        harvested
    }
}

fn subdomain_regex(domain: &str, escape_domain: bool) -> Result<Regex, regex::Error> {
    if !escape_domain {
        match Regex::new(&format!("{}{}", SUBDOMAIN_PREFIX, domain)) {
            Ok(re) => return Ok(re),
            Err(err) => tracing::warn!(
                "Domain '{}' is not a valid pattern, matching it literally: {}",
                domain,
                err
            ),
        }
    }
    Regex::new(&format!("{}{}", SUBDOMAIN_PREFIX, regex::escape(domain)))
}

/// Harvests emails and subdomains for `domain`
///
/// Queries that fail in transport contribute nothing; the rest still count.
pub async fn harvest(
    dispatcher: &Dispatcher,
    domain: &str,
    search: &SearchConfig,
    settings: &HarvestConfig,
) -> Result<HarvestResult, ReconError> {
    let extractor = Extractor::new(domain, settings.escape_domain)?;
    let urls = harvest_urls(domain, search, settings)?;

    let results = bulk_scrape(dispatcher, urls).await;
    let harvested = extractor.extract(&results);

    tracing::info!(
        "Harvest for {}: {} emails, {} subdomains",
        domain,
        harvested.emails.len(),
        harvested.subdomains.len()
    );
    Ok(harvested)
}
