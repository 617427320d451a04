//! Result consumers built on the dispatcher
//!
//! - `scrape`: bulk scrape, outcome per URL
//! - `probe`: username existence across a site list
//! - `harvest`: search harvesting with email/subdomain extraction
//! - `dork`: search-operator queries with result link extraction
//! - `usernames`: candidate usernames for a full name
//! - `dossier`: query classification and concurrent tool runs

mod dork;
mod dossier;
mod harvest;
mod probe;
mod scrape;
mod usernames;

pub use dork::{dork_key, dork_queries, dork_search, extract_links, DorkResults};
pub use dossier::{build_dossier, classify_query, Dossier, Intel, QueryKinds};
pub use harvest::{harvest, harvest_queries, harvest_urls, Extractor, HarvestResult, EMAIL_PATTERN};
pub use probe::{plan_probe, probe_existence, ProbePlan};
pub use scrape::{bulk_scrape, from_wire, to_wire};
pub use usernames::candidate_usernames;
