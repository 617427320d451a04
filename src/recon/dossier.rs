//! Dossier: classify a query and run every tool that applies to it at once
//!
//! Tools run concurrently. A tool that fails records its error under its own
//! key and the others carry on.

use crate::engine::Engine;
use crate::recon::dork::DorkResults;
use crate::recon::harvest::HarvestResult;
use crate::recon::usernames::candidate_usernames;
use crate::ReconError;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

const EMAIL_SHAPE: &str = r"^[^@]+@[^@]+\.[^@]+";
const USERNAME_SHAPE: &str = r"^[a-zA-Z0-9_]{3,20}$";
const DOMAIN_SHAPE: &str = r"^[a-zA-Z0-9-]+\.[a-zA-Z]{2,}$";

/// Every shape a query matches; more than one can hold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryKinds {
    pub email: bool,
    pub username: bool,
    pub domain: bool,
    pub name: bool,
}

/// Classifies a free-text query
pub fn classify_query(query: &str) -> Result<QueryKinds, regex::Error> {
    let query = query.trim();
    let email = Regex::new(EMAIL_SHAPE)?.is_match(query);
    let username = Regex::new(USERNAME_SHAPE)?.is_match(query);
    let domain = Regex::new(DOMAIN_SHAPE)?.is_match(query);

    // Anything else with at least two words is read as a person's name.
    let name = !(email || username || domain) && query.split_whitespace().count() >= 2;

    Ok(QueryKinds {
        email,
        username,
        domain,
        name,
    })
}

/// What one tool produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Intel {
    Dorks(DorkResults),
    Profiles(Vec<String>),
    Harvest(HarvestResult),
    Usernames(Vec<String>),
    Failed { error: String },
}

/// Everything gathered for one query
#[derive(Debug, Clone, Serialize)]
pub struct Dossier {
    pub query: String,
    pub kinds: QueryKinds,
    pub intel: BTreeMap<String, Intel>,
}

fn into_intel<T>(tool: &str, result: Result<T, ReconError>, wrap: impl FnOnce(T) -> Intel) -> Intel {
    match result {
        Ok(value) => wrap(value),
        Err(err) => {
            tracing::warn!("Dossier tool '{}' failed: {}", tool, err);
            Intel::Failed {
                error: err.to_string(),
            }
        }
    }
}

/// Builds a dossier for `query`
///
/// Dork search always runs; the existence probe runs for username-shaped
/// queries, harvest for domains, and candidate generation for full names.
pub async fn build_dossier(engine: &Engine, query: &str) -> Result<Dossier, ReconError> {
    let kinds = classify_query(query)?;
    tracing::info!("Compiling dossier for '{}': {:?}", query, kinds);

    let dorks = async {
        let result = engine.dork_search(query).await;
        Some(("google_dorks", into_intel("google_dorks", result, Intel::Dorks)))
    };
    let socials = async {
        if !kinds.username {
            return None;
        }
        let result = engine.probe_configured(query).await;
        Some(("social_search", into_intel("social_search", result, Intel::Profiles)))
    };
    let domain = async {
        if !kinds.domain {
            return None;
        }
        let result = engine.harvest(query).await;
        Some(("domain_intel", into_intel("domain_intel", result, Intel::Harvest)))
    };

    let (dorks, socials, domain) = tokio::join!(dorks, socials, domain);

    let mut intel: BTreeMap<String, Intel> = [dorks, socials, domain]
        .into_iter()
        .flatten()
        .map(|(key, entry)| (key.to_string(), entry))
        .collect();

    if kinds.name {
        intel.insert(
            "username_candidates".to_string(),
            Intel::Usernames(candidate_usernames(query)),
        );
    }

    Ok(Dossier {
        query: query.to_string(),
        kinds,
        intel,
    })
}
