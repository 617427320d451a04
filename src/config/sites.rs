//! Site list loading for the existence probe
//!
//! The site list is a JSON object keyed by site name:
//!
//! ```json
//! {
//!   "GitHub": { "url": "https://www.github.com/{username}", "errorType": "status_code" }
//! }
//! ```

use crate::url::has_placeholder;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One site the probe can check
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteEntry {
    /// URL template containing the `{username}` placeholder
    pub url: String,

    /// How the site signals a missing profile; carried through but unused
    #[serde(rename = "errorType", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// Mapping of site name to URL template, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SiteList {
    sites: BTreeMap<String, SiteEntry>,
}

impl SiteList {
    /// Builds a site list from `(name, template)` pairs
    pub fn from_templates<I, N, T>(templates: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let sites = templates
            .into_iter()
            .map(|(name, url)| {
                (
                    name.into(),
                    SiteEntry {
                        url: url.into(),
                        error_type: None,
                    },
                )
            })
            .collect();
        Self { sites }
    }

    /// Parses a site list from JSON text
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SiteEntry> {
        self.sites.get(name)
    }

    /// Iterates `(name, template)` pairs in name order
    pub fn templates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sites
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.url.as_str()))
    }

    /// Names of sites whose template lacks the placeholder
    pub fn malformed(&self) -> Vec<&str> {
        self.templates()
            .filter(|(_, template)| !has_placeholder(template))
            .map(|(name, _)| name)
            .collect()
    }
}

/// Loads the site list from a JSON file
///
/// A missing or unparsable file is fatal to the existence probe, which has
/// nothing to check without it.
pub fn load_sites(path: &Path) -> Result<SiteList, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let sites = SiteList::from_json(&content)?;
    tracing::debug!("Loaded {} sites from {}", sites.len(), path.display());
    Ok(sites)
}
