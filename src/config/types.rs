use serde::Deserialize;
use std::time::Duration;

/// Desktop-browser user agent sent with every request unless overridden
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Recon-Fanout
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub search: SearchConfig,
    pub harvest: HarvestConfig,
    pub dork: DorkConfig,
    pub probe: ProbeConfig,
}

/// Per-request behaviour of the fetch worker
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total time allowed for one request, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of redirects followed before giving up
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout_secs: 5,
            max_redirects: 10,
        }
    }
}

/// Search engine used by harvest and dork queries
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base search URL; the query goes in `q`, the result count in `num`
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/search".to_string(),
        }
    }
}

/// Harvest-extract settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Results requested per search query
    #[serde(rename = "result-count")]
    pub result_count: u32,

    /// Match the target domain literally in the subdomain pattern
    #[serde(rename = "escape-domain")]
    pub escape_domain: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            result_count: 50,
            escape_domain: false,
        }
    }
}

/// Dork search settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DorkConfig {
    /// Results requested per dork, and links kept per dork
    #[serde(rename = "result-count")]
    pub result_count: u32,
}

impl Default for DorkConfig {
    fn default() -> Self {
        Self { result_count: 5 }
    }
}

/// Existence probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// JSON file mapping site name to `{ "url": template }`
    #[serde(rename = "sites-path")]
    pub sites_path: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sites_path: "sherlock_sites.json".to_string(),
        }
    }
}
