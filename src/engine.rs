//! Engine entry points
//!
//! [`Engine`] bundles a configuration with a dispatcher and exposes each
//! consumer as an async call. [`BlockingEngine`] owns a tokio runtime and
//! offers the same calls synchronously, returning plain strings and string
//! collections suited to an in-process language boundary.

use crate::config::{load_sites, Config, SiteList};
use crate::fetch::{Dispatcher, ReqwestTransport, ScrapeResultSet, Transport};
use crate::recon::{self, DorkResults, Dossier, HarvestResult};
use crate::ReconError;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Async engine: configuration plus a dispatcher over one transport
#[derive(Debug, Clone)]
pub struct Engine {
    config: Arc<Config>,
    dispatcher: Dispatcher,
}

impl Engine {
    /// Creates an engine backed by a reqwest client built from `config.fetch`
    pub fn new(config: Config) -> Result<Self, ReconError> {
        let transport = ReqwestTransport::new(&config.fetch)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates an engine over any transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let dispatcher = Dispatcher::new(transport, config.fetch.timeout());
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Loads the site list named by `probe.sites-path`
    pub fn load_sites(&self) -> Result<SiteList, ReconError> {
        Ok(load_sites(Path::new(&self.config.probe.sites_path))?)
    }

    pub async fn bulk_scrape(&self, urls: Vec<String>) -> ScrapeResultSet {
        recon::bulk_scrape(&self.dispatcher, urls).await
    }

    pub async fn probe_existence(&self, candidate: &str, sites: &SiteList) -> Vec<String> {
        recon::probe_existence(&self.dispatcher, candidate, sites).await
    }

    /// Probes against the configured site list; fails only if it cannot be loaded
    pub async fn probe_configured(&self, candidate: &str) -> Result<Vec<String>, ReconError> {
        let sites = self.load_sites()?;
        Ok(self.probe_existence(candidate, &sites).await)
    }

    pub async fn harvest(&self, domain: &str) -> Result<HarvestResult, ReconError> {
        recon::harvest(
            &self.dispatcher,
            domain,
            &self.config.search,
            &self.config.harvest,
        )
        .await
    }

    pub async fn dork_search(&self, query: &str) -> Result<DorkResults, ReconError> {
        recon::dork_search(&self.dispatcher, query, &self.config.search, &self.config.dork).await
    }

    pub async fn dossier(&self, query: &str) -> Result<Dossier, ReconError> {
        recon::build_dossier(self, query).await
    }
}

/// Synchronous facade over [`Engine`]
///
/// Each call blocks the current thread until every job in its batch has an
/// outcome. Must not be created or dropped from inside an async context.
#[derive(Debug)]
pub struct BlockingEngine {
    runtime: tokio::runtime::Runtime,
    engine: Engine,
}

impl BlockingEngine {
    pub fn new(engine: Engine) -> Result<Self, ReconError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime, engine })
    }

    /// Builds a blocking engine with the reqwest transport
    pub fn from_config(config: Config) -> Result<Self, ReconError> {
        Self::new(Engine::new(config)?)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// `url -> body`, or the sentinel-prefixed error text for failed URLs
    pub fn bulk_scrape(&self, urls: Vec<String>) -> BTreeMap<String, String> {
        let results = self.runtime.block_on(self.engine.bulk_scrape(urls));
        recon::to_wire(&results)
    }

    /// Site URLs at which `candidate` exists, using the configured site list
    pub fn probe_existence(&self, candidate: &str) -> Result<Vec<String>, ReconError> {
        self.runtime.block_on(self.engine.probe_configured(candidate))
    }

    pub fn harvest(&self, domain: &str) -> Result<HarvestResult, ReconError> {
        self.runtime.block_on(self.engine.harvest(domain))
    }
}
