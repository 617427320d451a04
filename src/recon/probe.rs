//! Existence probe
//!
//! Expands each site template with a candidate identifier, sends a HEAD to
//! every resulting URL, and keeps the URLs that answered 200. A 404 and a
//! timeout look the same to the caller: both are simply absent.

use crate::config::SiteList;
use crate::fetch::{Dispatcher, FetchJob};
use crate::url::expand_template;
use crate::TemplateError;

/// Jobs built from a site list, plus the templates that could not be used
#[derive(Debug, Clone, Default)]
pub struct ProbePlan {
    pub jobs: Vec<FetchJob>,
    pub skipped: Vec<TemplateError>,
}

/// Builds one HEAD job per site, skipping templates that do not expand
pub fn plan_probe(candidate: &str, sites: &SiteList) -> ProbePlan {
    let mut plan = ProbePlan::default();

    for (name, template) in sites.templates() {
        match expand_template(name, template, candidate) {
            Ok(url) => plan.jobs.push(FetchJob::head(url)),
            Err(err) => {
                tracing::warn!("Skipping site: {}", err);
                plan.skipped.push(err);
            }
        }
    }

    plan
}

/// Returns the site URLs at which `candidate` resolved with HTTP 200
///
/// Order follows completion, not the site list.
pub async fn probe_existence(dispatcher: &Dispatcher, candidate: &str, sites: &SiteList) -> Vec<String> {
    let plan = plan_probe(candidate, sites);
    tracing::info!(
        "Probing '{}' across {} sites ({} skipped)",
        candidate,
        plan.jobs.len(),
        plan.skipped.len()
    );

    let found = dispatcher.dispatch_probe(plan.jobs).await;
    tracing::info!("'{}' found on {} sites", candidate, found.len());
    found
}
