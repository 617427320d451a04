//! Markdown report generation
//!
//! Human-readable reports for each consumer's results.

use crate::fetch::{FetchOutcome, ScrapeResultSet};
use crate::recon::{Dossier, DorkResults, HarvestResult, Intel};

/// Longest body excerpt shown per URL in a scrape report
const EXCERPT_CHARS: usize = 200;

/// Formats a scrape result set, one section per URL
pub fn format_scrape_markdown(results: &ScrapeResultSet) -> String {
    let mut md = String::new();

    md.push_str("# Bulk Scrape\n\n");
    let failed = results.values().filter(|o| o.is_error()).count();
    md.push_str(&format!("- **URLs**: {}\n", results.len()));
    md.push_str(&format!("- **Transport Errors**: {}\n\n", failed));

    for (url, outcome) in results {
        md.push_str(&format!("## {}\n\n", url));
        match outcome {
            FetchOutcome::Body(body) => {
                md.push_str(&format!("- **Bytes**: {}\n\n", body.len()));
                md.push_str("```\n");
                md.push_str(&excerpt(body));
                md.push_str("\n```\n\n");
            }
            FetchOutcome::StatusOnly(code) => {
                md.push_str(&format!("- **Status**: {}\n\n", code));
            }
            FetchOutcome::Error(message) => {
                md.push_str(&format!("- **Error**: {}\n\n", message));
            }
        }
    }

    md
}

/// Formats the URLs at which a username was found
pub fn format_probe_markdown(candidate: &str, found: &[String]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Existence Probe: {}\n\n", candidate));
    if found.is_empty() {
        md.push_str("No profiles found.\n");
        return md;
    }

    md.push_str(&format!("Found on {} sites:\n\n", found.len()));
    let mut sorted: Vec<&String> = found.iter().collect();
    sorted.sort();
    for url in sorted {
        md.push_str(&format!("- {}\n", url));
    }

    md
}

/// Formats harvested emails and subdomains
pub fn format_harvest_markdown(domain: &str, harvested: &HarvestResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Harvest: {}\n\n", domain));
    push_list(&mut md, "Emails", &harvested.emails);
    push_list(&mut md, "Subdomains", &harvested.subdomains);

    md
}

/// Formats result links per dork
pub fn format_dork_markdown(query: &str, found: &DorkResults) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Dork Search: {}\n\n", query));
    for (dork, links) in found {
        push_list(&mut md, dork, links);
    }

    md
}

/// Formats candidate usernames for a name
pub fn format_usernames_markdown(full_name: &str, candidates: &[String]) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Username Candidates: {}\n\n", full_name));
    push_list(&mut md, "Candidates", candidates);
    md
}

/// Formats a full dossier
pub fn format_dossier_markdown(dossier: &Dossier) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Dossier: {}\n\n", dossier.query));

    let kinds = dossier.kinds;
    let mut shapes = Vec::new();
    if kinds.email {
        shapes.push("email");
    }
    if kinds.username {
        shapes.push("username");
    }
    if kinds.domain {
        shapes.push("domain");
    }
    if kinds.name {
        shapes.push("name");
    }
    if shapes.is_empty() {
        shapes.push("free text");
    }
    md.push_str(&format!("- **Query Type**: {}\n", shapes.join(", ")));
    md.push_str(&format!("- **Intelligence Packets**: {}\n\n", dossier.intel.len()));

    for (tool, intel) in &dossier.intel {
        md.push_str(&format!("## {}\n\n", tool));
        match intel {
            Intel::Dorks(found) => {
                for (dork, links) in found {
                    md.push_str(&format!("- `{}`: {} links\n", dork, links.len()));
                    for link in links {
                        md.push_str(&format!("  - {}\n", link));
                    }
                }
                md.push('\n');
            }
            Intel::Profiles(urls) | Intel::Usernames(urls) => {
                for url in urls {
                    md.push_str(&format!("- {}\n", url));
                }
                md.push('\n');
            }
            Intel::Harvest(harvested) => {
                md.push_str(&format!("- **Emails**: {}\n", harvested.emails.join(", ")));
                md.push_str(&format!(
                    "- **Subdomains**: {}\n\n",
                    harvested.subdomains.join(", ")
                ));
            }
            Intel::Failed { error } => {
                md.push_str(&format!("- **Error**: {}\n\n", error));
            }
        }
    }

    md
}

fn push_list(md: &mut String, title: &str, items: &[String]) {
    md.push_str(&format!("## {} ({})\n\n", title, items.len()));
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
    md.push('\n');
}

fn excerpt(body: &str) -> String {
    let mut short: String = body.chars().take(EXCERPT_CHARS).collect();
    if body.chars().count() > EXCERPT_CHARS {
        short.push_str("...");
    }
    short
}
