//! Configuration module for Recon-Fanout
//!
//! This module handles loading, parsing, and validating the TOML engine
//! configuration and the JSON site list used by the existence probe.
//!
//! # Example
//!
//! ```no_run
//! use recon_fanout::config::{load_config, load_sites};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("recon.toml")).unwrap();
//! let sites = load_sites(Path::new(&config.probe.sites_path)).unwrap();
//! println!("Probing {} sites", sites.len());
//! ```

mod parser;
mod sites;
mod types;
mod validation;

// Re-export types
pub use sites::{load_sites, SiteEntry, SiteList};
pub use types::{
    Config, DorkConfig, FetchConfig, HarvestConfig, ProbeConfig, SearchConfig, BROWSER_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
