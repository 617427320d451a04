//! URL handling module for Recon-Fanout
//!
//! This module turns site templates into probe URLs and free-text queries
//! into search-engine URLs.

mod query;
mod template;

pub use query::build_search_url;
pub use template::{expand_template, has_placeholder, USERNAME_PLACEHOLDER};
