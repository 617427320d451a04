//! Output module for rendering results
//!
//! This module handles:
//! - Markdown reports for each consumer
//! - Pretty JSON for machine consumption
//! - Writing a rendered report to a file or stdout

mod markdown;

pub use markdown::{
    format_dork_markdown, format_dossier_markdown, format_harvest_markdown, format_probe_markdown,
    format_scrape_markdown, format_usernames_markdown,
};

use crate::ReconError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Renders any serializable result as pretty JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReconError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Picks the markdown or JSON rendering of a result
pub fn render<T, F>(format: OutputFormat, value: &T, markdown: F) -> Result<String, ReconError>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Markdown => Ok(markdown(value)),
        OutputFormat::Json => render_json(value),
    }
}

/// Writes a rendered report to `path`, or to stdout when no path is given
pub fn write_report(report: &str, path: Option<&Path>) -> Result<(), ReconError> {
    match path {
        Some(path) => {
            std::fs::write(path, report)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(report.as_bytes())?;
            if !report.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchOutcome;
    use crate::recon::HarvestResult;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_json_outcome_shape() {
        let json = render_json(&FetchOutcome::StatusOnly(404)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "status_only");
        assert_eq!(value["value"], 404);
    }

    #[test]
    fn test_render_picks_format() {
        let harvested = HarvestResult {
            emails: vec!["a@x.test".to_string()],
            subdomains: vec!["w.x.test".to_string()],
        };

        let md = render(OutputFormat::Markdown, &harvested, |h| {
            format_harvest_markdown("x.test", h)
        })
        .unwrap();
        assert!(md.starts_with("# Harvest: x.test"));

        let json = render(OutputFormat::Json, &harvested, |h| {
            format_harvest_markdown("x.test", h)
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["emails"][0], "a@x.test");
        assert_eq!(value["subdomains"][0], "w.x.test");
    }

    #[test]
    fn test_write_report_to_file() {
        let file = NamedTempFile::new().unwrap();
        write_report("# Report\n", Some(file.path())).unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "# Report\n");
    }
}
