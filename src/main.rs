//! Recon-Fanout main entry point
//!
//! This is the command-line interface for the Recon-Fanout fetch engine.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use recon_fanout::config::{load_config_with_hash, load_sites, Config};
use recon_fanout::output::{self, OutputFormat};
use recon_fanout::recon::candidate_usernames;
use recon_fanout::Engine;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Recon-Fanout: parallel reconnaissance fetch engine
///
/// Fans many independent HTTP requests out at once and gathers every
/// outcome, then probes usernames, harvests emails and subdomains, or
/// runs search dorks over the results.
#[derive(Parser, Debug)]
#[command(name = "recon-fanout")]
#[command(version = "1.0.0")]
#[command(about = "Parallel reconnaissance fetch engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Markdown, global = true)]
    format: Format,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Markdown,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => OutputFormat::Markdown,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every URL's body concurrently
    Scrape {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },

    /// Check which sites have a profile for a username
    Probe {
        username: String,

        /// Site list JSON (overrides probe.sites-path)
        #[arg(long, value_name = "PATH")]
        sites: Option<PathBuf>,
    },

    /// Harvest emails and subdomains for a domain from search results
    Harvest { domain: String },

    /// Run search dorks for a query and list result links
    Dork { query: String },

    /// List likely usernames for a full name
    Usernames {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Classify a query and run every applicable tool at once
    Dossier { query: String },

    /// Validate the configuration and site list, then exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let format = OutputFormat::from(cli.format);
    let report = run(cli.command, config, format).await?;
    output::write_report(&report, cli.output.as_deref())?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("recon_fanout=info,warn"),
            1 => EnvFilter::new("recon_fanout=debug,info"),
            2 => EnvFilter::new("recon_fanout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs one subcommand and returns its rendered report
async fn run(command: Command, config: Config, format: OutputFormat) -> anyhow::Result<String> {
    let report = match command {
        Command::Scrape { urls } => {
            let engine = build_engine(config)?;
            let results = engine.bulk_scrape(urls).await;
            output::render(format, &results, output::format_scrape_markdown)?
        }
        Command::Probe { username, sites } => {
            let sites_path = sites.unwrap_or_else(|| PathBuf::from(&config.probe.sites_path));
            let sites = load_sites(&sites_path)
                .with_context(|| format!("failed to load site list {}", sites_path.display()))?;
            let engine = build_engine(config)?;
            let found = engine.probe_existence(&username, &sites).await;
            output::render(format, &found, |f| output::format_probe_markdown(&username, f))?
        }
        Command::Harvest { domain } => {
            let engine = build_engine(config)?;
            let harvested = engine.harvest(&domain).await?;
            output::render(format, &harvested, |h| output::format_harvest_markdown(&domain, h))?
        }
        Command::Dork { query } => {
            let engine = build_engine(config)?;
            let found = engine.dork_search(&query).await?;
            output::render(format, &found, |f| output::format_dork_markdown(&query, f))?
        }
        Command::Usernames { name } => {
            let full_name = name.join(" ");
            let candidates = candidate_usernames(&full_name);
            output::render(format, &candidates, |c| {
                output::format_usernames_markdown(&full_name, c)
            })?
        }
        Command::Dossier { query } => {
            let engine = build_engine(config)?;
            let dossier = engine.dossier(&query).await?;
            output::render(format, &dossier, output::format_dossier_markdown)?
        }
        Command::CheckConfig => handle_check_config(&config)?,
    };

    Ok(report)
}

fn build_engine(config: Config) -> anyhow::Result<Engine> {
    Engine::new(config).context("failed to build HTTP client")
}

/// Handles `check-config`: validates config and site list and summarizes them
fn handle_check_config(config: &Config) -> anyhow::Result<String> {
    let mut report = String::new();

    report.push_str("=== Recon-Fanout Configuration ===\n\n");
    report.push_str("Fetch:\n");
    report.push_str(&format!("  User agent: {}\n", config.fetch.user_agent));
    report.push_str(&format!("  Timeout: {}s\n", config.fetch.timeout_secs));
    report.push_str(&format!("  Max redirects: {}\n", config.fetch.max_redirects));

    report.push_str("\nSearch:\n");
    report.push_str(&format!("  Base URL: {}\n", config.search.base_url));
    report.push_str(&format!("  Harvest results per query: {}\n", config.harvest.result_count));
    report.push_str(&format!("  Escape domain: {}\n", config.harvest.escape_domain));
    report.push_str(&format!("  Dork results per query: {}\n", config.dork.result_count));

    let sites_path = Path::new(&config.probe.sites_path);
    report.push_str(&format!("\nSite list: {}\n", sites_path.display()));
    let sites = load_sites(sites_path)
        .with_context(|| format!("failed to load site list {}", sites_path.display()))?;
    report.push_str(&format!("  Sites: {}\n", sites.len()));

    let malformed = sites.malformed();
    if malformed.is_empty() {
        report.push_str("\n✓ Configuration is valid\n");
    } else {
        report.push_str(&format!(
            "  Missing {{username}} placeholder ({}): {}\n",
            malformed.len(),
            malformed.join(", ")
        ));
        report.push_str("\n✓ Configuration is valid (malformed sites will be skipped)\n");
    }

    Ok(report)
}
