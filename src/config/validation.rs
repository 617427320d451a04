use crate::config::types::{Config, DorkConfig, FetchConfig, HarvestConfig, ProbeConfig, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on the per-request timeout, in seconds
const MAX_TIMEOUT_SECS: u64 = 120;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_search_config(&config.search)?;
    validate_harvest_config(&config.harvest)?;
    validate_dork_config(&config.dork)?;
    validate_probe_config(&config.probe)?;
    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "Search base_url '{}' must use http or https",
            config.base_url
        )));
    }

    Ok(())
}

fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.result_count < 1 {
        return Err(ConfigError::Validation(
            "harvest result_count must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_dork_config(config: &DorkConfig) -> Result<(), ConfigError> {
    if config.result_count < 1 {
        return Err(ConfigError::Validation(
            "dork result_count must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.sites_path.is_empty() {
        return Err(ConfigError::Validation(
            "sites_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
