use doh_proxy_domain::{CliOverrides, Config};
use std::path::PathBuf;
use tracing::{info, warn};

/// Loads, merges and validates the configuration. Any error here is fatal.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logs what was loaded and anything suspicious that is not worth refusing
/// to start over. Must run after logging is initialized.
pub fn report_config(config: &Config, explicit_path: Option<&str>) {
    match explicit_path.map(PathBuf::from).or_else(Config::get_config_path) {
        Some(path) => info!(path = %path.display(), "Configuration file found"),
        None => info!("No configuration file found, using defaults and flags"),
    }

    if config.upstream.servers.is_empty() {
        warn!("No upstream servers configured; only local answers will succeed");
    }

    for (name, value) in config.resolve.invalid_records() {
        warn!(
            domain = %name,
            value = %value,
            "Override value is not an IP address; queries for it will fail"
        );
    }
}
