use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use super::blocking::BlockingConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolve::ResolveConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::upstream::UpstreamEndpoint;

const LOCAL_CONFIG_FILE: &str = "doh-proxy.toml";

/// Main configuration structure for the proxy
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listen address and reader tasks
    #[serde(default)]
    pub server: ServerConfig,

    /// DoH resolvers
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Static name overrides
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Blocked names
    #[serde(default)]
    pub blocking: BlockingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-proxy.toml in current directory
    /// 3. $HOME/.config/doh-proxy/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(PathBuf::from).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize_names();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(address) = overrides.address {
            self.server.address = address;
        }
        if let Some(workers) = overrides.workers {
            self.server.workers = workers;
        }
        if let Some(upstreams) = overrides.upstreams {
            self.upstream.servers = upstreams;
        }
        if let Some(blocklist) = overrides.blocklist {
            self.blocking.domains = blocklist;
        }
        for (name, ip) in overrides.resolve {
            self.resolve.records.insert(name, ip);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Lookups match the question name exactly, which never carries the root
    /// dot, so keys written as FQDNs are stored without it.
    fn normalize_names(&mut self) {
        let records = std::mem::take(&mut self.resolve.records);
        self.resolve.records = records
            .into_iter()
            .map(|(name, ip)| (strip_root(&name), ip.trim().to_string()))
            .collect();
        for domain in &mut self.blocking.domains {
            *domain = strip_root(domain);
        }
    }

    /// Validate configuration
    ///
    /// Only the listen address and upstream URLs are fatal; override values
    /// are checked when a query needs them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        self.upstream_endpoints()?;

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout must be at least 1 second".to_string(),
            ));
        }

        if !self.logging.is_valid_level() {
            return Err(ConfigError::Validation(format!(
                "Invalid log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.address.trim().parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid listen address '{}': {}",
                self.server.address, e
            ))
        })
    }

    pub fn upstream_endpoints(&self) -> Result<Vec<UpstreamEndpoint>, ConfigError> {
        self.upstream
            .servers
            .iter()
            .map(|s| s.parse::<UpstreamEndpoint>().map_err(ConfigError::Validation))
            .collect()
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        let home = std::env::var_os("HOME")?;
        let user = Path::new(&home).join(".config/doh-proxy/config.toml");
        user.exists().then_some(user)
    }
}

fn strip_root(name: &str) -> String {
    let name = name.trim();
    name.strip_suffix('.').unwrap_or(name).to_string()
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub address: Option<String>,
    pub workers: Option<usize>,
    pub upstreams: Option<Vec<String>>,
    pub blocklist: Option<Vec<String>>,
    /// Merged into the override map entry by entry.
    pub resolve: Vec<(String, String)>,
    pub log_level: Option<String>,
}
