use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Static overrides: exact name to IP literal.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResolveConfig {
    /// TTL placed on synthesized override answers.
    #[serde(default)]
    pub ttl: u32,

    #[serde(default)]
    pub records: BTreeMap<String, String>,
}

impl ResolveConfig {
    /// Entries whose value is not an IP literal. They are kept; queries that
    /// hit them fail individually.
    pub fn invalid_records(&self) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .filter(|(_, ip)| !ip.is_empty() && ip.parse::<IpAddr>().is_err())
            .map(|(name, ip)| (name.as_str(), ip.as_str()))
            .collect()
    }
}
