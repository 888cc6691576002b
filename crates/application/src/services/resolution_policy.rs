use doh_proxy_domain::{Config, DomainError, Message, RecordType, ResourceRecord, ResponseCode};
use rustc_hash::{FxHashMap, FxHashSet};
use std::net::IpAddr;

/// Outcome of evaluating a query against the local tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Synthesized from the override map; may carry zero answers when the
    /// stored address is of the other family.
    Override(Message),
    /// NXDOMAIN for a blocklisted name.
    Blocked(Message),
    /// Relay the original bytes upstream.
    Forward,
}

/// Static override map and blocklist, built once and shared read-only.
#[derive(Debug, Default)]
pub struct ResolutionPolicy {
    overrides: FxHashMap<String, String>,
    blocklist: FxHashSet<String>,
    ttl: u32,
}

impl ResolutionPolicy {
    pub fn new<O, B>(overrides: O, blocklist: B, ttl: u32) -> Self
    where
        O: IntoIterator<Item = (String, String)>,
        B: IntoIterator<Item = String>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(name, ip)| (strip_root(name), ip))
                .collect(),
            blocklist: blocklist.into_iter().map(strip_root).collect(),
            ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.resolve.records.clone(),
            config.blocking.domains.iter().cloned(),
            config.resolve.ttl,
        )
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocklist.len()
    }

    /// Only the first question is consulted. Override beats blocklist;
    /// only A and AAAA queries are ever answered from the override map.
    pub fn decide(&self, query: &Message) -> Result<PolicyDecision, DomainError> {
        let Some(question) = query.first_question() else {
            return Ok(PolicyDecision::Forward);
        };

        // Table keys are plain dotted text, so a label holding a literal dot
        // (presented as `\.`) never matches a multi-label key.
        let domain = question.name.to_string();

        if question.record_type.is_address() {
            if let Some(value) = self.overrides.get(&domain).filter(|v| !v.is_empty()) {
                // IPv4-mapped IPv6 values count as IPv4.
                let address = value
                    .parse::<IpAddr>()
                    .map_err(|_| {
                        DomainError::ConfigError(format!(
                            "override for '{}' is not an IP address: '{}'",
                            domain, value
                        ))
                    })?
                    .to_canonical();

                let mut response = Message::response_to(query);
                if family_matches(question.record_type, address) {
                    response = response.with_answer(ResourceRecord::address(
                        question.name.clone(),
                        address,
                        self.ttl,
                    ));
                }
                return Ok(PolicyDecision::Override(response));
            }
        }

        if self.blocklist.contains(&domain) {
            return Ok(PolicyDecision::Blocked(
                Message::response_to(query).with_response_code(ResponseCode::NxDomain),
            ));
        }

        Ok(PolicyDecision::Forward)
    }
}

fn family_matches(record_type: RecordType, address: IpAddr) -> bool {
    matches!(
        (record_type, address),
        (RecordType::A, IpAddr::V4(_)) | (RecordType::AAAA, IpAddr::V6(_))
    )
}

fn strip_root(mut name: String) -> String {
    if name.ends_with('.') {
        name.pop();
    }
    name
}
