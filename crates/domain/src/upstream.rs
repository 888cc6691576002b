use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A DNS-over-HTTPS resolver URL (RFC 8484 POST endpoint).
///
/// Parsing only checks what can be checked offline: an `https://` (or plain
/// `http://`, for local resolvers) scheme, a non-empty host and, if present,
/// a numeric port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpstreamEndpoint {
    url: Arc<str>,
    hostname: Arc<str>,
    secure: bool,
}

impl UpstreamEndpoint {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }
}

fn split_authority(authority: &str) -> Option<(&str, Option<u16>)> {
    if let Some(rest) = authority.strip_prefix('[') {
        let end = rest.find(']')?;
        let host = &rest[..end];
        let after = &rest[end + 1..];
        if after.is_empty() {
            return Some((host, None));
        }
        let port = after.strip_prefix(':')?.parse::<u16>().ok()?;
        return Some((host, Some(port)));
    }
    match authority.rsplit_once(':') {
        Some((host, port)) => Some((host, Some(port.parse::<u16>().ok()?))),
        None => Some((authority, None)),
    }
}

impl FromStr for UpstreamEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (rest, secure) = if let Some(rest) = s.strip_prefix("https://") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("http://") {
            (rest, false)
        } else {
            return Err(format!(
                "Invalid upstream '{}'. Expected an https:// DoH URL, e.g. https://1.1.1.1/dns-query",
                s
            ));
        };

        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if authority.chars().any(char::is_whitespace) || authority.contains('@') {
            return Err(format!("Invalid host in upstream URL '{}'", s));
        }
        let (host, _port) = split_authority(authority)
            .ok_or_else(|| format!("Invalid port in upstream URL '{}'", s))?;
        if host.is_empty() {
            return Err(format!("Missing host in upstream URL '{}'", s));
        }

        Ok(Self {
            url: s.into(),
            hostname: host.into(),
            secure,
        })
    }
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
