//! Discovery configuration.

use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DiscoveryError, DiscoveryResult};

/// Default deadline for one discovery, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Options used by [`Discoverer::from_options`](crate::Discoverer::from_options).
///
/// Deserializable so callers can embed it in their own configuration files:
///
/// ```json
/// { "nameserver": "1.1.1.1", "timeoutSecs": 3, "concurrentLookups": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryOptions {
    /// Nameserver IP to query. `None` or an empty string means the system resolver.
    pub nameserver: Option<String>,
    /// Deadline for the whole discovery (both queries), in seconds. `0` disables it.
    pub timeout_secs: u64,
    /// Issue the TXT and address queries together instead of one after the other.
    pub concurrent_lookups: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            nameserver: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrent_lookups: true,
        }
    }
}

impl DiscoveryOptions {
    /// Parsed nameserver address, if one is configured.
    pub fn nameserver_ip(&self) -> DiscoveryResult<Option<IpAddr>> {
        match self.nameserver.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(ns) => ns.parse().map(Some).map_err(|_| {
                DiscoveryError::InvalidOptions(format!("Invalid DNS server address: {ns}"))
            }),
        }
    }

    /// The configured deadline, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
