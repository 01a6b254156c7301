//! TXT lookup and orchestration.

use std::net::IpAddr;

use futures::future::join;

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::resolver::DnsResolver;
use crate::types::DiscoveryRecord;

use super::record::{parse_txt_v1, validate_public_key, MAILIO_V1_MARKER};

/// Label prefix under which a domain publishes its discovery record.
pub const DISCOVERY_PREFIX: &str = "mailio._mailiokey.";

/// TXT query name for `domain`.
pub fn discovery_name(domain: &str) -> String {
    format!("{DISCOVERY_PREFIX}{domain}")
}

/// Run one discovery against `resolver`. `domain` must already be normalised.
pub(crate) async fn discover(
    resolver: &dyn DnsResolver,
    domain: &str,
    concurrent: bool,
) -> DiscoveryResult<DiscoveryRecord> {
    let name = discovery_name(domain);

    let (txts, addrs) = if concurrent {
        let (txts, addrs) = join(resolver.lookup_txt(&name), resolver.lookup_ip_addr(domain)).await;
        let txts = require_txts(&name, txts?)?;
        (txts, addrs?)
    } else {
        let txts = require_txts(&name, resolver.lookup_txt(&name).await?)?;
        (txts, resolver.lookup_ip_addr(domain).await?)
    };
    log::debug!(
        "{name}: {} TXT record(s), {} address(es)",
        txts.len(),
        addrs.len()
    );

    let ips = ipv4_addresses(&addrs);

    let Some(txt) = txts.iter().find(|txt| txt.contains(MAILIO_V1_MARKER)) else {
        return Err(DiscoveryError::NotFound(format!(
            "no {MAILIO_V1_MARKER} record at {name}"
        )));
    };

    let mut record = parse_txt_v1(txt)?;
    validate_public_key(&record.public_key).map_err(|e| match e {
        DiscoveryError::InvalidFormat(msg) | DiscoveryError::InvalidPublicKey(msg) => {
            DiscoveryError::InvalidPublicKey(msg)
        }
        other => other,
    })?;

    record.domain = domain.to_string();
    record.ips = ips;
    Ok(record)
}

fn require_txts(name: &str, txts: Vec<String>) -> DiscoveryResult<Vec<String>> {
    if txts.is_empty() {
        return Err(DiscoveryError::NotFound(format!(
            "no TXT records at {name}"
        )));
    }
    Ok(txts)
}

/// IPv4 addresses in resolver order; IPv4-mapped IPv6 addresses count as IPv4.
fn ipv4_addresses(addrs: &[IpAddr]) -> Vec<String> {
    addrs
        .iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped(),
        })
        .map(|ip| ip.to_string())
        .collect()
}
