//! DNS resolver seam and the Hickory-backed default implementation.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::{
    ResolveError, TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
};

/// The two queries discovery needs from a resolver.
///
/// Implementations return records in the order the resolver produced them.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// TXT records at `name`, each record's character strings joined into one string.
    ///
    /// NXDOMAIN and NODATA are errors like any other resolver failure; an empty list only
    /// comes from a resolver that answered with no records at all.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError>;

    /// All address records (A and AAAA) at `name`.
    async fn lookup_ip_addr(&self, name: &str) -> Result<Vec<IpAddr>, ResolveError>;
}

/// [`DnsResolver`] backed by `hickory_resolver::TokioResolver`.
pub struct HickoryDnsResolver {
    inner: TokioResolver,
}

impl HickoryDnsResolver {
    /// Resolver using the host system configuration (e.g. `/etc/resolv.conf`).
    ///
    /// Falls back to Hickory's default upstream set (Google Public DNS) when the system
    /// configuration cannot be loaded.
    pub fn system() -> Self {
        Self {
            inner: build_system_resolver(),
        }
    }

    /// Resolver that sends every query to `ns_ip` on port 53.
    pub fn with_nameserver(ns_ip: IpAddr) -> Self {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ns_ip], 53, true),
        );
        let provider = TokioConnectionProvider::default();
        Self {
            inner: TokioResolver::builder_with_config(config, provider)
                .with_options(ResolverOpts::default())
                .build(),
        }
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        let response = self.inner.txt_lookup(name).await?;
        Ok(response
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|data| String::from_utf8_lossy(data).to_string())
                    .collect::<String>()
            })
            .collect())
    }

    async fn lookup_ip_addr(&self, name: &str) -> Result<Vec<IpAddr>, ResolveError> {
        let response = self.inner.lookup_ip(name).await?;
        Ok(response.iter().collect())
    }
}

/// Build a resolver using the host system DNS configuration (with fallback).
fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    let provider = TokioConnectionProvider::default();
    TokioResolver::builder_with_config(ResolverConfig::default(), provider)
        .with_options(ResolverOpts::default())
        .build()
}
