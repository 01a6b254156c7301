//! Discovery façade.
//!
//! [`Discoverer`] owns a resolver plus the lookup policy (deadline, concurrency) and exposes the
//! single discovery operation.

mod discover;
mod record;

use std::sync::Arc;
use std::time::Duration;

use idna::AsciiDenyList;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::options::DiscoveryOptions;
use crate::resolver::{DnsResolver, HickoryDnsResolver};
use crate::types::DiscoveryRecord;

pub use discover::{discovery_name, DISCOVERY_PREFIX};
pub use record::{parse_txt_v1, validate_public_key, MAILIO_V1_MARKER};

/// Maximum length of an ASCII domain name.
const MAX_DOMAIN_LEN: usize = 253;

/// Validate and normalise a domain name input.
///
/// Trims whitespace and one trailing dot, rejects IP addresses, converts internationalised
/// domain names (IDN) to ASCII via IDNA 2008, and rejects empty or overlong inputs.
/// Underscore labels are DNS-legal and pass through.
fn validate_domain(domain: &str) -> DiscoveryResult<String> {
    let domain = domain.trim();
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.is_empty() {
        return Err(DiscoveryError::InvalidDomain(
            "Domain name is required".to_string(),
        ));
    }
    if domain.parse::<std::net::IpAddr>().is_ok() {
        return Err(DiscoveryError::InvalidDomain(format!(
            "Expected a domain name, got an IP address: {domain}"
        )));
    }
    let ascii_domain = idna::domain_to_ascii_cow(domain.as_bytes(), AsciiDenyList::URL)
        .map_err(|_| DiscoveryError::InvalidDomain(format!("Invalid domain name: {domain}")))?
        .into_owned();
    if ascii_domain.len() > MAX_DOMAIN_LEN {
        return Err(DiscoveryError::InvalidDomain(format!(
            "Domain name exceeds maximum length of {MAX_DOMAIN_LEN} characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}

/// Checks whether a domain supports the Mailio exchange protocol.
///
/// ```rust,no_run
/// use mailio_discovery::Discoverer;
/// # async fn demo() -> mailio_discovery::DiscoveryResult<()> {
/// let record = Discoverer::new().discover("mail.io").await?;
/// assert!(record.is_mailio);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Discoverer {
    resolver: Arc<dyn DnsResolver>,
    timeout: Option<Duration>,
    concurrent_lookups: bool,
}

impl Discoverer {
    /// Discoverer on the system resolver with default options.
    pub fn new() -> Self {
        Self::with_resolver(HickoryDnsResolver::system())
    }

    /// Discoverer on a caller-supplied resolver with default options.
    pub fn with_resolver(resolver: impl DnsResolver + 'static) -> Self {
        let defaults = DiscoveryOptions::default();
        Self {
            resolver: Arc::new(resolver),
            timeout: defaults.timeout(),
            concurrent_lookups: defaults.concurrent_lookups,
        }
    }

    /// Discoverer configured from [`DiscoveryOptions`].
    pub fn from_options(options: &DiscoveryOptions) -> DiscoveryResult<Self> {
        let resolver = match options.nameserver_ip()? {
            Some(ns_ip) => HickoryDnsResolver::with_nameserver(ns_ip),
            None => HickoryDnsResolver::system(),
        };
        Ok(Self::with_resolver(resolver)
            .with_timeout(options.timeout())
            .with_concurrent_lookups(options.concurrent_lookups))
    }

    /// Deadline for a whole discovery. `None` waits for the resolver indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue the TXT and address queries together (`true`) or one after the other.
    #[must_use]
    pub fn with_concurrent_lookups(mut self, concurrent: bool) -> Self {
        self.concurrent_lookups = concurrent;
        self
    }

    /// DNS discovery of `domain`.
    ///
    /// Looks up the `MAILIO1` TXT record at `mailio._mailiokey.<domain>` and the domain's
    /// IPv4 addresses, and returns the parsed record. Bounded by the configured timeout.
    pub async fn discover(&self, domain: &str) -> DiscoveryResult<DiscoveryRecord> {
        self.discover_with_cancel(domain, &CancellationToken::new())
            .await
    }

    /// Same as [`discover`](Self::discover), aborting with [`DiscoveryError::Cancelled`] as
    /// soon as `cancel` fires.
    pub async fn discover_with_cancel(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> DiscoveryResult<DiscoveryRecord> {
        let domain = validate_domain(domain)?;
        let lookup = discover::discover(self.resolver.as_ref(), &domain, self.concurrent_lookups);

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(DiscoveryError::Cancelled),
            res = async {
                match self.timeout {
                    Some(limit) => timeout(limit, lookup)
                        .await
                        .unwrap_or(Err(DiscoveryError::Timeout(limit))),
                    None => lookup.await,
                }
            } => res,
        };

        match &result {
            Ok(record) => log::debug!(
                "{domain}: Mailio {} key, {} IPv4 address(es)",
                record.public_key_type,
                record.ips.len()
            ),
            Err(e) if e.is_expected() => log::warn!("Discovery of {domain} failed: {e}"),
            Err(e) => log::error!("Discovery of {domain} failed: {e}"),
        }
        result
    }
}

impl std::fmt::Debug for Discoverer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discoverer")
            .field("timeout", &self.timeout)
            .field("concurrent_lookups", &self.concurrent_lookups)
            .finish_non_exhaustive()
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new()
    }
}
