//! Mailio DNS discovery (MIR-5).
//!
//! Checks whether a domain supports the Mailio exchange protocol by reading the `MAILIO1` TXT
//! record published at `mailio._mailiokey.<domain>`, validating its ed25519 public key, and
//! collecting the domain's IPv4 addresses. DNS itself is delegated to a [`DnsResolver`].

mod error;
mod options;
mod resolver;
mod services;
mod types;

pub use error::{DiscoveryError, DiscoveryResult};
pub use options::{DiscoveryOptions, DEFAULT_TIMEOUT_SECS};
pub use resolver::{DnsResolver, HickoryDnsResolver};
pub use services::{
    discovery_name, parse_txt_v1, validate_public_key, Discoverer, DISCOVERY_PREFIX,
    MAILIO_V1_MARKER,
};
pub use types::{DiscoveryRecord, PUBLIC_KEY_LEN};

pub use hickory_resolver::ResolveError;
pub use tokio_util::sync::CancellationToken;
