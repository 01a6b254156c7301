//! Unified error type definition

use std::time::Duration;

use hickory_resolver::ResolveError;
use thiserror::Error;

/// Discovery error type
///
/// Every variant is terminal: nothing is retried inside the crate.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// No TXT record at the discovery name, or none carrying the `v=MAILIO1` marker
    #[error("Discovery record not found: {0}")]
    NotFound(String),

    /// The matched TXT record (or its base64 key) is malformed
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The public key is not a 32-byte key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The domain name was rejected before any query was sent
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// The options cannot produce a resolver
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The caller cancelled the lookup
    #[error("Discovery cancelled")]
    Cancelled,

    /// The lookup did not finish within the configured deadline
    #[error("Discovery timed out after {0:?}")]
    Timeout(Duration),

    /// Resolver failure, passed through untouched
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolveError),
}

impl DiscoveryError {
    /// Whether the error is expected behaviour (missing record, bad input, caller cancel),
    /// used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound(_)
            | Self::InvalidFormat(_)
            | Self::InvalidPublicKey(_)
            | Self::InvalidDomain(_)
            | Self::Cancelled => true,
            Self::InvalidOptions(_) | Self::Timeout(_) | Self::Resolver(_) => false,
        }
    }
}

/// Discovery Result type alias
pub type DiscoveryResult<T> = std::result::Result<T, DiscoveryError>;
