//! Public types returned by discovery operations.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, DiscoveryResult};

/// Raw length of an ed25519 public key, the only algorithm in use.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Outcome of a successful Mailio DNS discovery.
///
/// Only ever handed out complete; a failed lookup yields a [`DiscoveryError`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRecord {
    /// Queried domain (normalised to ASCII).
    pub domain: String,
    /// `true` once a `MAILIO1` record has been parsed.
    pub is_mailio: bool,
    /// Key algorithm token from the `k=` field, e.g. `ed25519`.
    pub public_key_type: String,
    /// Base64 (standard, padded) public key from the `p=` field.
    pub public_key: String,
    /// IPv4 addresses of the domain, in resolver order.
    pub ips: Vec<String>,
}

impl DiscoveryRecord {
    /// Whether the advertised key type is ed25519.
    pub fn is_ed25519(&self) -> bool {
        self.public_key_type.eq_ignore_ascii_case("ed25519")
    }

    /// Decode the advertised key into its raw bytes.
    pub fn public_key_bytes(&self) -> DiscoveryResult<[u8; PUBLIC_KEY_LEN]> {
        let bytes = STANDARD
            .decode(&self.public_key)
            .map_err(|e| DiscoveryError::InvalidFormat(format!("public key is not base64: {e}")))?;
        let len = bytes.len();
        <[u8; PUBLIC_KEY_LEN]>::try_from(bytes).map_err(|_| {
            DiscoveryError::InvalidPublicKey(format!(
                "expected {PUBLIC_KEY_LEN} bytes, got {len}"
            ))
        })
    }
}
