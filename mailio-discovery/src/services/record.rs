//! `MAILIO1` TXT record parsing and public key validation.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::types::{DiscoveryRecord, PUBLIC_KEY_LEN};

/// Version marker a discovery TXT record must contain.
pub const MAILIO_V1_MARKER: &str = "v=MAILIO1";

const KEY_TYPE_TAG: &str = "k=";
const PUBLIC_KEY_TAG: &str = "p=";

/// Parse a `MAILIO1` record: `v=MAILIO1;k=<type>;p=<base64>[;...]`.
///
/// Fields are trimmed before their tag is checked; anything past the third field is ignored.
/// `domain` and `ips` are left empty for the caller to fill in.
pub fn parse_txt_v1(txt: &str) -> DiscoveryResult<DiscoveryRecord> {
    let fields: Vec<&str> = txt.split(';').collect();
    if fields.len() < 3 {
        return Err(DiscoveryError::InvalidFormat(format!(
            "expected at least 3 fields, got {}",
            fields.len()
        )));
    }

    let key_type = fields[1].trim();
    let public_key = fields[2].trim();

    if !key_type.starts_with(KEY_TYPE_TAG) {
        return Err(DiscoveryError::InvalidFormat(format!(
            "second field must start with `{KEY_TYPE_TAG}`: {key_type}"
        )));
    }
    if !public_key.starts_with(PUBLIC_KEY_TAG) {
        return Err(DiscoveryError::InvalidFormat(format!(
            "third field must start with `{PUBLIC_KEY_TAG}`: {public_key}"
        )));
    }

    Ok(DiscoveryRecord {
        is_mailio: true,
        public_key_type: key_type.replacen(KEY_TYPE_TAG, "", 1),
        public_key: public_key.replacen(PUBLIC_KEY_TAG, "", 1),
        ..DiscoveryRecord::default()
    })
}

/// Length-only check of a base64 public key. Does not check the key is a curve point.
pub fn validate_public_key(public_key: &str) -> DiscoveryResult<()> {
    let bytes = STANDARD
        .decode(public_key)
        .map_err(|e| DiscoveryError::InvalidFormat(format!("public key is not base64: {e}")))?;
    if bytes.len() != PUBLIC_KEY_LEN {
        return Err(DiscoveryError::InvalidPublicKey(format!(
            "expected {PUBLIC_KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}
