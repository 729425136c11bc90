//! SHA-256 hex digests.
//!
//! Refresh tokens and password-reset tokens are random secrets handed to the
//! client; only their digest is persisted, so a leaked table cannot be
//! replayed. The session and reset repositories look rows up by this digest.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    format!("{digest:x}")
}
