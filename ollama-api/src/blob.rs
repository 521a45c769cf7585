//! Content digests for blob uploads.

use sha2::{Digest, Sha256};

/// Computes the server's digest form for a blob: `sha256:` followed by 64
/// lowercase hex characters over the full content.
pub fn blob_digest(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("sha256:{:x}", hash)
}
