use sha2::{Digest, Sha256};

/// Content fingerprint of an uploaded image: lowercase hex SHA-256 of the
/// raw bytes. Identical bytes always yield the identical fingerprint, so
/// the digest doubles as the cache key for analysis results. Total over
/// every byte sequence, including the empty one; "no image supplied" is
/// rejected upstream before hashing.
pub fn fingerprint(image_data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image_data);
    hex::encode(hasher.finalize())
}
