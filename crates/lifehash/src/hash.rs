//! The 32-byte hash collaborator.
//!
//! LifeHash needs SHA-256 for the input digest, the seed chain, and snapshot
//! fingerprints. Any [`DigestHasher`] producing 32 bytes can stand in for it.

use sha2::Digest as _;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A 32-byte digest.
pub type Digest = [u8; DIGEST_LEN];

/// Hashes arbitrary bytes to a 32-byte digest.
pub trait DigestHasher {
    /// Hashes `data`.
    fn hash(&self, data: &[u8]) -> Digest;
}

impl<F: Fn(&[u8]) -> Digest> DigestHasher for F {
    fn hash(&self, data: &[u8]) -> Digest {
        self(data)
    }
}

/// SHA-256, the standard collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl DigestHasher for Sha256 {
    fn hash(&self, data: &[u8]) -> Digest {
        sha256(data)
    }
}

/// Computes the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> Digest {
    let result = sha2::Sha256::digest(data);
    let mut bytes = [0u8; DIGEST_LEN];
    bytes.copy_from_slice(&result);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(digest: &[u8]) -> String {
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            to_hex(&sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            to_hex(&sha256(b"Hello")),
            "185f8db32271fe25f561a6fc938b2e264306ec304eda518007d1764826381969"
        );
    }

    #[test]
    fn test_closure_is_hasher() {
        let zero = |_: &[u8]| [0u8; DIGEST_LEN];
        assert_eq!(zero.hash(b"anything"), [0u8; DIGEST_LEN]);
        assert_eq!(Sha256.hash(b"Hello"), sha256(b"Hello"));
    }
}
