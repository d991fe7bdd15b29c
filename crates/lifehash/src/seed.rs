//! Initial simulation state per version.

use crate::hash::{Digest, DigestHasher};
use crate::Version;

/// Builds the seed bytes for `version` from a 32-byte digest.
///
/// - Version 1 seeds the 16x16 grid with the digest itself.
/// - Version 2 seeds it with the digest hashed once more.
/// - The 32x32 versions chain four digests `d1..d4`, each the hash of the
///   previous one. `d1` is the digest itself, except for the grayscale
///   fiducial version, which hashes first so its images differ from
///   [`Version::Fiducial`].
///
/// The result always covers the grid exactly: one bit per cell.
pub fn seed_bytes<H: DigestHasher + ?Sized>(version: Version, digest: &Digest, hasher: &H) -> Vec<u8> {
    match version {
        Version::Version1 => digest.to_vec(),
        Version::Version2 => hasher.hash(digest).to_vec(),
        Version::Detailed | Version::Fiducial | Version::GrayscaleFiducial => {
            let first = if version == Version::GrayscaleFiducial {
                hasher.hash(digest)
            } else {
                *digest
            };
            let mut seed = Vec::with_capacity(first.len() * 4);
            let mut current = first;
            seed.extend_from_slice(&current);
            for _ in 1..4 {
                current = hasher.hash(&current);
                seed.extend_from_slice(&current);
            }
            seed
        }
    }
}
