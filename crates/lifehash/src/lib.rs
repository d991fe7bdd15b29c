//! LifeHash: deterministic visual hashes.
//!
//! Input bytes are hashed to a 256-bit digest, which seeds a Conway's Game
//! of Life simulation on a small torus. How recently each cell was alive
//! becomes a grayscale field; bits of the digest then pick a color gradient
//! and a symmetry pattern, and the colored field is tiled into a square
//! bitmap. Identical inputs always produce identical pixels.
//!
//! Five [`Version`]s exist; each is a fixed, stable variant of the algorithm.
//!
//! # Example
//!
//! ```
//! use lifehash::{LifeHashConfig, Version};
//!
//! let image = lifehash::generate_from_text("Hello", Version::Version2, 1, false).unwrap();
//! assert_eq!((image.width(), image.height()), (32, 32));
//! assert_eq!(image.pixel(0, 0), Some(&[146, 126, 130][..]));
//!
//! let config = LifeHashConfig::new(Version::Detailed).with_module_size(2).with_alpha(true);
//! let image = config.generate(b"Hello").unwrap();
//! assert_eq!(image.width(), 128);
//! assert_eq!(image.components(), 4);
//! ```

pub mod age;
mod config;
mod error;
pub mod gradients;
pub mod hash;
pub mod pattern;
mod raster;
pub mod render;
pub mod seed;
mod version;

pub use config::LifeHashConfig;
pub use error::LifeHashError;
pub use hash::{DigestHasher, Sha256, sha256};
pub use pattern::Pattern;
pub use raster::Image;
pub use version::Version;

pub use lifehash_automata as automata;
pub use lifehash_color as color;

/// Hashes `data` with SHA-256 and generates its LifeHash image.
pub fn generate(
    data: &[u8],
    version: Version,
    module_size: u32,
    has_alpha: bool,
) -> Result<Image, LifeHashError> {
    config(version, module_size, has_alpha).generate(data)
}

/// Generates the LifeHash image for the UTF-8 bytes of `text`.
pub fn generate_from_text(
    text: &str,
    version: Version,
    module_size: u32,
    has_alpha: bool,
) -> Result<Image, LifeHashError> {
    config(version, module_size, has_alpha).generate_from_text(text)
}

/// Generates the LifeHash image for a precomputed 32-byte digest.
///
/// Any other length fails with [`LifeHashError::InvalidDigestLength`].
pub fn generate_from_digest(
    digest: &[u8],
    version: Version,
    module_size: u32,
    has_alpha: bool,
) -> Result<Image, LifeHashError> {
    config(version, module_size, has_alpha).generate_from_digest(digest)
}

/// Like [`generate`], hashing with `hasher` instead of SHA-256.
pub fn generate_with<H: DigestHasher + ?Sized>(
    hasher: &H,
    data: &[u8],
    version: Version,
    module_size: u32,
    has_alpha: bool,
) -> Result<Image, LifeHashError> {
    config(version, module_size, has_alpha).generate_with(hasher, data)
}

/// Like [`generate_from_digest`], hashing with `hasher` instead of SHA-256.
pub fn generate_from_digest_with<H: DigestHasher + ?Sized>(
    hasher: &H,
    digest: &[u8],
    version: Version,
    module_size: u32,
    has_alpha: bool,
) -> Result<Image, LifeHashError> {
    config(version, module_size, has_alpha).generate_from_digest_with(hasher, digest)
}

fn config(version: Version, module_size: u32, has_alpha: bool) -> LifeHashConfig {
    LifeHashConfig::new(version)
        .with_module_size(module_size)
        .with_alpha(has_alpha)
}

// ============================================================================
// Invariant tests - properties that must hold for arbitrary inputs
// ============================================================================
