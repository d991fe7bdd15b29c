//! Generation parameters and the generation pipeline.

use lifehash_automata::{BitEnumerator, LifeSimulation};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hash::{Digest, DigestHasher, Sha256};
use crate::pattern::Pattern;
use crate::raster::{Image, byte_len};
use crate::{LifeHashError, Version, age, gradients, render, seed};

/// Parameters for generating a LifeHash image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LifeHashConfig {
    /// Algorithm version.
    pub version: Version,
    /// Pixels per grid cell along each axis (at least 1).
    pub module_size: u32,
    /// Emit RGBA instead of RGB.
    pub has_alpha: bool,
}

impl Default for LifeHashConfig {
    fn default() -> Self {
        Self {
            version: Version::Version2,
            module_size: 1,
            has_alpha: false,
        }
    }
}

impl LifeHashConfig {
    /// Creates a config for `version` with module size 1 and no alpha.
    pub fn new(version: Version) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Sets the module size.
    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size;
        self
    }

    /// Sets whether the output carries an alpha channel.
    pub fn with_alpha(mut self, has_alpha: bool) -> Self {
        self.has_alpha = has_alpha;
        self
    }

    /// Side length of the output image in pixels.
    pub fn image_length(&self) -> u64 {
        let cells = if self.version.is_fiducial() {
            self.version.grid_length()
        } else {
            self.version.grid_length() * 2
        };
        cells as u64 * u64::from(self.module_size)
    }

    /// Hashes `data` with SHA-256 and generates its image.
    pub fn generate(&self, data: &[u8]) -> Result<Image, LifeHashError> {
        self.generate_with(&Sha256, data)
    }

    /// Generates the image for the UTF-8 bytes of `text`.
    pub fn generate_from_text(&self, text: &str) -> Result<Image, LifeHashError> {
        self.generate(text.as_bytes())
    }

    /// Generates the image for a precomputed 32-byte digest.
    pub fn generate_from_digest(&self, digest: &[u8]) -> Result<Image, LifeHashError> {
        self.generate_from_digest_with(&Sha256, digest)
    }

    /// Hashes `data` with `hasher` and generates its image.
    pub fn generate_with<H: DigestHasher + ?Sized>(
        &self,
        hasher: &H,
        data: &[u8],
    ) -> Result<Image, LifeHashError> {
        self.generate_from_digest_with(hasher, &hasher.hash(data))
    }

    /// Generates the image for `digest`, using `hasher` for the seed chain and
    /// for cycle detection.
    ///
    /// Arguments are validated before any simulation work.
    pub fn generate_from_digest_with<H: DigestHasher + ?Sized>(
        &self,
        hasher: &H,
        digest: &[u8],
    ) -> Result<Image, LifeHashError> {
        let digest: &Digest = digest
            .try_into()
            .map_err(|_| LifeHashError::InvalidDigestLength { len: digest.len() })?;
        let length = self.image_length();
        if self.module_size == 0
            || length > u64::from(u32::MAX)
            || byte_len(length, length, self.has_alpha).is_none()
        {
            return Err(LifeHashError::InvalidModuleSize(self.module_size));
        }

        let version = self.version;
        let seed = seed::seed_bytes(version, digest, hasher);
        debug!(?version, seed_bytes = seed.len(), "seeding simulation");

        let history = LifeSimulation::new(version.grid_size(), &seed)
            .run(version.max_generations(), |snapshot| hasher.hash(snapshot));
        debug!(
            generations = history.len(),
            cycle = history.ended_in_cycle(),
            "simulation finished"
        );

        let frac = age::age_field(&history, version.normalizes_age());

        let mut entropy = BitEnumerator::new(digest);
        for _ in 0..version.skipped_entropy_bits() {
            entropy.next_bit()?;
        }
        let gradient = gradients::select_gradient(&mut entropy, version)?;
        let pattern = Pattern::select(&mut entropy, version)?;
        debug!(?pattern, "selected pattern");

        let colors = render::color_grid(&frac, &gradient, pattern);
        let image = Image::from_color_grid(&colors, self.module_size, self.has_alpha)?;
        debug!(
            width = image.width(),
            height = image.height(),
            has_alpha = image.has_alpha(),
            "rasterized"
        );
        Ok(image)
    }
}
