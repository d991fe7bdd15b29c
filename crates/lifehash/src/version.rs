//! LifeHash versions and their fixed parameters.

use lifehash_automata::Size;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// LifeHash algorithm version.
///
/// The variant set and each variant's parameters are fixed: changing any of
/// them changes the images existing users compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Version {
    /// Deprecated. HSB gamut, not CMYK-friendly, no age normalization.
    Version1,
    /// CMYK-friendly gamut. Recommended for most purposes.
    #[default]
    Version2,
    /// Double resolution, CMYK-friendly gamut.
    Detailed,
    /// High-contrast, no symmetry, for machine vision. CMYK-friendly gamut.
    Fiducial,
    /// High-contrast, no symmetry, monochrome.
    GrayscaleFiducial,
}

impl Version {
    /// Every version, in declaration order.
    pub const ALL: [Version; 5] = [
        Version::Version1,
        Version::Version2,
        Version::Detailed,
        Version::Fiducial,
        Version::GrayscaleFiducial,
    ];

    /// Side length of the simulation grid.
    pub fn grid_length(self) -> usize {
        match self {
            Version::Version1 | Version::Version2 => 16,
            Version::Detailed | Version::Fiducial | Version::GrayscaleFiducial => 32,
        }
    }

    /// Size of the simulation grid.
    pub fn grid_size(self) -> Size {
        Size::square(self.grid_length())
    }

    /// Upper bound on recorded generations.
    pub fn max_generations(self) -> usize {
        match self {
            Version::Version1 | Version::Version2 => 150,
            Version::Detailed | Version::Fiducial | Version::GrayscaleFiducial => 300,
        }
    }

    /// Leading digest bits discarded before colors and patterns are drawn,
    /// so versions never pick identical colors from identical digests.
    pub fn skipped_entropy_bits(self) -> u32 {
        match self {
            Version::Detailed => 1,
            Version::Version2 => 2,
            Version::Version1 | Version::Fiducial | Version::GrayscaleFiducial => 0,
        }
    }

    /// True for the fiducial family (no symmetry, high contrast).
    pub fn is_fiducial(self) -> bool {
        matches!(self, Version::Fiducial | Version::GrayscaleFiducial)
    }

    /// Whether the age field is rescaled to span [0, 1].
    ///
    /// Version 1 shipped without this step and keeps that output.
    pub fn normalizes_age(self) -> bool {
        self != Version::Version1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_version2() {
        assert_eq!(Version::default(), Version::Version2);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(Version::Version1.grid_size(), Size::square(16));
        assert_eq!(Version::Version2.max_generations(), 150);
        assert_eq!(Version::Detailed.grid_length(), 32);
        assert_eq!(Version::Fiducial.max_generations(), 300);
        assert_eq!(Version::GrayscaleFiducial.grid_size(), Size::square(32));
    }

    #[test]
    fn test_seed_fits_grid() {
        // Compact versions seed from one digest, the rest from four.
        for version in Version::ALL {
            let seed_bytes = if version.grid_length() == 16 { 32 } else { 128 };
            assert_eq!(version.grid_size().capacity(), seed_bytes * 8);
        }
    }

    #[test]
    fn test_skipped_bits_distinct_for_colored_versions() {
        assert_eq!(Version::Version1.skipped_entropy_bits(), 0);
        assert_eq!(Version::Detailed.skipped_entropy_bits(), 1);
        assert_eq!(Version::Version2.skipped_entropy_bits(), 2);
        assert_eq!(Version::GrayscaleFiducial.skipped_entropy_bits(), 0);
    }

    #[test]
    fn test_flags() {
        assert!(!Version::Version1.normalizes_age());
        assert!(Version::Version2.normalizes_age());
        assert!(Version::Fiducial.is_fiducial());
        assert!(Version::GrayscaleFiducial.is_fiducial());
        assert!(!Version::Detailed.is_fiducial());
    }
}
