//! Symmetry patterns that tile the age field into the final color grid.

use lifehash_automata::{BitEnumerator, IVec2, Size, Underflow};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Version;

/// How the age field is replicated into the color grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// Mirrored around the central axes.
    Snowflake,
    /// Rotated around the center.
    Pinwheel,
    /// Drawn once, no symmetry.
    Fiducial,
}

/// A point transform: optional transpose, then optional reflections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Swap x and y first.
    pub transpose: bool,
    /// Mirror horizontally.
    pub reflect_x: bool,
    /// Mirror vertically.
    pub reflect_y: bool,
}

impl Transform {
    const fn new(transpose: bool, reflect_x: bool, reflect_y: bool) -> Self {
        Self {
            transpose,
            reflect_x,
            reflect_y,
        }
    }

    /// Leaves points where they are.
    pub const IDENTITY: Self = Self::new(false, false, false);

    /// Maps `point` into a grid whose largest coordinate is `max`.
    pub fn apply(self, point: IVec2, max: IVec2) -> IVec2 {
        let mut p = if self.transpose {
            IVec2::new(point.y, point.x)
        } else {
            point
        };
        if self.reflect_x {
            p.x = max.x - p.x;
        }
        if self.reflect_y {
            p.y = max.y - p.y;
        }
        p
    }
}

const SNOWFLAKE: [Transform; 4] = [
    Transform::IDENTITY,
    Transform::new(false, true, false),
    Transform::new(false, false, true),
    Transform::new(false, true, true),
];

const PINWHEEL: [Transform; 4] = [
    Transform::IDENTITY,
    Transform::new(true, true, false),
    Transform::new(true, false, true),
    Transform::new(false, true, true),
];

const FIDUCIAL: [Transform; 1] = [Transform::IDENTITY];

impl Pattern {
    /// Draws the pattern for `version`.
    ///
    /// Fiducial versions always get [`Pattern::Fiducial`] and consume no
    /// bits. Otherwise one bit picks snowflake (1) or pinwheel (0).
    pub fn select(entropy: &mut BitEnumerator<'_>, version: Version) -> Result<Self, Underflow> {
        if version.is_fiducial() {
            return Ok(Pattern::Fiducial);
        }
        Ok(if entropy.next_bit()? {
            Pattern::Snowflake
        } else {
            Pattern::Pinwheel
        })
    }

    /// Transforms that place each source cell, in drawing order.
    pub fn transforms(self) -> &'static [Transform] {
        match self {
            Pattern::Snowflake => &SNOWFLAKE,
            Pattern::Pinwheel => &PINWHEEL,
            Pattern::Fiducial => &FIDUCIAL,
        }
    }

    /// Color grid size for an age field of `size`.
    pub fn target_size(self, size: Size) -> Size {
        match self {
            Pattern::Fiducial => size,
            Pattern::Snowflake | Pattern::Pinwheel => size.scaled(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let data = [0b1000_0000];
        assert_eq!(
            Pattern::select(&mut BitEnumerator::new(&data), Version::Version2),
            Ok(Pattern::Snowflake)
        );
        let data = [0b0000_0000];
        assert_eq!(
            Pattern::select(&mut BitEnumerator::new(&data), Version::Detailed),
            Ok(Pattern::Pinwheel)
        );
    }

    #[test]
    fn test_fiducial_consumes_nothing() {
        let data = [0b1000_0000];
        let mut entropy = BitEnumerator::new(&data);
        assert_eq!(
            Pattern::select(&mut entropy, Version::GrayscaleFiducial),
            Ok(Pattern::Fiducial)
        );
        assert_eq!(entropy.next_bit(), Ok(true));
    }

    #[test]
    fn test_target_size() {
        assert_eq!(Pattern::Snowflake.target_size(Size::square(16)), Size::square(32));
        assert_eq!(Pattern::Pinwheel.target_size(Size::square(32)), Size::square(64));
        assert_eq!(Pattern::Fiducial.target_size(Size::square(32)), Size::square(32));
    }

    #[test]
    fn test_transform_apply() {
        let max = IVec2::new(31, 31);
        let p = IVec2::new(3, 5);
        assert_eq!(Transform::IDENTITY.apply(p, max), p);
        assert_eq!(SNOWFLAKE[1].apply(p, max), IVec2::new(28, 5));
        assert_eq!(SNOWFLAKE[2].apply(p, max), IVec2::new(3, 26));
        assert_eq!(SNOWFLAKE[3].apply(p, max), IVec2::new(28, 26));
        assert_eq!(PINWHEEL[1].apply(p, max), IVec2::new(26, 3));
        assert_eq!(PINWHEEL[2].apply(p, max), IVec2::new(5, 28));
    }

    #[test]
    fn test_quadrants_disjoint() {
        // Each transform of a 2x2 source lands in its own quadrant of 4x4.
        for pattern in [Pattern::Snowflake, Pattern::Pinwheel] {
            let mut seen = std::collections::HashSet::new();
            for t in pattern.transforms() {
                for y in 0..2 {
                    for x in 0..2 {
                        assert!(seen.insert(t.apply(IVec2::new(x, y), IVec2::new(3, 3))));
                    }
                }
            }
            assert_eq!(seen.len(), 16);
        }
    }
}
