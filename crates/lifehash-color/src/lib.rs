//! Color types and gradients for LifeHash.
//!
//! Colors are double-precision RGB in [0, 1]. Every operation here is part of
//! the LifeHash output contract, so the arithmetic is written out exactly
//! rather than delegated to a general color library.
//!
//! # Example
//!
//! ```
//! use lifehash_color::{Color, ColorFunc};
//!
//! let gradient = ColorFunc::blend(vec![Color::BLACK, Color::WHITE]);
//! assert_eq!(gradient.apply(0.0), Color::BLACK);
//! assert_eq!(gradient.reversed().apply(0.0), Color::WHITE);
//! ```

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Scalar helpers
// ============================================================================

/// Clamps `n` to [0, 1].
pub fn clamped(n: f64) -> f64 {
    n.min(1.0).max(0.0)
}

/// Maps `t` in [0, 1] onto the range `to_a..to_b`.
pub fn lerp_to(to_a: f64, to_b: f64, t: f64) -> f64 {
    t * (to_b - to_a) + to_a
}

/// Maps `t` in the range `from_a..from_b` onto [0, 1].
pub fn lerp_from(from_a: f64, from_b: f64, t: f64) -> f64 {
    (from_a - t) / (from_a - from_b)
}

/// Maps `t` from the range `from_a..from_b` onto `to_c..to_d`.
pub fn lerp(from_a: f64, from_b: f64, to_c: f64, to_d: f64, t: f64) -> f64 {
    lerp_to(to_c, to_d, lerp_from(from_a, from_b, t))
}

/// Truncated remainder (sign follows the dividend).
pub fn modulo(dividend: f64, divisor: f64) -> f64 {
    dividend % divisor
}

// ============================================================================
// RGB
// ============================================================================

/// RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red channel (0-1).
    pub r: f64,
    /// Green channel (0-1).
    pub g: f64,
    /// Blue channel (0-1).
    pub b: f64,
}

impl Color {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White (1, 1, 1).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Red (1, 0, 0).
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Green (0, 1, 0).
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Blue (0, 0, 1).
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new RGB color.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates from 8-bit channels.
    ///
    /// The division happens in single precision; gradient anchors have
    /// always been built this way and the rounding shows up in the output.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        let channel = |v: u8| (f32::from(v) / 255.0) as f64;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Creates from a DVec3.
    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Converts to DVec3.
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.r, self.g, self.b)
    }

    /// Interpolates toward `other`, with `t` and the result clamped to [0, 1].
    pub fn lerp_to(self, other: Self, t: f64) -> Self {
        let f = clamped(t);
        let v = self.to_dvec3() * (1.0 - f) + other.to_dvec3() * f;
        Self::new(clamped(v.x), clamped(v.y), clamped(v.z))
    }

    /// Moves toward white by `t`.
    pub fn lighten(self, t: f64) -> Self {
        self.lerp_to(Self::WHITE, t)
    }

    /// Moves toward black by `t`.
    pub fn darken(self, t: f64) -> Self {
        self.lerp_to(Self::BLACK, t)
    }

    /// Color-burn by `t`, deepening saturated channels.
    pub fn burn(self, t: f64) -> Self {
        let f = (1.0 - t).max(f64::from(1.0e-7_f32));
        let channel = |c: f64| (1.0 - (1.0 - c) / f).min(1.0);
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Perceived brightness.
    pub fn luminance(self) -> f64 {
        ((0.299 * self.r).powi(2) + (0.587 * self.g).powi(2) + (0.114 * self.b).powi(2)).sqrt()
    }

    /// Nudges this color away from `contrast` when their luminances are
    /// closer than 0.6, so the two stay distinguishable.
    pub fn adjust_for_luminance(self, contrast: Self) -> Self {
        const THRESHOLD: f64 = 0.6;
        const BOOST: f64 = 0.7;

        let lum = self.luminance();
        let contrast_lum = contrast.luminance();
        let offset = (lum - contrast_lum).abs();
        if offset > THRESHOLD {
            return self;
        }

        let t = lerp(0.0, THRESHOLD, BOOST, 0.0, offset);
        if contrast_lum > lum {
            self.darken(t).burn(t * 0.6)
        } else {
            self.lighten(t).burn(t * 0.6)
        }
    }
}

impl From<DVec3> for Color {
    fn from(v: DVec3) -> Self {
        Self::from_dvec3(v)
    }
}

impl From<Color> for DVec3 {
    fn from(c: Color) -> Self {
        c.to_dvec3()
    }
}

// ============================================================================
// HSB
// ============================================================================

/// HSB (Hue, Saturation, Brightness) color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsb {
    /// Hue (0-1, wraps around).
    pub hue: f64,
    /// Saturation (0-1).
    pub saturation: f64,
    /// Brightness (0-1).
    pub brightness: f64,
}

impl Hsb {
    /// Creates a new HSB color.
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Fully saturated, full brightness color of the given hue.
    pub const fn from_hue(hue: f64) -> Self {
        Self::new(hue, 1.0, 1.0)
    }

    /// Converts from RGB.
    pub fn from_color(color: Color) -> Self {
        let Color { r, g, b } = color;
        let max = r.max(g.max(b));
        let min = r.min(g.min(b));
        let d = max - min;

        let saturation = if max == 0.0 { 0.0 } else { d / max };

        let hue = if max == min {
            0.0
        } else if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };

        Self::new(hue, saturation, max)
    }

    /// Converts to RGB.
    pub fn to_color(self) -> Color {
        let v = clamped(self.brightness);
        let s = clamped(self.saturation);

        if s <= 0.0 {
            return Color::new(v, v, v);
        }

        let mut h = modulo(self.hue, 1.0);
        if h < 0.0 {
            h += 1.0;
        }
        h *= 6.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match i as u8 {
            0 => Color::new(v, t, p),
            1 => Color::new(q, v, p),
            2 => Color::new(p, v, t),
            3 => Color::new(p, q, v),
            4 => Color::new(t, p, v),
            _ => Color::new(v, p, q),
        }
    }
}

impl From<Color> for Hsb {
    fn from(color: Color) -> Self {
        Self::from_color(color)
    }
}

impl From<Hsb> for Color {
    fn from(hsb: Hsb) -> Self {
        hsb.to_color()
    }
}

// ============================================================================
// Gradient functions
// ============================================================================

/// A function from [0, 1] to a color.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorFunc {
    /// Piecewise-linear blend through evenly spaced anchor colors.
    Blend(Vec<Color>),
    /// Fully saturated HSB hue wheel.
    Hue,
    /// Another function sampled at `1 - value`.
    Reverse(Box<ColorFunc>),
}

impl ColorFunc {
    /// Blends evenly through `colors`.
    pub fn blend(colors: impl Into<Vec<Color>>) -> Self {
        Self::Blend(colors.into())
    }

    /// Two-color blend.
    pub fn two_color(start: Color, end: Color) -> Self {
        Self::Blend(vec![start, end])
    }

    /// Wraps this function so it runs backwards.
    pub fn reversed(self) -> Self {
        Self::Reverse(Box::new(self))
    }

    /// Reverses only if `reverse` is set.
    pub fn reversed_if(self, reverse: bool) -> Self {
        if reverse { self.reversed() } else { self }
    }

    /// Samples the function.
    pub fn apply(&self, value: f64) -> Color {
        match self {
            Self::Blend(colors) => blend_colors(colors, value),
            Self::Hue => Hsb::from_hue(value).to_color(),
            Self::Reverse(inner) => inner.apply(1.0 - value),
        }
    }
}

fn blend_colors(colors: &[Color], value: f64) -> Color {
    match colors {
        [] => Color::BLACK,
        [only] => *only,
        [start, end] => start.lerp_to(*end, value),
        [first, .., last] => {
            if value >= 1.0 {
                *last
            } else if value <= 0.0 {
                *first
            } else {
                let segments = colors.len() - 1;
                let s = value * segments as f64;
                let segment = s as usize;
                let segment_frac = modulo(s, 1.0);
                colors[segment].lerp_to(colors[segment + 1], segment_frac)
            }
        }
    }
}

/// Fixed gradients.
pub mod presets {
    use super::*;

    /// Anchors of the classic spectrum wheel.
    pub const SPECTRUM: [[u8; 3]; 7] = [
        [0, 168, 222],
        [51, 51, 145],
        [233, 19, 136],
        [235, 45, 46],
        [253, 233, 43],
        [0, 158, 84],
        [0, 168, 222],
    ];

    /// Anchors of the spectrum wheel restricted to a CMYK-printable gamut.
    pub const SPECTRUM_CMYK_SAFE: [[u8; 3]; 7] = [
        [0, 168, 222],
        [41, 60, 130],
        [210, 59, 130],
        [217, 63, 53],
        [244, 228, 81],
        [0, 158, 84],
        [0, 168, 222],
    ];

    fn from_table(table: &[[u8; 3]]) -> ColorFunc {
        ColorFunc::blend(
            table
                .iter()
                .map(|&[r, g, b]| Color::from_u8(r, g, b))
                .collect::<Vec<_>>(),
        )
    }

    /// Black to white.
    pub fn grayscale() -> ColorFunc {
        ColorFunc::two_color(Color::BLACK, Color::WHITE)
    }

    /// HSB hue wheel.
    pub fn hue() -> ColorFunc {
        ColorFunc::Hue
    }

    /// Spectrum wheel.
    pub fn spectrum() -> ColorFunc {
        from_table(&SPECTRUM)
    }

    /// CMYK-safe spectrum wheel.
    pub fn spectrum_cmyk_safe() -> ColorFunc {
        from_table(&SPECTRUM_CMYK_SAFE)
    }
}
