//! Gradient selection from digest entropy.
//!
//! Every family draws its parameters from the [`BitEnumerator`] in a fixed
//! order. Reordering any draw changes every image, so the sequence of
//! `next_*` calls in each function is part of the output format.

use lifehash_automata::{BitEnumerator, Underflow};
use lifehash_color::{Color, ColorFunc, modulo, presets};
use tracing::debug;

use crate::Version;

/// The four color-harmony families a colored version picks between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientFamily {
    /// One hue blended toward a neutral.
    Monochromatic,
    /// Two opposite hues.
    Complementary,
    /// Three hues a third of the wheel apart.
    Triadic,
    /// Neighboring hues.
    Analogous,
}

impl GradientFamily {
    /// Maps a two-bit draw to a family.
    pub fn from_uint2(value: u8) -> Self {
        match value & 0b11 {
            0 => GradientFamily::Monochromatic,
            1 => GradientFamily::Complementary,
            2 => GradientFamily::Triadic,
            _ => GradientFamily::Analogous,
        }
    }
}

/// Draws the gradient for `version` from `entropy`.
///
/// The grayscale fiducial version consumes a single bit; every other version
/// draws a [`GradientFamily`] and then that family's parameters.
pub fn select_gradient(
    entropy: &mut BitEnumerator<'_>,
    version: Version,
) -> Result<ColorFunc, Underflow> {
    if version == Version::GrayscaleFiducial {
        let forward = entropy.next_bit()?;
        debug!(?version, forward, "selected grayscale gradient");
        return Ok(presets::grayscale().reversed_if(!forward));
    }

    let family = GradientFamily::from_uint2(entropy.next_uint2()?);
    debug!(?version, ?family, "selected gradient family");

    if version == Version::Fiducial {
        return match family {
            GradientFamily::Monochromatic => monochromatic_fiducial(entropy),
            GradientFamily::Complementary => complementary_fiducial(entropy),
            GradientFamily::Triadic => neutral_inserted_fiducial(entropy, 1.0 / 3.0),
            GradientFamily::Analogous => neutral_inserted_fiducial(entropy, 1.0 / 10.0),
        };
    }

    let hues = if version == Version::Version1 {
        presets::spectrum()
    } else {
        presets::spectrum_cmyk_safe()
    };
    match family {
        GradientFamily::Monochromatic if version == Version::Version1 => {
            monochromatic(entropy, &presets::hue())
        }
        GradientFamily::Monochromatic => monochromatic(entropy, &hues),
        GradientFamily::Complementary => complementary(entropy, &hues),
        GradientFamily::Triadic => triadic(entropy, &hues),
        GradientFamily::Analogous => analogous(entropy, &hues),
    }
}

// ============================================================================
// Colored families
// ============================================================================

/// A key hue blended toward black or white.
pub fn monochromatic(
    entropy: &mut BitEnumerator<'_>,
    hues: &ColorFunc,
) -> Result<ColorFunc, Underflow> {
    let hue = entropy.next_frac()?;
    let is_tint = entropy.next_bit()?;
    let is_reversed = entropy.next_bit()?;
    let key_advance = entropy.next_frac()? * 0.3 + 0.05;
    let neutral_advance = entropy.next_frac()? * 0.3 + 0.05;

    let mut key = hues.apply(hue);
    let contrast_brightness = if is_tint {
        key = key.darken(0.5);
        1.0
    } else {
        0.0
    };
    let neutral = presets::grayscale().apply(contrast_brightness);

    let gradient = ColorFunc::two_color(
        key.lerp_to(neutral, key_advance),
        neutral.lerp_to(key, neutral_advance),
    );
    Ok(gradient.reversed_if(is_reversed))
}

/// Two hues half a turn apart, the darker darkened and the lighter lightened.
pub fn complementary(
    entropy: &mut BitEnumerator<'_>,
    hues: &ColorFunc,
) -> Result<ColorFunc, Underflow> {
    let spectrum1 = entropy.next_frac()?;
    let spectrum2 = modulo(spectrum1 + 0.5, 1.0);
    let lighter_advance = entropy.next_frac()? * 0.3;
    let darker_advance = entropy.next_frac()? * 0.3;
    let is_reversed = entropy.next_bit()?;

    let color1 = hues.apply(spectrum1);
    let color2 = hues.apply(spectrum2);
    let (darker, lighter) = if color1.luminance() > color2.luminance() {
        (color2, color1)
    } else {
        (color1, color2)
    };

    let gradient = ColorFunc::two_color(
        darker.darken(darker_advance),
        lighter.lighten(lighter_advance),
    );
    Ok(gradient.reversed_if(is_reversed))
}

/// Three hues a third of the wheel apart, ordered lightest to darkest.
pub fn triadic(
    entropy: &mut BitEnumerator<'_>,
    hues: &ColorFunc,
) -> Result<ColorFunc, Underflow> {
    let spectrum1 = entropy.next_frac()?;
    let spectrum2 = modulo(spectrum1 + 1.0 / 3.0, 1.0);
    let spectrum3 = modulo(spectrum1 + 2.0 / 3.0, 1.0);
    let lighter_advance = entropy.next_frac()? * 0.3;
    let darker_advance = entropy.next_frac()? * 0.3;
    let is_reversed = entropy.next_bit()?;

    let mut colors = [
        hues.apply(spectrum1),
        hues.apply(spectrum2),
        hues.apply(spectrum3),
    ];
    // Stable, so equal luminances keep hue order.
    colors.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));
    let [darker, middle, lighter] = colors;

    let gradient = ColorFunc::blend(vec![
        lighter.lighten(lighter_advance),
        middle,
        darker.darken(darker_advance),
    ]);
    Ok(gradient.reversed_if(is_reversed))
}

/// Four neighboring hues spread from dark to light.
pub fn analogous(
    entropy: &mut BitEnumerator<'_>,
    hues: &ColorFunc,
) -> Result<ColorFunc, Underflow> {
    let spectrum1 = entropy.next_frac()?;
    let spectrum2 = modulo(spectrum1 + 1.0 / 12.0, 1.0);
    let spectrum3 = modulo(spectrum1 + 2.0 / 12.0, 1.0);
    let spectrum4 = modulo(spectrum1 + 3.0 / 12.0, 1.0);
    let advance = entropy.next_frac()? * 0.5 + 0.2;
    let is_reversed = entropy.next_bit()?;

    let color1 = hues.apply(spectrum1);
    let color2 = hues.apply(spectrum2);
    let color3 = hues.apply(spectrum3);
    let color4 = hues.apply(spectrum4);

    let [darkest, dark, light, lightest] = if color1.luminance() < color4.luminance() {
        [color1, color2, color3, color4]
    } else {
        [color4, color3, color2, color1]
    };

    let gradient = ColorFunc::blend(vec![
        darkest.darken(advance),
        dark.darken(advance / 2.0),
        light.lighten(advance / 2.0),
        lightest.lighten(advance),
    ]);
    Ok(gradient.reversed_if(is_reversed))
}

// ============================================================================
// Fiducial families
// ============================================================================

fn neutral(is_tint: bool) -> Color {
    if is_tint { Color::WHITE } else { Color::BLACK }
}

/// Key color, neutral, key color.
pub fn monochromatic_fiducial(entropy: &mut BitEnumerator<'_>) -> Result<ColorFunc, Underflow> {
    let hue = entropy.next_frac()?;
    let is_reversed = entropy.next_bit()?;
    let is_tint = entropy.next_bit()?;

    let contrast = neutral(is_tint);
    let key = presets::spectrum_cmyk_safe()
        .apply(hue)
        .adjust_for_luminance(contrast);

    let gradient = ColorFunc::blend(vec![key, contrast, key]);
    Ok(gradient.reversed_if(is_reversed))
}

/// Two opposite hues around a neutral tinted toward one of them.
pub fn complementary_fiducial(entropy: &mut BitEnumerator<'_>) -> Result<ColorFunc, Underflow> {
    let spectrum1 = entropy.next_frac()?;
    let spectrum2 = modulo(spectrum1 + 0.5, 1.0);
    let is_tint = entropy.next_bit()?;
    let is_reversed = entropy.next_bit()?;
    let bias_first = entropy.next_bit()?;

    let hues = presets::spectrum_cmyk_safe();
    let color1 = hues.apply(spectrum1);
    let color2 = hues.apply(spectrum2);

    let bias = if bias_first { color1 } else { color2 };
    let biased = neutral(is_tint).lerp_to(bias, 0.2).burn(0.1);

    let gradient = ColorFunc::blend(vec![
        color1.adjust_for_luminance(biased),
        biased,
        color2.adjust_for_luminance(biased),
    ]);
    Ok(gradient.reversed_if(is_reversed))
}

/// Three hues `spacing` apart with black or white inserted at position 1 or 2.
///
/// Shared by the triadic (`1/3`) and analogous (`1/10`) fiducial families.
pub fn neutral_inserted_fiducial(
    entropy: &mut BitEnumerator<'_>,
    spacing: f64,
) -> Result<ColorFunc, Underflow> {
    let spectrum1 = entropy.next_frac()?;
    let spectrum2 = modulo(spectrum1 + spacing, 1.0);
    let spectrum3 = modulo(spectrum1 + 2.0 * spacing, 1.0);
    let is_tint = entropy.next_bit()?;
    let insert_index = usize::from(entropy.next_uint8()? % 2) + 1;
    let is_reversed = entropy.next_bit()?;

    let neutral = neutral(is_tint);
    let hues = presets::spectrum_cmyk_safe();
    let mut colors = vec![
        hues.apply(spectrum1),
        hues.apply(spectrum2),
        hues.apply(spectrum3),
    ];
    if insert_index == 1 {
        colors[0] = colors[0].adjust_for_luminance(neutral);
        colors[1] = colors[1].adjust_for_luminance(neutral);
        colors[2] = colors[2].adjust_for_luminance(colors[1]);
    } else {
        colors[1] = colors[1].adjust_for_luminance(neutral);
        colors[2] = colors[2].adjust_for_luminance(neutral);
        colors[0] = colors[0].adjust_for_luminance(colors[1]);
    }
    colors.insert(insert_index, neutral);

    Ok(ColorFunc::blend(colors).reversed_if(is_reversed))
}
