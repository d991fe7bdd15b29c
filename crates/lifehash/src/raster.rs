//! Raster output: nearest-neighbor scaling of color grids to 8-bit bitmaps.

use lifehash_color::{Color, clamped};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LifeHashError;
use crate::render::ColorGrid;

/// A row-major 8-bit RGB or RGBA bitmap.
///
/// Pixel `(x, y)` starts at byte `(y * width + x) * components`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Image {
    width: u32,
    height: u32,
    has_alpha: bool,
    pixels: Vec<u8>,
}

/// Byte length of a `width` x `height` bitmap, or `None` if no `Vec` can hold it.
pub(crate) fn byte_len(width: u64, height: u64, has_alpha: bool) -> Option<usize> {
    let components = if has_alpha { 4 } else { 3 };
    width
        .checked_mul(height)?
        .checked_mul(components)
        .filter(|&len| len <= isize::MAX as u64)
        .and_then(|len| usize::try_from(len).ok())
}

/// Converts a [0, 1] channel to a byte, truncating.
fn channel(value: f64) -> u8 {
    (clamped(value) * 255.0) as u8
}

impl Image {
    /// Rasterizes `grid`, drawing each cell as a `module_size` square.
    ///
    /// Fails with [`LifeHashError::InvalidModuleSize`] if `module_size` is zero,
    /// the scaled dimensions overflow `u32`, or the pixel buffer cannot be
    /// allocated.
    pub fn from_color_grid(
        grid: &ColorGrid,
        module_size: u32,
        has_alpha: bool,
    ) -> Result<Self, LifeHashError> {
        let scale = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_mul(module_size))
                .filter(|_| module_size > 0)
                .ok_or(LifeHashError::InvalidModuleSize(module_size))
        };
        let width = scale(grid.width())?;
        let height = scale(grid.height())?;

        let len = byte_len(u64::from(width), u64::from(height), has_alpha)
            .ok_or(LifeHashError::InvalidModuleSize(module_size))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| LifeHashError::InvalidModuleSize(module_size))?;

        let module = module_size as usize;
        for y in 0..height as usize {
            let row = &grid.values()[(y / module) * grid.width()..][..grid.width()];
            for x in 0..width as usize {
                let Color { r, g, b } = row[x / module];
                pixels.extend_from_slice(&[channel(r), channel(g), channel(b)]);
                if has_alpha {
                    pixels.push(u8::MAX);
                }
            }
        }

        Ok(Self {
            width,
            height,
            has_alpha,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether each pixel carries an alpha byte (always 255).
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Bytes per pixel: 3 or 4.
    pub fn components(&self) -> usize {
        if self.has_alpha { 4 } else { 3 }
    }

    /// Raw pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The channels of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let components = self.components();
        let offset = (y as usize * self.width as usize + x as usize) * components;
        self.pixels.get(offset..offset + components)
    }

    /// Consumes the image, returning its pixel bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Converts to an `image` crate bitmap (RGB8 or RGBA8).
    #[cfg(feature = "image")]
    pub fn to_dynamic_image(&self) -> image::DynamicImage {
        let components = self.components();
        let width = self.width as usize;
        let at = move |x: u32, y: u32| (y as usize * width + x as usize) * components;
        if self.has_alpha {
            image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(self.width, self.height, |x, y| {
                let o = at(x, y);
                image::Rgba([self.pixels[o], self.pixels[o + 1], self.pixels[o + 2], self.pixels[o + 3]])
            }))
        } else {
            image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(self.width, self.height, |x, y| {
                let o = at(x, y);
                image::Rgb([self.pixels[o], self.pixels[o + 1], self.pixels[o + 2]])
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifehash_automata::{IVec2, Size};

    fn checker() -> ColorGrid {
        let mut grid = ColorGrid::new(Size::new(2, 1));
        grid.set(IVec2::new(1, 0), Color::new(1.0, 0.5, 2.0));
        grid
    }

    #[test]
    fn test_truncating_channels() {
        assert_eq!(channel(1.0), 255);
        assert_eq!(channel(0.5), 127);
        assert_eq!(channel(-1.0), 0);
        assert_eq!(channel(0.999), 254);
    }

    #[test]
    fn test_module_scaling() {
        let image = Image::from_color_grid(&checker(), 2, false).unwrap();
        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.pixels().len(), 4 * 2 * 3);
        for y in 0..2 {
            assert_eq!(image.pixel(0, y), Some(&[0, 0, 0][..]));
            assert_eq!(image.pixel(1, y), Some(&[0, 0, 0][..]));
            assert_eq!(image.pixel(2, y), Some(&[255, 127, 255][..]));
            assert_eq!(image.pixel(3, y), Some(&[255, 127, 255][..]));
        }
        assert_eq!(image.pixel(4, 0), None);
        assert_eq!(image.pixel(0, 2), None);
    }

    #[test]
    fn test_alpha() {
        let image = Image::from_color_grid(&checker(), 1, true).unwrap();
        assert_eq!(image.components(), 4);
        assert_eq!(image.into_raw(), vec![0, 0, 0, 255, 255, 127, 255, 255]);
    }

    #[test]
    fn test_zero_module_size() {
        assert_eq!(
            Image::from_color_grid(&checker(), 0, false),
            Err(LifeHashError::InvalidModuleSize(0))
        );
    }

    #[test]
    fn test_oversized_module() {
        assert_eq!(
            Image::from_color_grid(&checker(), u32::MAX, false),
            Err(LifeHashError::InvalidModuleSize(u32::MAX))
        );
    }

    #[test]
    fn test_buffer_too_large_for_vec() {
        // 4e9 x 2e9 pixels fits u32 dimensions but not an addressable buffer.
        assert_eq!(
            Image::from_color_grid(&checker(), 2_000_000_000, false),
            Err(LifeHashError::InvalidModuleSize(2_000_000_000))
        );
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(byte_len(32, 32, false), Some(32 * 32 * 3));
        assert_eq!(byte_len(32, 32, true), Some(32 * 32 * 4));
        assert_eq!(byte_len(u64::from(u32::MAX), u64::from(u32::MAX), false), None);
        assert_eq!(byte_len(u64::MAX, 2, true), None);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_to_dynamic_image() {
        let image = Image::from_color_grid(&checker(), 1, true).unwrap();
        let dynamic = image.to_dynamic_image();
        assert_eq!(dynamic.width(), 2);
        assert_eq!(dynamic.as_bytes(), image.pixels());

        let rgb = Image::from_color_grid(&checker(), 3, false).unwrap();
        assert_eq!(rgb.to_dynamic_image().as_bytes(), rgb.pixels());
    }
}
