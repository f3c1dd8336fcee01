use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Errors returned when wrapping a raw pixel buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("unsupported channel count {channels} (expected 3 or 4)")]
    UnsupportedChannels { channels: usize },

    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
}

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in RGB space.
    #[inline]
    pub fn distance(&self, other: &Color) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    #[inline]
    pub fn gray(&self) -> u8 {
        gray_from_rgb(self.r, self.g, self.b)
    }
}

/// Luma with BT.601 weights, rounded to the nearest level.
#[inline]
pub fn gray_from_rgb(r: u8, g: u8, b: u8) -> u8 {
    let v = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    v.round().clamp(0.0, 255.0) as u8
}

/// Borrowed, immutable RGB(A) raster.
///
/// Pixels are row-major with `channels` interleaved bytes each; the alpha
/// byte of RGBA buffers is ignored.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    width: usize,
    height: usize,
    channels: usize,
    data: &'a [u8],
}

impl<'a> RgbImageView<'a> {
    /// Wrap a raw buffer, validating its shape.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(ImageError::UnsupportedChannels { channels });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Color at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let i = (y * self.width + x) * self.channels;
        Color::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Color at signed coordinates, `None` outside the raster.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        if self.contains(x, y) {
            Some(self.pixel(x as usize, y as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn gray(&self, x: usize, y: usize) -> u8 {
        self.pixel(x, y).gray()
    }

    /// Copy `rect` (clamped to the raster) into a new RGB image.
    pub fn crop(&self, rect: Rect) -> RgbImage {
        let r = rect.clamp_to(self.width, self.height);
        let (w, h) = (r.w as usize, r.h as usize);
        let mut data = Vec::with_capacity(w * h * 3);
        for y in r.y as usize..r.y as usize + h {
            for x in r.x as usize..r.x as usize + w {
                let c = self.pixel(x, y);
                data.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        RgbImage {
            width: w,
            height: h,
            data,
        }
    }
}

/// Owned RGB raster (3 bytes per pixel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Image filled with a single color.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Set a pixel; writes outside the raster are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 3;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
    }

    pub fn view(&self) -> Result<RgbImageView<'_>, ImageError> {
        RgbImageView::new(self.width, self.height, 3, &self.data)
    }
}
