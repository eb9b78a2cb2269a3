//! Pixel buffers
//!
//! - [`PixelView`] is a borrowed, read-only view over caller-owned RGB or
//!   RGBA bytes. Line scans only ever read through a view.
//! - [`RgbaImage`] is an owned 8-bit RGBA image, the form decoded images
//!   take and the form crops are produced in.
//!
//! # Pixel layout
//!
//! Row-major, tightly packed, `channels` bytes per pixel with red first.
//! A fourth channel, when present, is alpha and is ignored by matching.

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// Borrowed, read-only view of a row-major RGB/RGBA buffer.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    channels: usize,
}

impl<'a> PixelView<'a> {
    /// Create a view over `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `width` or `height` is 0
    /// - `channels` is not 3 or 4
    /// - `data` holds fewer than `width * height * channels` bytes
    pub fn new(data: &'a [u8], width: u32, height: u32, channels: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(Error::InvalidChannels(channels));
        }
        let needed = width as usize * height as usize * channels;
        if data.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// View over an RGBA buffer.
    pub fn rgba(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, 4)
    }

    /// View over an RGB buffer.
    pub fn rgb(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, 3)
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the RGB value at (x, y), or `None` outside the image.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get the RGB value at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let pos = (y as usize * self.width as usize + x as usize) * self.channels;
        (self.data[pos], self.data[pos + 1], self.data[pos + 2])
    }

    /// Get the pixel at (x, y) as an [`Rgb`] color.
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_rgb(x, y).map(Rgb::from)
    }
}

/// Owned 8-bit RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Create an image filled with opaque black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 255])
    }

    /// Create an image filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(count * 4).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is 0 or `data.len()` is not exactly
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let needed = width as usize * height as usize * 4;
        if data.len() != needed {
            return Err(Error::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow the image as a scan view.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: 4,
        }
    }

    /// Get the RGBA value at (x, y), or `None` outside the image.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pos = self.offset(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[pos..pos + 4]);
        Some(px)
    }

    /// Set the RGBA value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::RectOutOfBounds`] if (x, y) is outside the image.
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(Rect::new(x, y, 1, 1)));
        }
        let pos = self.offset(x, y);
        self.data[pos..pos + 4].copy_from_slice(&rgba);
        Ok(())
    }

    /// Fill a rectangle with one RGBA value. The rectangle is clipped to
    /// the image first.
    pub fn fill_rect(&mut self, rect: Rect, rgba: [u8; 4]) {
        let Some(r) = rect.clip(self.width, self.height) else {
            return;
        };
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                let pos = self.offset(x, y);
                self.data[pos..pos + 4].copy_from_slice(&rgba);
            }
        }
    }

    /// Extract a rectangular sub-region as a new image.
    ///
    /// Unlike a lenient clip, the rectangle must lie fully inside the
    /// image: scan rectangles always do, and a rectangle that does not is
    /// a caller mistake.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rectangle has zero width or height ([`Error::EmptyCrop`])
    /// - The rectangle extends past the image ([`Error::RectOutOfBounds`])
    ///
    /// # Examples
    ///
    /// ```
    /// use colorcut_core::{Rect, RgbaImage};
    ///
    /// let img = RgbaImage::new(100, 80).unwrap();
    /// let cropped = img.clip_rectangle(&Rect::new(10, 20, 50, 40)).unwrap();
    /// assert_eq!(cropped.width(), 50);
    /// assert_eq!(cropped.height(), 40);
    /// ```
    pub fn clip_rectangle(&self, rect: &Rect) -> Result<RgbaImage> {
        if rect.is_empty() {
            return Err(Error::EmptyCrop {
                w: rect.w,
                h: rect.h,
            });
        }
        if !rect.fits_within(self.width, self.height) {
            return Err(self.out_of_bounds(*rect));
        }

        let row_bytes = rect.w as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * rect.h as usize);
        for y in rect.y..rect.bottom() {
            let start = self.offset(rect.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        Ok(RgbaImage {
            width: rect.w,
            height: rect.h,
            data,
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn out_of_bounds(&self, rect: Rect) -> Error {
        Error::RectOutOfBounds {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            width: self.width,
            height: self.height,
        }
    }
}
