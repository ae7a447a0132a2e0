//! Raw RGBA sample buffers and PNG loading

use crate::io::error::{AlgorithmError, Result, invalid_input};
use std::path::Path;

/// Bytes per pixel in every sample buffer
pub const CHANNELS: usize = 4;

/// Rectangular region of a loaded image used as the sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    /// Left edge in pixels
    pub x: usize,
    /// Top edge in pixels
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

/// Row-major RGBA pixel buffer the tile catalog is extracted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl SampleImage {
    /// Wrap a raw RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not `width * height * 4`
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or_else(|| invalid_input(format!("sample {width}x{height} is too large")))?;

        if data.len() != expected {
            return Err(invalid_input(format!(
                "sample buffer holds {} bytes, expected {expected} for {width}x{height} RGBA",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a sample by evaluating a colour function at every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut color: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&color(x, y));
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Load a sample from an image file, converting to RGBA
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);

        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Sample width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Sample height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the sample holds no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA value at (x, y), if in bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * CHANNELS;
        let bytes = self.data.get(start..start + CHANNELS)?;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(bytes);
        Some(pixel)
    }

    /// Copy out a rectangular block of pixels as contiguous RGBA rows
    ///
    /// Returns `None` if the block does not fit inside the sample.
    pub fn block(&self, x: usize, y: usize, width: usize, height: usize) -> Option<Vec<u8>> {
        let x_end = x.checked_add(width).filter(|&end| end <= self.width)?;
        let y_end = y.checked_add(height).filter(|&end| end <= self.height)?;

        let row_bytes = (x_end - x) * CHANNELS;
        let mut bytes = Vec::with_capacity(row_bytes * height);
        for row in y..y_end {
            let start = (row * self.width + x) * CHANNELS;
            bytes.extend_from_slice(self.data.get(start..start + row_bytes)?);
        }
        Some(bytes)
    }

    /// Restrict the sample to a window
    ///
    /// # Errors
    ///
    /// Returns an error if the window is empty or extends past the image edges
    pub fn crop(&self, window: SampleWindow) -> Result<Self> {
        if window.width == 0 || window.height == 0 {
            return Err(invalid_input("sample window has zero area"));
        }

        let data = self
            .block(window.x, window.y, window.width, window.height)
            .ok_or_else(|| {
                invalid_input(format!(
                    "sample window {}x{} at ({}, {}) exceeds image {}x{}",
                    window.width, window.height, window.x, window.y, self.width, self.height
                ))
            })?;

        Ok(Self {
            width: window.width,
            height: window.height,
            data,
        })
    }
}
