//! Image container types

use crate::optical_flow::common::error::{FlowError, Result};

/// Single-channel floating-point image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Frame {
    /// Create a zero-filled frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wrap an existing buffer. Fails if the buffer length does not match
    /// `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(FlowError::InvalidParameter(format!(
                "buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert an 8-bit luma buffer into a floating-point frame.
    pub fn from_luma8(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.len() != width * height {
            return Err(FlowError::InvalidParameter(format!(
                "luma buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data: data.iter().map(|&v| v as f32).collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    /// Sample with replicate-border addressing: out-of-range coordinates are
    /// clamped to the nearest edge pixel.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.data[y * self.width + x]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// Interleaved 8-bit RGB image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImage {
    /// Create a black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Replicate a grayscale frame across the three channels, clamping
    /// intensities to the displayable 8-bit range.
    pub fn from_gray(frame: &Frame) -> Self {
        let mut data = Vec::with_capacity(frame.width() * frame.height() * 3);
        for &v in frame.as_slice() {
            let v8 = v.clamp(0.0, 255.0).round() as u8;
            data.extend_from_slice(&[v8, v8, v8]);
        }
        Self {
            width: frame.width(),
            height: frame.height(),
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Blend `rgb` over the existing pixel with coverage `alpha` in [0, 1].
    /// Used by the anti-aliased line rasterizer.
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3], alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let i = (y * self.width + x) * 3;
        for c in 0..3 {
            let dst = self.data[i + c] as f32;
            let src = rgb[c] as f32;
            self.data[i + c] = (dst * (1.0 - a) + src * a).round() as u8;
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
