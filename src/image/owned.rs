//! Owned contiguous grayscale buffers.

use crate::image::ImageView;
use crate::util::{NotchMatchError, NotchMatchResult};

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> NotchMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(NotchMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(NotchMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(NotchMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(NotchMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a grayscale `image` buffer.
    pub fn from_gray_image(img: &image::GrayImage) -> NotchMatchResult<Self> {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::new(img.as_raw().clone(), width, height)
    }

    /// Takes ownership of a grayscale `image` buffer without copying.
    pub fn from_gray_buffer(img: image::GrayImage) -> NotchMatchResult<Self> {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::new(img.into_raw(), width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}
