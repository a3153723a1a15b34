//! Caller-facing image inputs and decoding.
//!
//! Every accepted input form is normalized to a decoded [`RasterImage`]
//! before any processing happens. Decoding relies on the `image` crate and
//! sniffs the format from content, so paths without an extension work too.

use crate::util::{NotchMatchError, NotchMatchResult};
use image::{DynamicImage, GenericImageView, GrayImage, ImageError, ImageReader};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// An image input in one of the accepted forms.
pub enum ImageSource<'a> {
    /// Encoded image bytes (PNG, JPEG).
    Bytes(&'a [u8]),
    /// A readable stream of encoded image bytes, read to the end.
    Reader(Box<dyn Read + 'a>),
    /// A filesystem path to an encoded image.
    Path(&'a Path),
    /// Pixels that are already decoded.
    Decoded(DynamicImage),
}

impl ImageSource<'_> {
    /// Wraps any reader as a stream source.
    pub fn reader<'r, R: Read + 'r>(reader: R) -> ImageSource<'r> {
        ImageSource::Reader(Box::new(reader))
    }

    /// Reads and decodes the source into a raster image.
    pub fn decode(self) -> NotchMatchResult<RasterImage> {
        let img = match self {
            ImageSource::Bytes(bytes) => decode_bytes(bytes)?,
            ImageSource::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .map_err(|err| NotchMatchError::ImageIo {
                        reason: err.to_string(),
                    })?;
                decode_bytes(&buf)?
            }
            ImageSource::Path(path) => decode_path(path)?,
            ImageSource::Decoded(img) => img,
        };
        RasterImage::new(img)
    }
}

impl<'a> From<&'a [u8]> for ImageSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for ImageSource<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ImageSource::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        ImageSource::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for ImageSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        ImageSource::Path(path.as_path())
    }
}

impl<'a> From<&'a str> for ImageSource<'a> {
    fn from(path: &'a str) -> Self {
        ImageSource::Path(Path::new(path))
    }
}

impl From<DynamicImage> for ImageSource<'_> {
    fn from(img: DynamicImage) -> Self {
        ImageSource::Decoded(img)
    }
}

fn decode_bytes(bytes: &[u8]) -> NotchMatchResult<DynamicImage> {
    if bytes.is_empty() {
        return Err(NotchMatchError::Decode {
            reason: "empty buffer".to_string(),
        });
    }
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| NotchMatchError::ImageIo {
            reason: err.to_string(),
        })?
        .decode()
        .map_err(map_image_error)
}

fn decode_path(path: &Path) -> NotchMatchResult<DynamicImage> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| NotchMatchError::ImageIo {
            reason: format!("{}: {err}", path.display()),
        })?
        .decode()
        .map_err(map_image_error)
}

fn map_image_error(err: ImageError) -> NotchMatchError {
    match err {
        ImageError::IoError(io) => NotchMatchError::ImageIo {
            reason: io.to_string(),
        },
        other => NotchMatchError::Decode {
            reason: other.to_string(),
        },
    }
}

/// A decoded, non-empty image. Grayscale or multi-channel.
#[derive(Clone, Debug)]
pub struct RasterImage {
    inner: DynamicImage,
}

impl RasterImage {
    /// Wraps a decoded image, rejecting zero-sized images.
    pub fn new(inner: DynamicImage) -> NotchMatchResult<Self> {
        let (width, height) = inner.dimensions();
        if width == 0 || height == 0 {
            return Err(NotchMatchError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }
        Ok(Self { inner })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.inner.width() as usize
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.inner.height() as usize
    }

    /// Returns the underlying decoded image.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.inner
    }

    /// Converts to 8-bit luminance.
    pub fn to_luma(&self) -> GrayImage {
        self.inner.to_luma8()
    }

    /// Crops to the bounding box of pixels with non-zero alpha.
    ///
    /// Images without an alpha channel are returned unchanged. The returned
    /// offset is the top-left corner of the crop in the source image.
    pub fn trim_transparent(&self) -> NotchMatchResult<(RasterImage, (usize, usize))> {
        if !self.inner.color().has_alpha() {
            return Ok((self.clone(), (0, 0)));
        }

        let rgba = self.inner.to_rgba8();
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in rgba.enumerate_pixels() {
            if pixel[3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }

        let (x0, y0, x1, y1) = bounds.ok_or(NotchMatchError::InvalidInput(
            "piece is fully transparent",
        ))?;
        let cropped = self.inner.crop_imm(x0, y0, x1 - x0 + 1, y1 - y0 + 1);
        Ok((RasterImage::new(cropped)?, (x0 as usize, y0 as usize)))
    }
}
