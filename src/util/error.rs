//! Error types for notchmatch.

use thiserror::Error;

/// Result alias for notchmatch operations.
pub type NotchMatchResult<T> = std::result::Result<T, NotchMatchError>;

/// Coarse error categories callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input could not be read or interpreted as an image.
    Decode,
    /// A dimensional or parameter precondition was violated.
    InvalidInput,
    /// Not enough match candidates survived the search.
    NoMatch,
    /// Writing diagnostic output failed.
    Io,
}

/// Errors that can occur when locating a puzzle piece.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NotchMatchError {
    /// The bytes are not a supported encoded image.
    #[error("failed to decode image: {reason}")]
    Decode { reason: String },
    /// Reading the image source failed before decoding.
    #[error("failed to read image: {reason}")]
    ImageIo { reason: String },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the declared layout.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The piece does not fit inside the background.
    #[error(
        "piece {piece_width}x{piece_height} exceeds background {background_width}x{background_height}"
    )]
    PieceTooLarge {
        piece_width: usize,
        piece_height: usize,
        background_width: usize,
        background_height: usize,
    },
    /// The piece edge map carries no structure to correlate against.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// Fewer candidates survived suppression than the strategy requires.
    #[error("no match: found {found} candidate(s), strategy requires {required}")]
    NoMatch { found: usize, required: usize },
    /// The annotated diagnostic image could not be written.
    #[error("failed to write diagnostics: {reason}")]
    DiagnosticsIo { reason: String },
}

impl NotchMatchError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } | Self::ImageIo { .. } => ErrorKind::Decode,
            Self::InvalidInput(_)
            | Self::InvalidDimensions { .. }
            | Self::InvalidStride { .. }
            | Self::BufferTooSmall { .. }
            | Self::PieceTooLarge { .. } => ErrorKind::InvalidInput,
            Self::DegenerateTemplate { .. } | Self::NoMatch { .. } => ErrorKind::NoMatch,
            Self::DiagnosticsIo { .. } => ErrorKind::Io,
        }
    }
}
