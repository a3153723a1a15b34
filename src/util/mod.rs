//! Shared utility helpers.

pub mod error;

pub use error::{ErrorKind, NotchMatchError, NotchMatchResult};
