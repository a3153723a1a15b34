//! NotchMatch locates slider-puzzle pieces by template matching.
//!
//! Both images are reduced to Canny edge maps and the piece is correlated
//! against the background with zero-mean normalized cross-correlation. The two
//! strongest, well-separated placements are extracted and a
//! [`SelectionStrategy`] picks the notch. By default the left-most placement is
//! treated as the piece's resting slot and discarded.
//!
//! ```no_run
//! use notchmatch::{Locator, LocatorConfig};
//!
//! let locator = Locator::new(LocatorConfig::default());
//! let result = locator.locate("background.png", "piece.png")?;
//! println!("drag to x={} (confidence {:.2})", result.x, result.confidence);
//! # Ok::<(), notchmatch::NotchMatchError>(())
//! ```
//!
//! Optional features: `rayon` (row-parallel scoring), `simd` (vectorized
//! kernel), `tracing` (spans and events) and `serde` (config/result types).

pub mod candidate;
pub mod diagnostics;
pub mod edge;
pub mod image;
pub mod kernel;
pub mod locator;
pub mod lowlevel;
pub mod select;
pub mod surface;
pub mod template;
mod trace;
pub mod util;

pub use candidate::MatchCandidate;
pub use diagnostics::{render_diagnostics, write_diagnostics};
pub use edge::{EdgeMap, EdgeParams};
pub use crate::image::{ImageSource, ImageView, OwnedImage, RasterImage};
pub use locator::{locate, Localization, Locator, LocatorConfig, PuzzleResult};
pub use select::SelectionStrategy;
pub use util::{ErrorKind, NotchMatchError, NotchMatchResult};
