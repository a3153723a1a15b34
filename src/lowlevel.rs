//! Low-level building blocks for custom matching pipelines.
//!
//! These expose the edge detector, template plans, kernels and candidate
//! extraction used by [`Locator`](crate::Locator). Most users should prefer
//! the top-level `Locator` and `locate` API.

pub use crate::candidate::{
    extract_candidates, global_max, suppress_around, DEFAULT_SUPPRESSION_MARGIN,
};
pub use crate::edge::{detect_edges, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::score_surface_par;
pub use crate::kernel::scalar::ZnccScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::ZnccSimd;
pub use crate::kernel::{Kernel, ScanParams};
pub use crate::surface::ScoreSurface;
pub use crate::template::TemplatePlan;
