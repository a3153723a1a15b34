//! Rayon-parallel surface scans (feature-gated).
//!
//! Rows of the placement grid are independent, so each worker fills whole
//! rows with the chosen kernel. Output is identical to the sequential scan.

use crate::image::ImageView;
use crate::kernel::{surface_dims, Kernel, ScanParams};
use crate::surface::ScoreSurface;
use crate::template::TemplatePlan;
use crate::util::NotchMatchResult;
use rayon::prelude::*;

/// Row-parallel full surface scan with kernel `K`.
pub fn score_surface_par<K: Kernel>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    params: ScanParams,
) -> NotchMatchResult<ScoreSurface> {
    let (width, height) = surface_dims(image, plan)?;
    let mut surface = ScoreSurface::empty(width, height)?;
    surface
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| K::score_row(image, plan, y, params, row));
    Ok(surface)
}
