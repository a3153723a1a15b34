//! Correlation kernel implementations.
//!
//! A kernel scores a [`TemplatePlan`] against every valid placement in an
//! image and fills a [`ScoreSurface`]. Scores are the zero-mean normalized
//! cross-correlation (the correlation coefficient), clamped to `[-1, 1]`.

use crate::image::ImageView;
use crate::surface::ScoreSurface;
use crate::template::TemplatePlan;
use crate::util::{NotchMatchError, NotchMatchResult};

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Default minimum window variance below which a placement is not a candidate.
pub const DEFAULT_MIN_VAR_I: f64 = 1e-8;

/// Scan configuration for kernel evaluations.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Minimum variance of the image window; flatter windows score `-inf`.
    pub min_var_i: f64,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            min_var_i: DEFAULT_MIN_VAR_I,
        }
    }
}

/// Kernel trait for scoring and surface scans.
pub trait Kernel {
    /// Computes the score at a single top-left placement.
    ///
    /// Returns `f32::NEG_INFINITY` for out-of-range or flat windows.
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        params: ScanParams,
    ) -> f32;

    /// Fills `out` with the scores of placement row `y`.
    ///
    /// `out.len()` must equal the number of horizontal placements.
    fn score_row(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        y: usize,
        params: ScanParams,
        out: &mut [f32],
    ) {
        for (x, slot) in out.iter_mut().enumerate() {
            *slot = Self::score_at(image, plan, x, y, params);
        }
    }

    /// Scores every valid placement.
    fn score_surface(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        params: ScanParams,
    ) -> NotchMatchResult<ScoreSurface> {
        let (width, height) = surface_dims(image, plan)?;
        let mut surface = ScoreSurface::empty(width, height)?;
        for (y, row) in surface.as_mut_slice().chunks_mut(width).enumerate() {
            Self::score_row(image, plan, y, params, row);
        }
        Ok(surface)
    }
}

/// Returns the placement grid size for `plan` over `image`.
pub(crate) fn surface_dims(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> NotchMatchResult<(usize, usize)> {
    if !image.fits(plan.width(), plan.height()) {
        return Err(NotchMatchError::PieceTooLarge {
            piece_width: plan.width(),
            piece_height: plan.height(),
            background_width: image.width(),
            background_height: image.height(),
        });
    }
    Ok((
        image.width() - plan.width() + 1,
        image.height() - plan.height() + 1,
    ))
}

/// Turns accumulated window sums into a clamped ZNCC score.
#[inline]
pub(crate) fn finish_score(
    dot: f64,
    sum_i: f64,
    sum_i2: f64,
    plan: &TemplatePlan,
    params: ScanParams,
) -> f32 {
    let n = plan.len() as f64;
    let var_i = sum_i2 - (sum_i * sum_i) / n;
    if var_i <= params.min_var_i {
        return f32::NEG_INFINITY;
    }

    let score = dot / (plan.var_t() * var_i).sqrt();
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        f32::NEG_INFINITY
    }
}

/// Returns `true` when a `plan`-sized window at `(x, y)` lies inside `image`.
#[inline]
pub(crate) fn window_in_bounds(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    x: usize,
    y: usize,
) -> bool {
    x.checked_add(plan.width())
        .is_some_and(|end| end <= image.width())
        && y.checked_add(plan.height())
            .is_some_and(|end| end <= image.height())
}
