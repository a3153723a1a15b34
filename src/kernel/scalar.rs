//! Scalar reference kernel for ZNCC scoring.

use crate::image::ImageView;
use crate::kernel::{finish_score, window_in_bounds, Kernel, ScanParams};
use crate::template::TemplatePlan;

/// Scalar ZNCC kernel; the reference every other kernel must agree with.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        params: ScanParams,
    ) -> f32 {
        if !window_in_bounds(image, plan, x, y) {
            return f32::NEG_INFINITY;
        }

        let tpl_width = plan.width();
        let t_prime = plan.t_prime();

        let mut dot = 0.0f64;
        let mut sum_i = 0.0f64;
        let mut sum_i2 = 0.0f64;

        for ty in 0..plan.height() {
            let Some(img_row) = image.row(y + ty) else {
                return f32::NEG_INFINITY;
            };
            let window = &img_row[x..x + tpl_width];
            let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];
            for (&pixel, &t) in window.iter().zip(tpl_row) {
                let value = f64::from(pixel);
                dot += t * value;
                sum_i += value;
                sum_i2 += value * value;
            }
        }

        finish_score(dot, sum_i, sum_i2, plan, params)
    }
}
