//! SIMD-accelerated ZNCC kernel using the `wide` crate.
//!
//! The inner template row loop processes four pixels at a time with `f64x4`
//! lanes and finishes with a scalar remainder. Accumulating in `f64` keeps
//! the window variance exact for 8-bit edge maps.

use crate::image::ImageView;
use crate::kernel::{finish_score, window_in_bounds, Kernel, ScanParams};
use crate::template::TemplatePlan;
use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_u8x4(slice: &[u8]) -> f64x4 {
    f64x4::from([
        f64::from(slice[0]),
        f64::from(slice[1]),
        f64::from(slice[2]),
        f64::from(slice[3]),
    ])
}

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

/// SIMD ZNCC kernel.
pub struct ZnccSimd;

impl Kernel for ZnccSimd {
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
        let simd_end = tpl_width / LANES * LANES;

        let mut dot_vec = f64x4::ZERO;
        let mut sum_i_vec = f64x4::ZERO;
        let mut sum_i2_vec = f64x4::ZERO;
        let mut dot_s = 0.0f64;
        let mut sum_i_s = 0.0f64;
        let mut sum_i2_s = 0.0f64;

        for ty in 0..plan.height() {
            let Some(img_row) = image.row(y + ty) else {
                return f32::NEG_INFINITY;
            };
            let window = &img_row[x..x + tpl_width];
            let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];

            let mut tx = 0;
            while tx < simd_end {
                let img_vals = load_u8x4(&window[tx..]);
                let tpl_vals = load_f64x4(&tpl_row[tx..]);
                dot_vec += tpl_vals * img_vals;
                sum_i_vec += img_vals;
                sum_i2_vec += img_vals * img_vals;
                tx += LANES;
            }

            while tx < tpl_width {
                let value = f64::from(window[tx]);
                dot_s += tpl_row[tx] * value;
                sum_i_s += value;
                sum_i2_s += value * value;
                tx += 1;
            }
        }

        finish_score(
            hsum(dot_vec) + dot_s,
            hsum(sum_i_vec) + sum_i_s,
            hsum(sum_i2_vec) + sum_i2_s,
            plan,
            params,
        )
    }
}
