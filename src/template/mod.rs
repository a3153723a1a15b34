//! Template plan precomputation for ZNCC scoring.
//!
//! The plan stores the zero-mean template `t' = t - mean(t)` and its energy
//! `var_t = sum(t'^2)`. Because `sum(t') == 0`, the correlation numerator at a
//! placement reduces to `sum(t' * I)` without subtracting the window mean.

use crate::image::ImageView;
use crate::util::{NotchMatchError, NotchMatchResult};

/// Templates with less energy than this are treated as flat.
pub(crate) const MIN_TEMPLATE_ENERGY: f64 = 1e-8;

/// Precomputed statistics and zero-mean buffer for a piece edge map.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_t: f64,
    t_prime: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// Fails with `DegenerateTemplate` when every pixel has the same value,
    /// e.g. a piece whose edge map is empty.
    pub fn from_view(tpl: ImageView<'_, u8>) -> NotchMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(NotchMatchError::InvalidDimensions { width, height })?;

        let mut sum = 0.0f64;
        for y in 0..height {
            let row = template_row(tpl, y)?;
            sum += row.iter().map(|&v| f64::from(v)).sum::<f64>();
        }
        let mean = sum / count as f64;

        let mut t_prime = Vec::with_capacity(count);
        let mut var_t = 0.0f64;
        for y in 0..height {
            for &value in template_row(tpl, y)? {
                let centered = f64::from(value) - mean;
                var_t += centered * centered;
                t_prime.push(centered);
            }
        }

        if var_t <= MIN_TEMPLATE_ENERGY {
            return Err(NotchMatchError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        Ok(Self {
            width,
            height,
            mean,
            var_t,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template pixels.
    pub fn len(&self) -> usize {
        self.t_prime.len()
    }

    /// Always `false`; plans are built from non-empty views.
    pub fn is_empty(&self) -> bool {
        self.t_prime.is_empty()
    }

    /// Returns the mean value of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns `sum((t - mean)^2)`.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Returns the zero-mean template in row-major order.
    pub fn t_prime(&self) -> &[f64] {
        &self.t_prime
    }
}

fn template_row(tpl: ImageView<'_, u8>, y: usize) -> NotchMatchResult<&[u8]> {
    tpl.row(y).ok_or_else(|| {
        let needed = (y + 1)
            .checked_mul(tpl.stride())
            .and_then(|v| v.checked_add(tpl.width()))
            .unwrap_or(usize::MAX);
        NotchMatchError::BufferTooSmall {
            needed,
            got: tpl.as_slice().len(),
        }
    })
}
