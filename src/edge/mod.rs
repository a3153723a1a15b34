//! Canny edge maps for matching.
//!
//! Both the background and the piece are reduced to binary edge maps before
//! correlation, so fill colour and shading differences between the cutout and
//! its notch do not affect the score.
//!
//! The detector works on the unsmoothed 3x3 Sobel response with the L1
//! magnitude `|gx| + |gy|`, so a vertical step of `c` grey levels has
//! magnitude `4c`. Thresholds are hysteresis bounds on that scale: with the
//! defaults a step of more than 50 levels is a strong edge, and steps above 25
//! levels survive only when they connect to one.

use crate::image::{ImageView, OwnedImage};
use crate::trace::trace_span;
use crate::util::{NotchMatchError, NotchMatchResult};
use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// `tan(22.5 deg)` in Q15 fixed point, for direction binning.
const TAN_22_5_Q15: i64 = 13573;

/// Default low hysteresis threshold.
pub const DEFAULT_LOW_THRESHOLD: f32 = 100.0;
/// Default high hysteresis threshold.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 200.0;

/// Value written for edge pixels.
pub const EDGE: u8 = 255;

/// Hysteresis thresholds for the Canny detector.
///
/// Both bounds apply to the L1 Sobel magnitude, which reaches `4 * 255` on a
/// full black-to-white step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeParams {
    /// Weak-edge threshold; pixels above it survive only when connected to a strong edge.
    pub low: f32,
    /// Strong-edge threshold.
    pub high: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl EdgeParams {
    /// Checks that the thresholds are finite, non-negative and ordered.
    pub fn validate(&self) -> NotchMatchResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(NotchMatchError::InvalidInput("edge thresholds must be finite"));
        }
        if self.low < 0.0 || self.high < 0.0 {
            return Err(NotchMatchError::InvalidInput(
                "edge thresholds must be non-negative",
            ));
        }
        if self.low > self.high {
            return Err(NotchMatchError::InvalidInput(
                "low edge threshold exceeds high threshold",
            ));
        }
        Ok(())
    }
}

/// Binary edge map with the dimensions of its source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    img: OwnedImage,
}

impl EdgeMap {
    /// Wraps an existing binary map; every non-zero value counts as an edge.
    pub fn from_owned(img: OwnedImage) -> Self {
        Self { img }
    }

    /// Returns the map width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the map height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the edge values.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Counts pixels marked as edges.
    pub fn edge_pixel_count(&self) -> usize {
        self.img.data().iter().filter(|&&v| v != 0).count()
    }
}

/// Runs Canny edge detection on a luminance image.
pub fn detect_edges(gray: &GrayImage, params: EdgeParams) -> NotchMatchResult<EdgeMap> {
    params.validate()?;
    let _span = trace_span!(
        "edge_detect",
        width = gray.width(),
        height = gray.height()
    )
    .entered();

    let width = gray.width() as usize;
    let height = gray.height() as usize;
    let field = GradientField::from_gray(gray);
    let classes = suppress_non_maxima(&field, width, height, params);
    let data = hysteresis(&classes, width, height);
    Ok(EdgeMap::from_owned(OwnedImage::new(data, width, height)?))
}

/// Signed Sobel components and their L1 magnitude, row-major.
struct GradientField {
    gx: Vec<i16>,
    gy: Vec<i16>,
    magnitude: Vec<i32>,
    width: usize,
    height: usize,
}

impl GradientField {
    fn from_gray(gray: &GrayImage) -> Self {
        let gx = horizontal_sobel(gray).into_raw();
        let gy = vertical_sobel(gray).into_raw();
        let magnitude = gx
            .iter()
            .zip(&gy)
            .map(|(&dx, &dy)| i32::from(dx).abs() + i32::from(dy).abs())
            .collect();
        Self {
            gx,
            gy,
            magnitude,
            width: gray.width() as usize,
            height: gray.height() as usize,
        }
    }

    /// Magnitude at `(x, y)`, zero outside the image.
    fn at(&self, x: isize, y: isize) -> i32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.magnitude[y as usize * self.width + x as usize]
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EdgeClass {
    None,
    Weak,
    Strong,
}

/// Thins the gradient to ridge pixels and classifies them against the thresholds.
///
/// Ridges are compared along the gradient direction quantized to 0, 45, 90 or
/// 135 degrees. Ties on a plateau go to the first pixel in scan order.
fn suppress_non_maxima(
    field: &GradientField,
    width: usize,
    height: usize,
    params: EdgeParams,
) -> Vec<EdgeClass> {
    let mut classes = vec![EdgeClass::None; width * height];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = field.magnitude[idx];
            if m as f32 <= params.low {
                continue;
            }

            let (dx, dy) = (field.gx[idx], field.gy[idx]);
            let ax = i64::from(dx).abs();
            let ay = i64::from(dy).abs() << 15;
            let tan22 = ax * TAN_22_5_Q15;
            let (xi, yi) = (x as isize, y as isize);

            let is_ridge = if ay < tan22 {
                m > field.at(xi - 1, yi) && m >= field.at(xi + 1, yi)
            } else if ay > tan22 + (ax << 16) {
                m > field.at(xi, yi - 1) && m >= field.at(xi, yi + 1)
            } else {
                let s = if (dx < 0) != (dy < 0) { -1 } else { 1 };
                m > field.at(xi - s, yi - 1) && m > field.at(xi + s, yi + 1)
            };
            if !is_ridge {
                continue;
            }

            classes[idx] = if m as f32 > params.high {
                EdgeClass::Strong
            } else {
                EdgeClass::Weak
            };
        }
    }
    classes
}

/// Keeps strong pixels and every weak pixel 8-connected to one.
fn hysteresis(classes: &[EdgeClass], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    let mut stack: Vec<usize> = Vec::new();
    for (idx, class) in classes.iter().enumerate() {
        if *class == EdgeClass::Strong {
            out[idx] = EDGE;
            stack.push(idx);
        }
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % width, idx / width);
        for ny in y.saturating_sub(1)..(y + 2).min(height) {
            for nx in x.saturating_sub(1)..(x + 2).min(width) {
                let n = ny * width + nx;
                if out[n] == 0 && classes[n] == EdgeClass::Weak {
                    out[n] = EDGE;
                    stack.push(n);
                }
            }
        }
    }
    out
}
