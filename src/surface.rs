//! Dense score surfaces over template placements.

use crate::util::{NotchMatchError, NotchMatchResult};

/// One ZNCC score per top-left placement of a template inside an image.
///
/// A `w x h` template over a `W x H` image yields a `(W - w + 1) x (H - h + 1)`
/// surface. Cells that are not match candidates (flat windows, suppressed
/// neighbourhoods) hold `f32::NEG_INFINITY`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreSurface {
    /// Wraps a row-major score buffer.
    pub fn new(scores: Vec<f32>, width: usize, height: usize) -> NotchMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(NotchMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(NotchMatchError::InvalidDimensions { width, height })?;
        if scores.len() != needed {
            return Err(NotchMatchError::BufferTooSmall {
                needed,
                got: scores.len(),
            });
        }
        Ok(Self {
            width,
            height,
            scores,
        })
    }

    /// Creates a surface with every cell marked as a non-candidate.
    pub(crate) fn empty(width: usize, height: usize) -> NotchMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(NotchMatchError::InvalidDimensions { width, height })?;
        Self::new(vec![f32::NEG_INFINITY; len], width, height)
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns the scores of row `y`.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.scores.get(start..start + self.width)
    }

    /// Returns the full row-major score buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.scores
    }

    /// Counts cells that can still be selected.
    pub fn candidate_count(&self) -> usize {
        self.scores.iter().filter(|s| s.is_finite()).count()
    }

    /// Removes every placement in `[x0, x1) x [y0, y1)` from the candidate set.
    ///
    /// The rectangle is clipped to the surface.
    pub fn suppress(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0..y1 {
            let start = y * self.width;
            self.scores[start + x0..start + x1].fill(f32::NEG_INFINITY);
        }
    }
}
