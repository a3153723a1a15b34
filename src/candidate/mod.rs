//! Candidate extraction from score surfaces.
//!
//! Candidates are pulled one at a time as the global maximum of the surface;
//! after each pick, a window the size of the piece plus a margin is removed so
//! the same feature cannot be picked twice.

use crate::surface::ScoreSurface;
use crate::trace::trace_event;
use std::cmp::Ordering;

/// Default margin, in pixels, added around a picked candidate before suppression.
pub const DEFAULT_SUPPRESSION_MARGIN: usize = 20;

/// One template-match hypothesis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchCandidate {
    /// Left edge of the placement.
    pub x: usize,
    /// Top edge of the placement.
    pub y: usize,
    /// Correlation coefficient at the placement.
    pub score: f32,
}

/// Orders by descending score, then top-most, then left-most.
fn candidate_cmp_desc(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Returns the best remaining candidate, or `None` if no cell is selectable.
pub fn global_max(surface: &ScoreSurface) -> Option<MatchCandidate> {
    let mut best: Option<MatchCandidate> = None;
    for y in 0..surface.height() {
        let Some(row) = surface.row(y) else {
            break;
        };
        for (x, &score) in row.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            let cand = MatchCandidate { x, y, score };
            let better = match best {
                None => true,
                Some(current) => candidate_cmp_desc(&cand, &current) == Ordering::Less,
            };
            if better {
                best = Some(cand);
            }
        }
    }
    best
}

/// Removes the neighbourhood of `cand` from the surface.
///
/// The window spans `[x - margin, x + piece_width + margin)` horizontally and
/// the same vertically, clipped to the surface.
pub fn suppress_around(
    surface: &mut ScoreSurface,
    cand: MatchCandidate,
    piece_width: usize,
    piece_height: usize,
    margin: usize,
) {
    let x0 = cand.x.saturating_sub(margin);
    let y0 = cand.y.saturating_sub(margin);
    let x1 = cand.x.saturating_add(piece_width).saturating_add(margin);
    let y1 = cand.y.saturating_add(piece_height).saturating_add(margin);
    surface.suppress(x0, y0, x1, y1);
}

/// Extracts up to `count` candidates by repeated max-then-suppress.
///
/// The surface is consumed as scratch space. Candidates are returned in
/// extraction order, best first.
pub fn extract_candidates(
    mut surface: ScoreSurface,
    piece_width: usize,
    piece_height: usize,
    margin: usize,
    count: usize,
) -> Vec<MatchCandidate> {
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let Some(cand) = global_max(&surface) else {
            break;
        };
        suppress_around(&mut surface, cand, piece_width, piece_height, margin);
        out.push(cand);
    }
    trace_event!("candidates", count = out.len());
    out
}
