//! Rules for choosing the notch among extracted candidates.
//!
//! The cutout leaves a silhouette at the piece's resting position that the
//! edge detector matches about as well as the real notch. A strategy decides
//! which candidate is the notch. Strategies never fall back: if fewer
//! candidates exist than a strategy needs, selection fails with `NoMatch`.

use crate::candidate::MatchCandidate;
use crate::util::{NotchMatchError, NotchMatchResult};

/// Strategy for picking the notch candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SelectionStrategy {
    /// The piece rests at the left edge: drop the left-most of two candidates.
    #[default]
    LeftmostIsOrigin,
    /// Take the strongest candidate.
    HighestScore,
    /// Drop the candidate closest to the piece's known resting x.
    GeometricOffset {
        /// Top-left x of the piece at rest, in background pixels.
        origin_x: usize,
    },
}

impl SelectionStrategy {
    /// Number of candidates this strategy needs to decide.
    pub fn required_candidates(&self) -> usize {
        match self {
            Self::HighestScore => 1,
            Self::LeftmostIsOrigin | Self::GeometricOffset { .. } => 2,
        }
    }

    /// Picks the notch from `candidates` (best-first extraction order).
    pub fn select(&self, candidates: &[MatchCandidate]) -> NotchMatchResult<MatchCandidate> {
        let required = self.required_candidates();
        if candidates.len() < required {
            return Err(NotchMatchError::NoMatch {
                found: candidates.len(),
                required,
            });
        }

        let chosen = match *self {
            Self::HighestScore => candidates[0],
            Self::LeftmostIsOrigin => {
                let mut pair = [candidates[0], candidates[1]];
                pair.sort_by_key(|c| c.x);
                pair[1]
            }
            Self::GeometricOffset { origin_x } => {
                let (a, b) = (candidates[0], candidates[1]);
                let da = a.x.abs_diff(origin_x);
                let db = b.x.abs_diff(origin_x);
                match da.cmp(&db) {
                    std::cmp::Ordering::Less => b,
                    std::cmp::Ordering::Greater => a,
                    std::cmp::Ordering::Equal => {
                        if a.x <= b.x {
                            b
                        } else {
                            a
                        }
                    }
                }
            }
        };
        Ok(chosen)
    }
}
