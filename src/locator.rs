//! The puzzle locator: decode, edge-detect, correlate, pick the notch.
//!
//! A [`Locator`] holds a [`LocatorConfig`] and nothing else, so one value can
//! serve any number of concurrent calls. Every call decodes its own inputs
//! and discards all intermediate buffers before returning.

use crate::candidate::{extract_candidates, MatchCandidate, DEFAULT_SUPPRESSION_MARGIN};
use crate::diagnostics::write_diagnostics;
use crate::edge::{detect_edges, EdgeMap, EdgeParams};
use crate::image::{ImageSource, ImageView, RasterImage};
#[cfg(feature = "rayon")]
use crate::kernel::rayon::score_surface_par;
use crate::kernel::{Kernel, ScanParams, DEFAULT_MIN_VAR_I};
use crate::surface::ScoreSurface;
use crate::select::SelectionStrategy;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{NotchMatchError, NotchMatchResult};
use std::path::PathBuf;

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ZnccScalar as Zncc;
#[cfg(feature = "simd")]
use crate::kernel::simd::ZnccSimd as Zncc;

/// Default location of the annotated diagnostic image.
pub const DEFAULT_DIAGNOSTICS_PATH: &str = "output.png";

/// Number of candidates pulled from the score surface per call.
const CANDIDATES_PER_CALL: usize = 2;

/// Configuration for [`Locator`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocatorConfig {
    /// Write an annotated copy of the background after each successful call.
    pub diagnostics_enabled: bool,
    /// Destination of the annotated image.
    pub diagnostics_path: PathBuf,
    /// Canny hysteresis thresholds.
    pub edge: EdgeParams,
    /// Extra pixels suppressed around the first candidate on each side.
    pub suppression_margin: usize,
    /// Rule for picking the notch among candidates.
    pub strategy: SelectionStrategy,
    /// Crop the piece to its non-transparent pixels before matching.
    pub trim_piece_alpha: bool,
    /// Score rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
    /// Minimum background window variance for a placement to count.
    pub min_var_i: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            diagnostics_enabled: false,
            diagnostics_path: PathBuf::from(DEFAULT_DIAGNOSTICS_PATH),
            edge: EdgeParams::default(),
            suppression_margin: DEFAULT_SUPPRESSION_MARGIN,
            strategy: SelectionStrategy::default(),
            trim_piece_alpha: false,
            parallel: false,
            min_var_i: DEFAULT_MIN_VAR_I,
        }
    }
}

impl LocatorConfig {
    /// Enables diagnostics, writing to `path`.
    pub fn with_diagnostics(mut self, path: impl Into<PathBuf>) -> Self {
        self.diagnostics_enabled = true;
        self.diagnostics_path = path.into();
        self
    }

    /// Sets the selection strategy.
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the Canny thresholds.
    pub fn with_edge_params(mut self, edge: EdgeParams) -> Self {
        self.edge = edge;
        self
    }

    /// Sets the suppression margin.
    pub fn with_suppression_margin(mut self, margin: usize) -> Self {
        self.suppression_margin = margin;
        self
    }
}

/// Where the slider must move the piece.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleResult {
    /// Horizontal centre of the notch, from the left edge of the background.
    pub x: usize,
    /// Vertical centre of the notch, from the top edge of the background.
    pub y: usize,
    /// `background_height - y`.
    pub distance_from_bottom: usize,
    /// Correlation score of the chosen candidate.
    pub confidence: f32,
}

impl PuzzleResult {
    /// Derives the result from the chosen placement and the piece size.
    ///
    /// Fails with `InvalidInput` when the centre does not lie above
    /// `background_height`.
    pub fn from_candidate(
        chosen: MatchCandidate,
        piece_width: usize,
        piece_height: usize,
        background_height: usize,
    ) -> NotchMatchResult<Self> {
        let outside =
            || NotchMatchError::InvalidInput("candidate centre lies outside the background");
        let x = chosen.x.checked_add(piece_width / 2).ok_or_else(outside)?;
        let y = chosen.y.checked_add(piece_height / 2).ok_or_else(outside)?;
        let distance_from_bottom = background_height
            .checked_sub(y)
            .filter(|&d| d > 0)
            .ok_or_else(outside)?;
        Ok(Self {
            x,
            y,
            distance_from_bottom,
            confidence: chosen.score,
        })
    }
}

/// A located piece together with the evidence behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct Localization {
    /// The caller-facing result.
    pub result: PuzzleResult,
    /// The candidate the strategy picked.
    pub chosen: MatchCandidate,
    /// Every extracted candidate, best first.
    pub candidates: Vec<MatchCandidate>,
    /// Piece `(width, height)` used for matching.
    pub piece_size: (usize, usize),
    /// Background `(width, height)`.
    pub background_size: (usize, usize),
}

impl Localization {
    /// Chosen bounding box as `(x0, y0, x1, y1)`, end-exclusive.
    pub fn bounding_box(&self) -> (usize, usize, usize, usize) {
        let (w, h) = self.piece_size;
        (
            self.chosen.x,
            self.chosen.y,
            self.chosen.x + w,
            self.chosen.y + h,
        )
    }
}

/// Locates puzzle pieces against backgrounds.
#[derive(Clone, Debug, Default)]
pub struct Locator {
    cfg: LocatorConfig,
}

impl Locator {
    /// Creates a locator with `cfg`.
    pub fn new(cfg: LocatorConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: LocatorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &LocatorConfig {
        &self.cfg
    }

    /// Finds where `piece` fits into `background`.
    pub fn locate<'b, 'p>(
        &self,
        background: impl Into<ImageSource<'b>>,
        piece: impl Into<ImageSource<'p>>,
    ) -> NotchMatchResult<PuzzleResult> {
        Ok(self.locate_detailed(background, piece)?.result)
    }

    /// Like [`locate`](Self::locate), but also returns the candidates.
    pub fn locate_detailed<'b, 'p>(
        &self,
        background: impl Into<ImageSource<'b>>,
        piece: impl Into<ImageSource<'p>>,
    ) -> NotchMatchResult<Localization> {
        let background = background.into().decode()?;
        let mut piece = piece.into().decode()?;
        if self.cfg.trim_piece_alpha {
            piece = piece.trim_transparent()?.0;
        }
        self.locate_rasters(&background, &piece)
    }

    /// Locates using already-decoded images.
    pub fn locate_rasters(
        &self,
        background: &RasterImage,
        piece: &RasterImage,
    ) -> NotchMatchResult<Localization> {
        let _span = trace_span!(
            "locate",
            background_width = background.width(),
            background_height = background.height(),
            piece_width = piece.width(),
            piece_height = piece.height()
        )
        .entered();

        check_fits(
            piece.width(),
            piece.height(),
            background.width(),
            background.height(),
        )?;

        let background_edges = detect_edges(&background.to_luma(), self.cfg.edge)?;
        let piece_edges = detect_edges(&piece.to_luma(), self.cfg.edge)?;
        trace_event!(
            "edges",
            background_edges = background_edges.edge_pixel_count(),
            piece_edges = piece_edges.edge_pixel_count()
        );

        let loc = self.locate_edge_maps(&background_edges, &piece_edges)?;

        if self.cfg.diagnostics_enabled {
            if let Err(err) = write_diagnostics(background, &loc, &self.cfg.diagnostics_path) {
                let reason = err.to_string();
                trace_warn!("diagnostics_write_failed", reason = reason.as_str());
            }
        }

        Ok(loc)
    }

    /// Locates using precomputed edge maps.
    ///
    /// This is the matching core: correlation, candidate extraction and
    /// selection, with no decoding or edge detection.
    pub fn locate_edge_maps(
        &self,
        background: &EdgeMap,
        piece: &EdgeMap,
    ) -> NotchMatchResult<Localization> {
        let (bg_width, bg_height) = (background.width(), background.height());
        let (piece_width, piece_height) = (piece.width(), piece.height());
        check_fits(piece_width, piece_height, bg_width, bg_height)?;

        let plan = TemplatePlan::from_view(piece.view())?;
        let surface = self.score_surface(background.view(), &plan)?;
        let candidates = extract_candidates(
            surface,
            piece_width,
            piece_height,
            self.cfg.suppression_margin,
            CANDIDATES_PER_CALL.max(self.cfg.strategy.required_candidates()),
        );

        let chosen = self.cfg.strategy.select(&candidates)?;
        debug_assert!(chosen.x + piece_width <= bg_width);
        debug_assert!(chosen.y + piece_height <= bg_height);
        trace_event!(
            "chosen",
            x = chosen.x,
            y = chosen.y,
            score = chosen.score
        );

        Ok(Localization {
            result: PuzzleResult::from_candidate(chosen, piece_width, piece_height, bg_height)?,
            chosen,
            candidates,
            piece_size: (piece_width, piece_height),
            background_size: (bg_width, bg_height),
        })
    }

    fn score_surface(
        &self,
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> NotchMatchResult<ScoreSurface> {
        let _span = trace_span!("score_surface", parallel = self.cfg.parallel).entered();
        let params = ScanParams {
            min_var_i: self.cfg.min_var_i,
        };

        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return score_surface_par::<Zncc>(image, plan, params);
            }
        }

        <Zncc as Kernel>::score_surface(image, plan, params)
    }
}

fn check_fits(
    piece_width: usize,
    piece_height: usize,
    background_width: usize,
    background_height: usize,
) -> NotchMatchResult<()> {
    if piece_width > background_width || piece_height > background_height {
        return Err(NotchMatchError::PieceTooLarge {
            piece_width,
            piece_height,
            background_width,
            background_height,
        });
    }
    Ok(())
}

/// Locates `piece` in `background` with the default configuration.
pub fn locate<'b, 'p>(
    background: impl Into<ImageSource<'b>>,
    piece: impl Into<ImageSource<'p>>,
) -> NotchMatchResult<PuzzleResult> {
    Locator::default().locate(background, piece)
}
