use std::cmp::Reverse;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::KidoriError;
use crate::entities::{Layout, Orientation, PieceInstance, PlacedPiece};
use crate::fsize;
use crate::geometry::primitives::Rect;
use crate::packing::FreeSpacePool;
use crate::util::FPA;
use crate::util::assertions;

/// Configuration of a packing run
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PackConfig {
    /// Fixed width of the sheet
    pub sheet_width: fsize,
    /// Margin added to both dimensions of every piece for the material removed by the cutting tool
    #[serde(default)]
    pub kerf: fsize,
    /// Whether pieces may be laid with their long side across the width of the sheet
    #[serde(default)]
    pub allow_rotation: bool,
}

impl PackConfig {
    pub fn validate(&self) -> Result<(), KidoriError> {
        if !(self.sheet_width.is_finite() && self.sheet_width > 0.0) {
            return Err(KidoriError::InvalidWidth(self.sheet_width));
        }
        if !(self.kerf.is_finite() && self.kerf >= 0.0) {
            return Err(KidoriError::InvalidKerf(self.kerf));
        }
        Ok(())
    }
}

/// Why a piece is missing from a packed layout
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Even its narrowest allowed orientation is wider than the sheet
    ExceedsWidth,
    /// No room was found, even after growing the sheet
    NoFit,
    /// The piece has a non-positive or non-finite side
    InvalidDimensions,
}

/// A piece that could not be placed. Not fatal: packing continues with the remaining pieces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnplacedPiece {
    pub spec_id: usize,
    pub long_side: fsize,
    pub short_side: fsize,
    pub reason: UnplacedReason,
}

/// The layout produced by a packing run, plus every piece it had to leave out.
#[derive(Debug, Clone, PartialEq)]
pub struct PackOutcome {
    pub layout: Layout,
    pub unplaced: Vec<UnplacedPiece>,
}

impl PackOutcome {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Best-fit guillotine packer for a sheet of fixed width and growing length.
///
/// Pieces are placed largest first. Each piece goes to the (free rectangle, orientation) pair wasting the least area.
/// When nothing fits, the sheet is grown by the length of the piece and the search is retried once.
/// A run is a pure function of its inputs, no state is carried over between runs.
#[derive(Debug, Clone, Copy)]
pub struct Packer {
    pub config: PackConfig,
}

struct PackState {
    pool: FreeSpacePool,
    sheet_length: fsize,
    placed: Vec<PlacedPiece>,
}

impl Packer {
    pub fn new(config: PackConfig) -> Result<Self, KidoriError> {
        config.validate()?;
        Ok(Packer { config })
    }

    /// Packs the expanded pieces (one entry per unit) onto the sheet.
    pub fn pack(&self, pieces: &[PieceInstance]) -> PackOutcome {
        let start = Instant::now();
        let PackConfig {
            sheet_width,
            kerf,
            allow_rotation,
        } = self.config;

        let mut state = PackState {
            pool: FreeSpacePool::new(sheet_width),
            sheet_length: 0.0,
            placed: vec![],
        };
        let mut unplaced = vec![];

        for piece in placement_order(pieces).into_iter().map(|i| &pieces[i]) {
            if !has_valid_dimensions(piece) {
                warn!("[PACK] skipping piece {} with invalid dimensions", piece.spec_id);
                unplaced.push(unplaced_piece(piece, UnplacedReason::InvalidDimensions));
                continue;
            }
            let candidates = Orientation::candidates(piece, kerf, allow_rotation);
            if self.try_place(&mut state, piece, &candidates) {
                continue;
            }

            // nothing fits, grow the sheet by enough length for the tallest orientation that fits across it
            let growth = growth_length(piece, &candidates, sheet_width, kerf);
            state.pool.push(Rect::new(0.0, state.sheet_length, sheet_width, growth));
            state.sheet_length += growth;
            debug!(
                "[PACK] no fit for piece {}, grew sheet by {:.3} to {:.3}",
                piece.spec_id, growth, state.sheet_length
            );

            if !self.try_place(&mut state, piece, &candidates) {
                let narrowest = candidates
                    .iter()
                    .map(|o| o.width)
                    .fold(fsize::INFINITY, fsize::min);
                let reason = match narrowest > sheet_width {
                    true => UnplacedReason::ExceedsWidth,
                    false => UnplacedReason::NoFit,
                };
                warn!(
                    "[PACK] piece {} ({} x {}) could not be placed: {:?}",
                    piece.spec_id, piece.long_side, piece.short_side, reason
                );
                unplaced.push(unplaced_piece(piece, reason));
            }
        }

        // growth that ended up unused is cut off again
        let layout = {
            let mut layout = Layout {
                sheet_width,
                sheet_length: 0.0,
                kerf,
                placed_pieces: state.placed,
            };
            layout.sheet_length = layout.occupied_length();
            if layout.sheet_length < state.sheet_length {
                debug!(
                    "[PACK] fitted sheet length from {:.3} to {:.3}",
                    state.sheet_length, layout.sheet_length
                );
            }
            layout
        };
        debug_assert!(assertions::packed_layout_is_valid(&layout));

        info!(
            "[PACK] placed {}/{} pieces on a {:.3} x {:.3} sheet ({:.1}% dense) in {:.3}ms",
            layout.placed_pieces.len(),
            pieces.len(),
            layout.sheet_width,
            layout.sheet_length,
            layout.density() * 100.0,
            start.elapsed().as_secs_f64() * 1000.0
        );
        if !unplaced.is_empty() {
            warn!("[PACK] {} pieces could not be placed", unplaced.len());
        }

        PackOutcome { layout, unplaced }
    }

    /// Places `piece` at its best fit in the current pool, if there is one.
    fn try_place(&self, state: &mut PackState, piece: &PieceInstance, candidates: &[Orientation]) -> bool {
        let Some(fit) = state.pool.best_fit(candidates) else {
            return false;
        };
        let free = state.pool.rects()[fit.index].as_rect();
        let placed = fit.orientation.placed_at(free.x, free.y);
        // pending placeholders fit nothing, so every placement lies within the grown sheet
        debug_assert!(FPA(placed.bottom()) <= FPA(state.sheet_length));
        state.pool.occupy(fit.index, &placed);

        let placed_piece = PlacedPiece {
            id: state.placed.len(),
            x: placed.x,
            y: placed.y,
            width: placed.width,
            height: placed.height,
            color: piece.color,
        };
        debug!(
            "[PACK] placed piece {} as #{} at ({:.3}, {:.3}), {:.3} x {:.3}{}, waste {:.3}",
            piece.spec_id,
            placed_piece.id,
            placed.x,
            placed.y,
            placed.width,
            placed.height,
            if fit.orientation.rotated { " (rotated)" } else { "" },
            fit.score
        );
        state.placed.push(placed_piece);

        debug_assert!(assertions::free_space_disjoint_from_placements(
            state.pool.rects(),
            &state.placed
        ));
        true
    }
}

/// Packs `pieces` onto a sheet of `sheet_width`.
///
/// A non-positive `sheet_width` (or an invalid `kerf`) offers no space at all and results in an empty layout.
/// Pieces that cannot be placed are left out of the layout, use [`Packer::pack`] to learn which ones.
pub fn pack(pieces: &[PieceInstance], sheet_width: fsize, kerf: fsize, allow_rotation: bool) -> Layout {
    let config = PackConfig {
        sheet_width,
        kerf,
        allow_rotation,
    };
    match Packer::new(config) {
        Ok(packer) => packer.pack(pieces).layout,
        Err(err) => {
            warn!("[PACK] {err}, returning an empty layout");
            Layout::empty(sheet_width, kerf)
        }
    }
}

/// Order in which the pieces are placed: descending area, ties in input order.
pub fn placement_order(pieces: &[PieceInstance]) -> Vec<usize> {
    (0..pieces.len())
        .sorted_by_key(|&i| Reverse(OrderedFloat(pieces[i].area())))
        .collect_vec()
}

/// Length to grow the sheet by when `piece` fits nowhere.
/// Pieces entered with their sides swapped may only fit across the sheet in their taller orientation.
fn growth_length(piece: &PieceInstance, candidates: &[Orientation], sheet_width: fsize, kerf: fsize) -> fsize {
    candidates
        .iter()
        .filter(|o| o.width <= sheet_width)
        .map(|o| o.height)
        .max_by_key(|&h| OrderedFloat(h))
        .unwrap_or(piece.long_side + kerf)
}

fn has_valid_dimensions(piece: &PieceInstance) -> bool {
    [piece.long_side, piece.short_side]
        .iter()
        .all(|s| s.is_finite() && *s > 0.0)
}

fn unplaced_piece(piece: &PieceInstance, reason: UnplacedReason) -> UnplacedPiece {
    UnplacedPiece {
        spec_id: piece.spec_id,
        long_side: piece.long_side,
        short_side: piece.short_side,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ColorTag;

    fn piece(spec_id: usize, long_side: fsize, short_side: fsize) -> PieceInstance {
        PieceInstance {
            spec_id,
            long_side,
            short_side,
            color: ColorTag::BLACK,
        }
    }

    fn packer(sheet_width: fsize, kerf: fsize, allow_rotation: bool) -> Packer {
        Packer::new(PackConfig {
            sheet_width,
            kerf,
            allow_rotation,
        })
        .unwrap()
    }

    #[test]
    fn placement_order_is_stable() {
        let pieces = [
            piece(0, 10.0, 10.0),
            piece(1, 20.0, 10.0),
            piece(2, 10.0, 10.0),
            piece(3, 20.0, 10.0),
        ];
        assert_eq!(placement_order(&pieces), vec![1, 3, 0, 2]);
    }

    #[test]
    fn invalid_config() {
        let config = |sheet_width, kerf| PackConfig {
            sheet_width,
            kerf,
            allow_rotation: false,
        };
        assert_eq!(
            Packer::new(config(0.0, 0.0)).unwrap_err(),
            KidoriError::InvalidWidth(0.0)
        );
        assert_eq!(
            Packer::new(config(100.0, -0.5)).unwrap_err(),
            KidoriError::InvalidKerf(-0.5)
        );
        assert!(Packer::new(config(fsize::NAN, 0.0)).is_err());
    }

    #[test]
    fn empty_input() {
        let outcome = packer(1000.0, 0.0, true).pack(&[]);
        assert!(outcome.layout.is_empty());
        assert_eq!(outcome.layout.sheet_length, 0.0);
        assert!(outcome.is_complete());
    }

    #[test]
    fn side_by_side() {
        let outcome = packer(1000.0, 0.0, false).pack(&[piece(0, 500.0, 300.0), piece(0, 500.0, 300.0)]);
        let rects = outcome.layout.placed_pieces.iter().map(|pp| pp.rect()).collect_vec();
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 300.0, 500.0),
                Rect::new(300.0, 0.0, 300.0, 500.0)
            ]
        );
        assert_eq!(outcome.layout.sheet_length, 500.0);
    }

    #[test]
    fn wasted_growth_is_trimmed() {
        // the wide piece is handled first, grows the sheet by 2000 and still does not fit
        let outcome = packer(1000.0, 0.0, true).pack(&[piece(0, 500.0, 300.0), piece(1, 2000.0, 1500.0)]);
        assert_eq!(outcome.unplaced.len(), 1);
        assert_eq!(outcome.unplaced[0].spec_id, 1);
        assert_eq!(outcome.unplaced[0].reason, UnplacedReason::ExceedsWidth);
        assert_eq!(outcome.layout.placed_pieces[0].rect(), Rect::new(0.0, 0.0, 300.0, 500.0));
        assert_eq!(outcome.layout.sheet_length, 500.0);
    }

    #[test]
    fn swapped_sides_grow_by_the_fitting_orientation() {
        // short side wider than the sheet, only the rotated orientation fits across it
        let outcome = packer(1220.0, 0.0, true).pack(&[piece(0, 1000.0, 1300.0)]);
        assert!(outcome.is_complete());
        let pp = &outcome.layout.placed_pieces[0];
        assert_eq!(pp.rect(), Rect::new(0.0, 0.0, 1000.0, 1300.0));
        assert_eq!(outcome.layout.sheet_length, 1300.0);

        let outcome = packer(1220.0, 4.0, true).pack(&[piece(0, 300.0, 1800.0), piece(1, 1000.0, 1300.0)]);
        assert!(outcome.is_complete());
        assert!(assertions::packed_layout_is_valid(&outcome.layout));
    }

    #[test]
    fn growth_length_prefers_fitting_orientations() {
        let p = piece(0, 1000.0, 1300.0);
        let rotating = Orientation::candidates(&p, 2.0, true);
        assert_eq!(growth_length(&p, &rotating, 1220.0, 2.0), 1302.0);
        let fixed = Orientation::candidates(&p, 2.0, false);
        assert_eq!(growth_length(&p, &fixed, 1220.0, 2.0), 1002.0);

        let regular = piece(0, 600.0, 400.0);
        let rotating = Orientation::candidates(&regular, 0.0, true);
        assert_eq!(growth_length(&regular, &rotating, 1220.0, 0.0), 600.0);
    }

    #[test]
    fn invalid_pieces_are_reported() {
        let outcome = packer(1000.0, 0.0, false).pack(&[piece(3, 0.0, 10.0), piece(4, 10.0, 10.0)]);
        assert_eq!(outcome.layout.placed_pieces.len(), 1);
        assert_eq!(outcome.unplaced.len(), 1);
        assert_eq!(outcome.unplaced[0].spec_id, 3);
        assert_eq!(outcome.unplaced[0].reason, UnplacedReason::InvalidDimensions);
    }

    #[test]
    fn free_function_tolerates_invalid_width() {
        let layout = pack(&[piece(0, 10.0, 10.0)], -5.0, 0.0, false);
        assert!(layout.is_empty());
        assert_eq!(layout.sheet_length, 0.0);
    }
}
