//! Validation of manual moves of already placed pieces.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::entities::PlacedPiece;
use crate::fsize;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Rect;

/// Verdict on a proposed manual move, carrying the position the piece ends up at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The (clamped) position is free, the piece moves there
    Accepted { x: fsize, y: fsize },
    /// The clamped position overlaps another piece, the piece stays at its prior position
    Rejected { x: fsize, y: fsize },
}

impl MoveOutcome {
    pub fn position(&self) -> (fsize, fsize) {
        match *self {
            MoveOutcome::Accepted { x, y } | MoveOutcome::Rejected { x, y } => (x, y),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// Validates moving `piece` so its top-left corner lands on `(proposed_x, proposed_y)`.
///
/// The proposed position is first clamped into the sheet: x into `[0, sheet_width - piece.width]`,
/// y into `[0, sheet_length - piece.height]`.
/// The clamped rectangle is then tested for (strictly positive area) overlap with every other piece in `all_placed`.
/// `piece` itself is recognized by its id and may be present in `all_placed`.
pub fn validate(
    piece: &PlacedPiece,
    proposed_x: fsize,
    proposed_y: fsize,
    sheet_width: fsize,
    sheet_length: fsize,
    all_placed: &[PlacedPiece],
) -> MoveOutcome {
    let x = clamp(proposed_x, sheet_width - piece.width);
    let y = clamp(proposed_y, sheet_length - piece.height);
    let candidate = Rect::new(x, y, piece.width, piece.height);

    let collision = all_placed
        .iter()
        .filter(|other| other.id != piece.id)
        .find(|other| candidate.collides_with(&other.rect()));

    match collision {
        None => MoveOutcome::Accepted { x, y },
        Some(other) => {
            trace!(
                "[MOVE] piece {} at ({x:.3}, {y:.3}) would overlap piece {}",
                piece.id, other.id
            );
            MoveOutcome::Rejected {
                x: piece.x,
                y: piece.y,
            }
        }
    }
}

/// Clamps `value` into `[0, upper]`. An `upper` below 0 (piece larger than the sheet) clamps to 0.
fn clamp(value: fsize, upper: fsize) -> fsize {
    match value.is_nan() {
        true => 0.0,
        false => value.min(upper).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ColorTag;

    fn piece(id: usize, x: fsize, y: fsize, width: fsize, height: fsize) -> PlacedPiece {
        PlacedPiece {
            id,
            x,
            y,
            width,
            height,
            color: ColorTag::BLACK,
        }
    }

    fn placed() -> Vec<PlacedPiece> {
        vec![
            piece(0, 0.0, 0.0, 300.0, 500.0),
            piece(1, 300.0, 0.0, 300.0, 500.0),
        ]
    }

    #[test]
    fn free_position_is_accepted() {
        let all = placed();
        let outcome = validate(&all[1], 650.0, 0.0, 1000.0, 500.0, &all);
        assert_eq!(outcome, MoveOutcome::Accepted { x: 650.0, y: 0.0 });
    }

    #[test]
    fn out_of_bounds_is_clamped() {
        let all = placed();
        let outcome = validate(&all[1], 5000.0, -20.0, 1000.0, 500.0, &all);
        assert_eq!(outcome, MoveOutcome::Accepted { x: 700.0, y: 0.0 });
    }

    #[test]
    fn overlap_is_rejected() {
        let all = placed();
        let outcome = validate(&all[1], 299.0, 0.0, 1000.0, 500.0, &all);
        assert_eq!(outcome, MoveOutcome::Rejected { x: 300.0, y: 0.0 });
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn touching_edges_are_accepted() {
        let all = placed();
        // piece 1 back against the right edge of piece 0
        let moved = piece(1, 600.0, 0.0, 300.0, 500.0);
        let outcome = validate(&moved, 300.0, 0.0, 1000.0, 500.0, &[all[0], moved]);
        assert_eq!(outcome, MoveOutcome::Accepted { x: 300.0, y: 0.0 });
    }

    #[test]
    fn moving_onto_itself_is_accepted() {
        let all = placed();
        let outcome = validate(&all[0], 0.0, 0.0, 1000.0, 500.0, &all);
        assert_eq!(outcome, MoveOutcome::Accepted { x: 0.0, y: 0.0 });
    }

    #[test]
    fn nan_proposal_clamps_to_origin() {
        let pp = piece(0, 100.0, 100.0, 50.0, 50.0);
        let outcome = validate(&pp, fsize::NAN, 10.0, 1000.0, 500.0, &[pp]);
        assert_eq!(outcome.position(), (0.0, 10.0));
    }
}
