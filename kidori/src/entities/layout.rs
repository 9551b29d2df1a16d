use crate::KidoriError;
use crate::entities::PlacedPiece;
use crate::fsize;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Rect;
use crate::util::assertions;
use crate::validation::{self, MoveOutcome};
use log::debug;

/// The result of a packing run: the sheet and the pieces placed on it, in placement order.
///
/// A layout is self-describing: exporting and re-importing it reproduces the identical placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub sheet_width: fsize,
    /// Length of sheet consumed. Right after packing it equals the lowest bottom edge of any placed piece.
    pub sheet_length: fsize,
    pub kerf: fsize,
    pub placed_pieces: Vec<PlacedPiece>,
}

impl Layout {
    /// A layout without any pieces, consuming no sheet length.
    pub fn empty(sheet_width: fsize, kerf: fsize) -> Self {
        Layout {
            sheet_width,
            sheet_length: 0.0,
            kerf,
            placed_pieces: vec![],
        }
    }

    pub fn sheet_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.sheet_width.max(0.0), self.sheet_length.max(0.0))
    }

    /// True if no pieces are placed
    pub fn is_empty(&self) -> bool {
        self.placed_pieces.is_empty()
    }

    pub fn placed_piece(&self, id: usize) -> Option<&PlacedPiece> {
        self.placed_pieces.iter().find(|pp| pp.id == id)
    }

    /// The lowest bottom edge of any placed piece, 0 if nothing is placed.
    pub fn occupied_length(&self) -> fsize {
        self.placed_pieces
            .iter()
            .map(|pp| pp.rect().bottom())
            .fold(0.0, fsize::max)
    }

    /// The sum of the (kerf inflated) areas of the placed pieces.
    pub fn placed_area(&self) -> fsize {
        self.placed_pieces.iter().map(|pp| pp.rect().area()).sum()
    }

    /// The ratio of the area of the placed pieces to the area of the consumed sheet.
    pub fn density(&self) -> fsize {
        match self.sheet_rect().area() {
            a if a > 0.0 => self.placed_area() / a,
            _ => 0.0,
        }
    }

    /// Returns true if all pieces lie within the sheet without overlapping each other
    pub fn is_feasible(&self) -> bool {
        assertions::placements_within_sheet(self)
            && assertions::placements_disjoint(&self.placed_pieces)
    }

    /// Tries to move placed piece `id` so its top-left corner lands on `(x, y)`.
    ///
    /// The position is clamped into the sheet and rejected if it overlaps any other piece, see [`validation::validate`].
    /// Returns the new layout (identical to `self` on rejection) and the outcome.
    /// The sheet length is never changed by a move.
    pub fn with_moved_piece(
        &self,
        id: usize,
        x: fsize,
        y: fsize,
    ) -> Result<(Layout, MoveOutcome), KidoriError> {
        let index = self
            .placed_pieces
            .iter()
            .position(|pp| pp.id == id)
            .ok_or(KidoriError::UnknownPlacement(id))?;
        let piece = &self.placed_pieces[index];

        let outcome = validation::validate(
            piece,
            x,
            y,
            self.sheet_width,
            self.sheet_length,
            &self.placed_pieces,
        );

        let mut layout = self.clone();
        if let MoveOutcome::Accepted { x, y } = outcome {
            layout.placed_pieces[index] = piece.moved_to(x, y);
            debug!("[MOVE] placed piece {id} moved to ({x:.3}, {y:.3})");
        } else {
            debug!("[MOVE] move of placed piece {id} to ({x:.3}, {y:.3}) rejected");
        }
        debug_assert!(layout.is_feasible() || !self.is_feasible());

        Ok((layout, outcome))
    }
}
