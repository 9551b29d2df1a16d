use thiserror::Error;

use crate::fsize;

/// Structural errors of the engine. Pieces that cannot be placed during a packing run are not errors,
/// they are reported as [`UnplacedPiece`](crate::packing::UnplacedPiece)s.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KidoriError {
    #[error("sheet width must be positive, got {0}")]
    InvalidWidth(fsize),

    #[error("kerf must be non-negative and finite, got {0}")]
    InvalidKerf(fsize),

    #[error("invalid piece: long side {long_side}, short side {short_side}, quantity {quantity}")]
    InvalidPiece {
        long_side: fsize,
        short_side: fsize,
        quantity: usize,
    },

    #[error("piece needs a width of {usable_width} but the sheet is only {sheet_width} wide")]
    PieceExceedsWidth {
        usable_width: fsize,
        sheet_width: fsize,
    },

    #[error("no piece with id {0} in the cut list")]
    UnknownPiece(usize),

    #[error("no placed piece with id {0} in the layout")]
    UnknownPlacement(usize),

    #[error("no layout has been computed yet")]
    NoLayout,
}
