use crate::entities::ColorTag;
use crate::fsize;
use crate::geometry::primitives::Rect;

/// A piece as it was placed on the sheet.
/// `width` and `height` are the as-placed dimensions: kerf included and rotation applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedPiece {
    /// Unique identifier of the placement within its [`Layout`](crate::entities::Layout)
    pub id: usize,
    pub x: fsize,
    pub y: fsize,
    pub width: fsize,
    pub height: fsize,
    pub color: ColorTag,
}

impl PlacedPiece {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// A copy of the placement with its top-left corner at `(x, y)`.
    pub fn moved_to(&self, x: fsize, y: fsize) -> PlacedPiece {
        PlacedPiece { x, y, ..*self }
    }
}
