use crate::KidoriError;
use crate::entities::ColorTag;
use crate::fsize;

/// A rectangular piece to be cut from the sheet, as entered by the user.
/// Expanded into `quantity` independent [`PieceInstance`]s before packing.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceSpec {
    /// Stable identifier of the piece within its cut list
    pub id: usize,
    pub long_side: fsize,
    pub short_side: fsize,
    pub quantity: usize,
    pub color: ColorTag,
}

impl PieceSpec {
    pub fn new(
        id: usize,
        long_side: fsize,
        short_side: fsize,
        quantity: usize,
        color: ColorTag,
    ) -> Result<Self, KidoriError> {
        let valid_side = |s: fsize| s.is_finite() && s > 0.0;
        if !valid_side(long_side) || !valid_side(short_side) || quantity == 0 {
            return Err(KidoriError::InvalidPiece {
                long_side,
                short_side,
                quantity,
            });
        }
        Ok(PieceSpec {
            id,
            long_side,
            short_side,
            quantity,
            color,
        })
    }

    /// Area of a single unit
    pub fn area(&self) -> fsize {
        self.long_side * self.short_side
    }

    /// Area of all units together
    pub fn total_area(&self) -> fsize {
        self.area() * self.quantity as fsize
    }

    /// The narrowest width a unit of this piece can occupy on the sheet.
    pub fn usable_width(&self, kerf: fsize, allow_rotation: bool) -> fsize {
        match allow_rotation {
            true => fsize::min(self.long_side, self.short_side) + kerf,
            false => self.short_side + kerf,
        }
    }

    /// One [`PieceInstance`] per unit of quantity.
    pub fn expand(&self) -> impl Iterator<Item = PieceInstance> + '_ {
        (0..self.quantity).map(|_| PieceInstance {
            spec_id: self.id,
            long_side: self.long_side,
            short_side: self.short_side,
            color: self.color,
        })
    }
}

/// A single unit of a [`PieceSpec`], the input of the packer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceInstance {
    /// Id of the [`PieceSpec`] this unit was expanded from
    pub spec_id: usize,
    pub long_side: fsize,
    pub short_side: fsize,
    pub color: ColorTag,
}

impl PieceInstance {
    pub fn area(&self) -> fsize {
        self.long_side * self.short_side
    }
}
