use crate::entities::PieceInstance;
use crate::fsize;
use crate::geometry::primitives::Rect;

/// A way of laying a piece onto the sheet, with its dimensions inflated by the kerf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub width: fsize,
    pub height: fsize,
    /// `false`: short side across the sheet width, `true`: long side across the sheet width
    pub rotated: bool,
}

impl Orientation {
    /// Candidate orientations of `piece`, the unrotated one always first.
    pub fn candidates(piece: &PieceInstance, kerf: fsize, allow_rotation: bool) -> Vec<Orientation> {
        let unrotated = Orientation {
            width: piece.short_side + kerf,
            height: piece.long_side + kerf,
            rotated: false,
        };
        match allow_rotation {
            false => vec![unrotated],
            true => vec![
                unrotated,
                Orientation {
                    width: piece.long_side + kerf,
                    height: piece.short_side + kerf,
                    rotated: true,
                },
            ],
        }
    }

    pub fn area(&self) -> fsize {
        self.width * self.height
    }

    /// True if the orientation fits within `rect` (equal dimensions fit)
    pub fn fits_in(&self, rect: &Rect) -> bool {
        self.width <= rect.width && self.height <= rect.height
    }

    /// The rectangle covered when placed with its top-left corner at `(x, y)`
    pub fn placed_at(&self, x: fsize, y: fsize) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ColorTag;

    fn piece(long_side: fsize, short_side: fsize) -> PieceInstance {
        PieceInstance {
            spec_id: 0,
            long_side,
            short_side,
            color: ColorTag::BLACK,
        }
    }

    #[test]
    fn unrotated_candidate_puts_short_side_across() {
        let candidates = Orientation::candidates(&piece(600.0, 400.0), 0.0, false);
        assert_eq!(candidates.len(), 1);
        assert_eq!((candidates[0].width, candidates[0].height), (400.0, 600.0));
        assert!(!candidates[0].rotated);
    }

    #[test]
    fn kerf_inflates_both_dimensions() {
        let candidates = Orientation::candidates(&piece(600.0, 400.0), 3.0, true);
        assert_eq!(candidates.len(), 2);
        assert_eq!((candidates[0].width, candidates[0].height), (403.0, 603.0));
        assert_eq!((candidates[1].width, candidates[1].height), (603.0, 403.0));
        assert!(candidates[1].rotated);
    }
}
