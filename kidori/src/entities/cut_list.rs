use std::cmp::Reverse;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::KidoriError;
use crate::entities::{ColorLegend, PieceInstance, PieceSpec};
use crate::fsize;
use crate::packing::PackConfig;

/// The pieces to cut together with the sheet they are cut from.
///
/// A `CutList` is an immutable value: every edit returns a new `CutList` and leaves `self` untouched.
/// Any edit invalidates layouts computed from the previous version, they have to be packed again from scratch.
#[derive(Clone, Debug)]
pub struct CutList {
    pub sheet_width: fsize,
    pub kerf: fsize,
    pub allow_rotation: bool,
    pieces: Vec<PieceSpec>,
    legend: ColorLegend,
    next_id: usize,
}

impl CutList {
    pub fn new(sheet_width: fsize, kerf: fsize, allow_rotation: bool) -> Result<Self, KidoriError> {
        PackConfig {
            sheet_width,
            kerf,
            allow_rotation,
        }
        .validate()?;
        Ok(CutList {
            sheet_width,
            kerf,
            allow_rotation,
            pieces: vec![],
            legend: ColorLegend::new(),
            next_id: 0,
        })
    }

    /// Builds a cut list from already identified and colored pieces, e.g. when reloading a saved diagram.
    pub fn from_pieces(
        sheet_width: fsize,
        kerf: fsize,
        allow_rotation: bool,
        pieces: Vec<PieceSpec>,
    ) -> Result<Self, KidoriError> {
        let mut cut_list = CutList::new(sheet_width, kerf, allow_rotation)?;
        for piece in pieces.iter() {
            cut_list.check_fits(piece)?;
            cut_list.legend.register(piece.long_side, piece.short_side, piece.color);
        }
        cut_list.next_id = pieces.iter().map(|p| p.id + 1).max().unwrap_or(0);
        cut_list.pieces = pieces;
        Ok(cut_list)
    }

    pub fn pieces(&self) -> &[PieceSpec] {
        &self.pieces
    }

    pub fn piece(&self, id: usize) -> Option<&PieceSpec> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Total number of units to cut
    pub fn n_instances(&self) -> usize {
        self.pieces.iter().map(|p| p.quantity).sum()
    }

    /// The packer configuration matching this cut list.
    pub fn pack_config(&self) -> PackConfig {
        PackConfig {
            sheet_width: self.sheet_width,
            kerf: self.kerf,
            allow_rotation: self.allow_rotation,
        }
    }

    /// Flattens the cut list into one [`PieceInstance`] per unit, in list order.
    pub fn expand(&self) -> Vec<PieceInstance> {
        self.pieces.iter().flat_map(|p| p.expand()).collect_vec()
    }

    /// The pieces ordered by the area of all their units together, largest first.
    pub fn by_total_area(&self) -> Vec<&PieceSpec> {
        self.pieces
            .iter()
            .sorted_by_key(|p| Reverse(OrderedFloat(p.total_area())))
            .collect_vec()
    }

    /// Adds a new piece. Equally sized pieces share a color.
    pub fn with_piece(&self, long_side: fsize, short_side: fsize, quantity: usize) -> Result<Self, KidoriError> {
        let mut next = self.clone();
        let color = next.legend.color_for(long_side, short_side);
        let piece = PieceSpec::new(next.next_id, long_side, short_side, quantity, color)?;
        next.check_fits(&piece)?;
        next.next_id += 1;
        next.pieces.push(piece);
        Ok(next)
    }

    pub fn without_piece(&self, id: usize) -> Result<Self, KidoriError> {
        let index = self.index_of(id)?;
        let mut next = self.clone();
        next.pieces.remove(index);
        Ok(next)
    }

    /// Changes the dimensions of a piece, which takes the color of its new size.
    pub fn with_dimensions(&self, id: usize, long_side: fsize, short_side: fsize) -> Result<Self, KidoriError> {
        let index = self.index_of(id)?;
        let mut next = self.clone();
        let color = next.legend.color_for(long_side, short_side);
        let piece = PieceSpec::new(id, long_side, short_side, next.pieces[index].quantity, color)?;
        next.check_fits(&piece)?;
        next.pieces[index] = piece;
        Ok(next)
    }

    pub fn with_quantity(&self, id: usize, quantity: usize) -> Result<Self, KidoriError> {
        let index = self.index_of(id)?;
        let old = &self.pieces[index];
        let piece = PieceSpec::new(id, old.long_side, old.short_side, quantity, old.color)?;
        let mut next = self.clone();
        next.pieces[index] = piece;
        Ok(next)
    }

    /// Swaps the long and short side of a piece, keeping its color.
    pub fn with_swapped_sides(&self, id: usize) -> Result<Self, KidoriError> {
        let index = self.index_of(id)?;
        let old = &self.pieces[index];
        let piece = PieceSpec::new(id, old.short_side, old.long_side, old.quantity, old.color)?;
        self.check_fits(&piece)?;
        let mut next = self.clone();
        next.pieces[index] = piece;
        Ok(next)
    }

    pub fn with_rotation(&self, allow_rotation: bool) -> Result<Self, KidoriError> {
        let mut next = self.clone();
        next.allow_rotation = allow_rotation;
        next.check_all_fit()?;
        Ok(next)
    }

    pub fn with_kerf(&self, kerf: fsize) -> Result<Self, KidoriError> {
        let mut next = self.clone();
        next.kerf = kerf;
        next.pack_config().validate()?;
        next.check_all_fit()?;
        Ok(next)
    }

    fn index_of(&self, id: usize) -> Result<usize, KidoriError> {
        self.pieces
            .iter()
            .position(|p| p.id == id)
            .ok_or(KidoriError::UnknownPiece(id))
    }

    fn check_fits(&self, piece: &PieceSpec) -> Result<(), KidoriError> {
        let usable_width = piece.usable_width(self.kerf, self.allow_rotation);
        match usable_width > self.sheet_width {
            true => Err(KidoriError::PieceExceedsWidth {
                usable_width,
                sheet_width: self.sheet_width,
            }),
            false => Ok(()),
        }
    }

    fn check_all_fit(&self) -> Result<(), KidoriError> {
        self.pieces.iter().try_for_each(|p| self.check_fits(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::Packer;

    fn cut_list() -> CutList {
        CutList::new(1220.0, 0.0, false)
            .unwrap()
            .with_piece(600.0, 400.0, 2)
            .unwrap()
            .with_piece(1800.0, 300.0, 1)
            .unwrap()
    }

    #[test]
    fn rejects_invalid_sheet() {
        assert_eq!(
            CutList::new(0.0, 0.0, false).unwrap_err(),
            KidoriError::InvalidWidth(0.0)
        );
        assert_eq!(
            CutList::new(100.0, -1.0, false).unwrap_err(),
            KidoriError::InvalidKerf(-1.0)
        );
    }

    #[test]
    fn edits_produce_new_values() {
        let original = cut_list();
        let edited = original.with_quantity(0, 5).unwrap();
        assert_eq!(original.piece(0).unwrap().quantity, 2);
        assert_eq!(edited.piece(0).unwrap().quantity, 5);
        assert_eq!(edited.n_instances(), 6);

        let removed = edited.without_piece(0).unwrap();
        assert!(removed.piece(0).is_none());
        assert_eq!(removed.n_instances(), 1);
        assert_eq!(edited.without_piece(42).unwrap_err(), KidoriError::UnknownPiece(42));
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let cl = cut_list().without_piece(1).unwrap().with_piece(100.0, 100.0, 1).unwrap();
        let ids = cl.pieces().iter().map(|p| p.id).collect_vec();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn rejects_pieces_wider_than_sheet() {
        let err = cut_list().with_piece(2000.0, 1300.0, 1).unwrap_err();
        assert!(matches!(err, KidoriError::PieceExceedsWidth { .. }));
        // swapping would put the 1800 side across the 1220 sheet
        assert!(cut_list().with_swapped_sides(1).is_err());
        assert!(cut_list().with_swapped_sides(0).is_ok());
    }

    #[test]
    fn rotation_widens_the_acceptance() {
        let rotating = CutList::new(1220.0, 0.0, true).unwrap();
        let cl = rotating.with_piece(1000.0, 1300.0, 1).unwrap();
        assert!(cl.with_rotation(false).is_err());
        assert!(cl.with_kerf(300.0).is_err());

        // every accepted piece is placeable, also with swapped sides
        let cl = cl.with_piece(1800.0, 300.0, 1).and_then(|cl| cl.with_swapped_sides(1)).unwrap();
        let outcome = Packer::new(cl.pack_config()).unwrap().pack(&cl.expand());
        assert!(outcome.is_complete());
    }

    #[test]
    fn colors_follow_sizes() {
        let cl = cut_list().with_piece(600.0, 400.0, 1).unwrap();
        assert_eq!(cl.pieces()[0].color, cl.pieces()[2].color);
        assert_ne!(cl.pieces()[0].color, cl.pieces()[1].color);

        let swapped = cl.with_swapped_sides(0).unwrap();
        assert_eq!(swapped.piece(0).unwrap().color, cl.piece(0).unwrap().color);
    }

    #[test]
    fn expand_and_order() {
        let cl = cut_list();
        let instances = cl.expand();
        assert_eq!(instances.len(), 3);
        assert_eq!(instances.iter().map(|pi| pi.spec_id).collect_vec(), vec![0, 0, 1]);
        let by_area = cl.by_total_area().iter().map(|p| p.id).collect_vec();
        assert_eq!(by_area, vec![1, 0]);
    }
}
