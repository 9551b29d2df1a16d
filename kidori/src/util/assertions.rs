use crate::entities::{Layout, PlacedPiece};
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Rect;
use crate::packing::FreeRect;
use crate::util::FPA;
use itertools::Itertools;
use log::error;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// Every placed piece lies within `[0, sheet_width] x [0, sheet_length]`.
pub fn placements_within_sheet(layout: &Layout) -> bool {
    let sheet = layout.sheet_rect();
    layout.placed_pieces.iter().all(|pp| {
        let inside = FPA(pp.x) >= FPA(sheet.left())
            && FPA(pp.y) >= FPA(sheet.top())
            && FPA(pp.rect().right()) <= FPA(sheet.right())
            && FPA(pp.rect().bottom()) <= FPA(sheet.bottom());
        if !inside {
            error!("placed piece {} at {:?} exceeds the sheet {:?}", pp.id, pp.rect(), sheet);
        }
        inside
    })
}

/// No two placed pieces overlap with a positive area.
pub fn placements_disjoint(placed_pieces: &[PlacedPiece]) -> bool {
    placed_pieces.iter().tuple_combinations().all(|(a, b)| {
        let collides = a.rect().collides_with(&b.rect());
        if collides {
            error!(
                "placed pieces {} {:?} and {} {:?} overlap",
                a.id,
                a.rect(),
                b.id,
                b.rect()
            );
        }
        !collides
    })
}

/// The sheet length equals the bottom edge of the lowest placed piece, or 0 if nothing is placed.
pub fn sheet_length_is_tight(layout: &Layout) -> bool {
    let tight = FPA(layout.sheet_length) == FPA(layout.occupied_length());
    if !tight {
        error!(
            "sheet length {} does not match the occupied length {}",
            layout.sheet_length,
            layout.occupied_length()
        );
    }
    tight
}

/// Unallocated space never covers a placed piece.
pub fn free_space_disjoint_from_placements(free_rects: &[FreeRect], placed_pieces: &[PlacedPiece]) -> bool {
    free_rects
        .iter()
        .map(|fr| fr.as_rect())
        .cartesian_product(placed_pieces.iter())
        .all(|(fr, pp): (Rect, &PlacedPiece)| {
            let collides = fr.collides_with(&pp.rect());
            if collides {
                error!("free rectangle {:?} overlaps placed piece {} {:?}", fr, pp.id, pp.rect());
            }
            !collides
        })
}

/// A freshly packed layout is contained, disjoint and tight.
pub fn packed_layout_is_valid(layout: &Layout) -> bool {
    placements_within_sheet(layout)
        && placements_disjoint(&layout.placed_pieces)
        && sheet_length_is_tight(layout)
}
