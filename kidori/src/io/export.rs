use itertools::Itertools;

use crate::entities::{CutList, Layout};
use crate::io::ext_repr::{ExtCutList, ExtDiagram, ExtLayout, ExtPiece, ExtPlacedPiece, ExtUnplacedPiece};
use crate::packing::PackOutcome;

/// Exports a cut list out of the library, ids and colors included.
pub fn export_cut_list(cut_list: &CutList) -> ExtCutList {
    ExtCutList {
        sheet_width: cut_list.sheet_width,
        kerf: cut_list.kerf,
        allow_rotation: cut_list.allow_rotation,
        pieces: cut_list
            .pieces()
            .iter()
            .map(|p| ExtPiece {
                id: Some(p.id),
                long_side: p.long_side,
                short_side: p.short_side,
                quantity: p.quantity,
                color: Some(p.color),
            })
            .collect_vec(),
    }
}

/// Exports a layout out of the library
pub fn export_layout(layout: &Layout) -> ExtLayout {
    ExtLayout {
        sheet_width: layout.sheet_width,
        sheet_length: layout.sheet_length,
        kerf: layout.kerf,
        placed_pieces: layout
            .placed_pieces
            .iter()
            .map(|pp| ExtPlacedPiece {
                id: pp.id,
                x: pp.x,
                y: pp.y,
                width: pp.width,
                height: pp.height,
                color: pp.color,
            })
            .collect_vec(),
        density: layout.density(),
    }
}

/// Exports the outcome of a packing run as a named diagram
pub fn export_outcome(name: &str, cut_list: &CutList, outcome: &PackOutcome) -> ExtDiagram {
    ExtDiagram {
        name: name.to_string(),
        cut_list: export_cut_list(cut_list),
        layouts: vec![export_layout(&outcome.layout)],
        unplaced: outcome
            .unplaced
            .iter()
            .map(|up| ExtUnplacedPiece {
                spec_id: up.spec_id,
                long_side: up.long_side,
                short_side: up.short_side,
                reason: up.reason,
            })
            .collect_vec(),
    }
}
