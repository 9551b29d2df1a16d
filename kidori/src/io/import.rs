use std::collections::HashSet;

use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::entities::{ColorLegend, CutList, Layout, PieceSpec, PlacedPiece};
use crate::geometry::primitives::Rect;
use crate::io::ext_repr::{ExtCutList, ExtLayout, ExtPlacedPiece};
use crate::packing::PackConfig;

/// Imports a cut list into the library.
///
/// Pieces without an id receive a fresh one, pieces without a color receive the color of their size.
pub fn import_cut_list(ext_cut_list: &ExtCutList) -> Result<CutList> {
    let ExtCutList {
        sheet_width,
        kerf,
        allow_rotation,
        ..
    } = *ext_cut_list;
    PackConfig {
        sheet_width,
        kerf,
        allow_rotation,
    }
    .validate()?;

    let explicit_ids = ext_cut_list.pieces.iter().filter_map(|p| p.id).collect_vec();
    ensure!(
        explicit_ids.iter().all_unique(),
        "piece ids should be unique. IDs: {:?}",
        explicit_ids.iter().sorted().collect_vec()
    );

    // explicit colors take precedence over generated ones
    let mut legend = ColorLegend::new();
    for p in ext_cut_list.pieces.iter() {
        if let Some(color) = p.color {
            legend.register(p.long_side, p.short_side, color);
        }
    }

    let mut fresh_ids = (0..).filter(|id| !explicit_ids.contains(id));
    let pieces = ext_cut_list
        .pieces
        .iter()
        .map(|p| {
            let id = match p.id {
                Some(id) => id,
                None => fresh_ids.next().context("ran out of piece ids")?,
            };
            let color = p
                .color
                .unwrap_or_else(|| legend.color_for(p.long_side, p.short_side));
            PieceSpec::new(id, p.long_side, p.short_side, p.quantity, color)
                .with_context(|| format!("invalid piece {id}"))
        })
        .collect::<Result<Vec<PieceSpec>>>()?;

    let cut_list = CutList::from_pieces(sheet_width, kerf, allow_rotation, pieces)?;
    debug!(
        "[IO] imported cut list with {} pieces ({} units)",
        cut_list.pieces().len(),
        cut_list.n_instances()
    );
    Ok(cut_list)
}

/// Imports a layout into the library, reproducing the exported placement exactly.
/// Fails if the layout is not feasible: a piece outside the sheet or two pieces overlapping.
pub fn import_layout(ext_layout: &ExtLayout) -> Result<Layout> {
    ensure!(
        ext_layout.sheet_width.is_finite() && ext_layout.sheet_width > 0.0,
        "sheet width should be positive, got {}",
        ext_layout.sheet_width
    );
    ensure!(
        ext_layout.sheet_length.is_finite() && ext_layout.sheet_length >= 0.0,
        "sheet length should be non-negative, got {}",
        ext_layout.sheet_length
    );
    ensure!(
        ext_layout.kerf.is_finite() && ext_layout.kerf >= 0.0,
        "kerf should be non-negative, got {}",
        ext_layout.kerf
    );

    let placed_pieces = ext_layout
        .placed_pieces
        .par_iter()
        .map(import_placed_piece)
        .collect::<Result<Vec<PlacedPiece>>>()?;

    let ids = placed_pieces.iter().map(|pp| pp.id).collect::<HashSet<_>>();
    ensure!(
        ids.len() == placed_pieces.len(),
        "placed piece ids should be unique. IDs: {:?}",
        placed_pieces.iter().map(|pp| pp.id).sorted().collect_vec()
    );

    let layout = Layout {
        sheet_width: ext_layout.sheet_width,
        sheet_length: ext_layout.sheet_length,
        kerf: ext_layout.kerf,
        placed_pieces,
    };
    ensure!(
        layout.is_feasible(),
        "layout contains pieces outside the sheet or overlapping pieces"
    );
    debug!("[IO] imported layout with {} placed pieces", layout.placed_pieces.len());
    Ok(layout)
}

fn import_placed_piece(ext_pp: &ExtPlacedPiece) -> Result<PlacedPiece> {
    let rect = Rect::try_new(ext_pp.x, ext_pp.y, ext_pp.width, ext_pp.height)
        .with_context(|| format!("invalid placed piece {}", ext_pp.id))?;
    Ok(PlacedPiece {
        id: ext_pp.id,
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        color: ext_pp.color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ColorTag;
    use crate::io::ext_repr::ExtPiece;

    fn ext_piece(id: Option<usize>, long_side: f64, short_side: f64, color: Option<ColorTag>) -> ExtPiece {
        ExtPiece {
            id,
            long_side,
            short_side,
            quantity: 1,
            color,
        }
    }

    fn ext_placed(id: usize, x: f64, y: f64, width: f64, height: f64) -> ExtPlacedPiece {
        ExtPlacedPiece {
            id,
            x,
            y,
            width,
            height,
            color: ColorTag::BLACK,
        }
    }

    #[test]
    fn missing_ids_and_colors_are_assigned() {
        let red = ColorTag(0xFF, 0x00, 0x00);
        let ext = ExtCutList {
            sheet_width: 1220.0,
            kerf: 0.0,
            allow_rotation: false,
            pieces: vec![
                ext_piece(None, 600.0, 400.0, None),
                ext_piece(Some(0), 500.0, 300.0, Some(red)),
                ext_piece(None, 500.0, 300.0, None),
            ],
        };
        let cut_list = import_cut_list(&ext).unwrap();
        let ids = cut_list.pieces().iter().map(|p| p.id).collect_vec();
        assert_eq!(ids, vec![1, 0, 2]);
        assert_eq!(cut_list.piece(2).unwrap().color, red);
        assert_ne!(cut_list.piece(1).unwrap().color, red);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ext = ExtCutList {
            sheet_width: 1220.0,
            kerf: 0.0,
            allow_rotation: false,
            pieces: vec![
                ext_piece(Some(3), 600.0, 400.0, None),
                ext_piece(Some(3), 500.0, 300.0, None),
            ],
        };
        assert!(import_cut_list(&ext).is_err());
    }

    #[test]
    fn too_wide_piece_is_rejected() {
        let ext = ExtCutList {
            sheet_width: 1000.0,
            kerf: 0.0,
            allow_rotation: false,
            pieces: vec![ext_piece(None, 2000.0, 1500.0, None)],
        };
        assert!(import_cut_list(&ext).is_err());
    }

    #[test]
    fn infeasible_layout_is_rejected() {
        let ext = ExtLayout {
            sheet_width: 1000.0,
            sheet_length: 500.0,
            kerf: 0.0,
            placed_pieces: vec![
                ext_placed(0, 0.0, 0.0, 300.0, 500.0),
                ext_placed(1, 200.0, 0.0, 300.0, 500.0),
            ],
            density: 0.0,
        };
        assert!(import_layout(&ext).is_err());

        let outside = ExtLayout {
            placed_pieces: vec![ext_placed(0, 800.0, 0.0, 300.0, 500.0)],
            ..ext
        };
        assert!(import_layout(&outside).is_err());
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let ext = ExtLayout {
            sheet_width: 1000.0,
            sheet_length: 500.0,
            kerf: 0.0,
            placed_pieces: vec![ext_placed(0, 0.0, 0.0, -300.0, 500.0)],
            density: 0.0,
        };
        assert!(import_layout(&ext).is_err());
    }
}
