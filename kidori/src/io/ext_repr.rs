use serde::{Deserialize, Serialize};

use crate::entities::ColorTag;
use crate::fsize;
use crate::packing::UnplacedReason;

/// External representation of a [`CutList`](crate::entities::CutList).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtCutList {
    /// Fixed width of the sheet
    pub sheet_width: fsize,
    /// Margin added to both dimensions of every piece. 0 if not specified.
    #[serde(default)]
    pub kerf: fsize,
    /// Whether pieces may be rotated by 90 degrees. Disabled if not specified.
    #[serde(default)]
    pub allow_rotation: bool,
    pub pieces: Vec<ExtPiece>,
}

/// External representation of a [`PieceSpec`](crate::entities::PieceSpec).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPiece {
    /// Identifier of the piece. Assigned on import if not specified.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<usize>,
    pub long_side: fsize,
    pub short_side: fsize,
    /// Number of units to cut. 1 if not specified.
    #[serde(default = "default_quantity")]
    pub quantity: usize,
    /// Color of the piece in the diagram. Assigned per size on import if not specified.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<ColorTag>,
}

fn default_quantity() -> usize {
    1
}

/// External representation of a [`Layout`](crate::entities::Layout).
/// Contains everything needed to reproduce the placement exactly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLayout {
    pub sheet_width: fsize,
    pub sheet_length: fsize,
    #[serde(default)]
    pub kerf: fsize,
    /// The pieces in placement order
    pub placed_pieces: Vec<ExtPlacedPiece>,
    /// Some statistics about the layout, ignored on import
    #[serde(default)]
    pub density: fsize,
}

/// External representation of a [`PlacedPiece`](crate::entities::PlacedPiece).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtPlacedPiece {
    pub id: usize,
    /// Top-left corner, origin at the top-left corner of the sheet
    pub x: fsize,
    pub y: fsize,
    /// As-placed dimensions: kerf included, rotation applied
    pub width: fsize,
    pub height: fsize,
    pub color: ColorTag,
}

/// External representation of an [`UnplacedPiece`](crate::packing::UnplacedPiece).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtUnplacedPiece {
    pub spec_id: usize,
    pub long_side: fsize,
    pub short_side: fsize,
    pub reason: UnplacedReason,
}

/// A named diagram: the cut list together with the layouts computed for it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtDiagram {
    pub name: String,
    pub cut_list: ExtCutList,
    pub layouts: Vec<ExtLayout>,
    /// Pieces which could not be placed in the layouts
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unplaced: Vec<ExtUnplacedPiece>,
}
