mod color;
mod cut_list;
mod layout;
mod orientation;
mod piece;
mod placed_piece;

#[doc(inline)]
pub use color::ColorLegend;
#[doc(inline)]
pub use color::ColorTag;
#[doc(inline)]
pub use cut_list::CutList;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use orientation::Orientation;
#[doc(inline)]
pub use piece::PieceInstance;
#[doc(inline)]
pub use piece::PieceSpec;
#[doc(inline)]
pub use placed_piece::PlacedPiece;
