mod export;
mod import;

/// External (serializable) representations of the entities within the library.
pub mod ext_repr;

/// All logic for creating SVG cutting diagrams from [`Layout`](crate::entities::Layout)s
#[cfg(feature = "svg")]
pub mod svg;

#[doc(inline)]
pub use export::{export_cut_list, export_layout, export_outcome};
#[doc(inline)]
pub use import::{import_cut_list, import_layout};
