#![doc = document_features::document_features!()]
//! `kidori` computes how to cut rectangular pieces from a sheet of fixed width and variable length,
//! keeping the consumed length small, and validates manual repositioning of the resulting placements.

/// Geometric primitives and predicates
pub mod geometry;

/// Entities to model the cutting problem: pieces, placements, layouts and cut lists
pub mod entities;

/// The free-space tracking, best-fit guillotine packer
pub mod packing;

/// Validation of manual moves of placed pieces
pub mod validation;

/// Editing session tying cut lists, packing runs and manual moves together
pub mod session;

/// Importing cut lists and layouts into and exporting them out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::KidoriError;

/// Floating point type used for all dimensions and coordinates
#[allow(non_camel_case_types)]
pub type fsize = f64;
