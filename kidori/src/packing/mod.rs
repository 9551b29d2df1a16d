mod free_space;
mod packer;

/// Guillotine subtraction of a placed rectangle from a free one
pub mod guillotine;

#[doc(inline)]
pub use free_space::BestFit;
#[doc(inline)]
pub use free_space::FreeRect;
#[doc(inline)]
pub use free_space::FreeSpacePool;
#[doc(inline)]
pub use free_space::PRUNE_EPSILON;
#[doc(inline)]
pub use packer::PackConfig;
#[doc(inline)]
pub use packer::PackOutcome;
#[doc(inline)]
pub use packer::Packer;
#[doc(inline)]
pub use packer::UnplacedPiece;
#[doc(inline)]
pub use packer::UnplacedReason;
#[doc(inline)]
pub use packer::pack;
#[doc(inline)]
pub use packer::placement_order;
