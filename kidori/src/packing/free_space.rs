use itertools::Itertools;
use log::trace;

use crate::entities::Orientation;
use crate::fsize;
use crate::geometry::geo_enums::GeoRelation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Rect;
use crate::packing::guillotine;

/// Free rectangles with a width or height below this value are considered numerical noise and pruned.
pub const PRUNE_EPSILON: fsize = 0.01;

/// A region of the sheet that is not allocated to any placed piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FreeRect {
    /// Placeholder at the growing bottom of the sheet. Has no height until the sheet grows and therefore fits nothing.
    Pending { x: fsize, y: fsize, width: fsize },
    /// Unallocated space of known size
    Concrete(Rect),
}

impl FreeRect {
    /// The region as a rectangle, pending placeholders having zero height.
    pub fn as_rect(&self) -> Rect {
        match *self {
            FreeRect::Pending { x, y, width } => Rect::new(x, y, width, 0.0),
            FreeRect::Concrete(rect) => rect,
        }
    }

    pub fn area(&self) -> fsize {
        match self {
            FreeRect::Pending { .. } => 0.0,
            FreeRect::Concrete(rect) => rect.area(),
        }
    }

    pub fn fits(&self, orientation: &Orientation) -> bool {
        match self {
            FreeRect::Pending { .. } => false,
            FreeRect::Concrete(rect) => orientation.fits_in(rect),
        }
    }

    fn is_degenerate(&self) -> bool {
        match self {
            FreeRect::Pending { .. } => true,
            FreeRect::Concrete(rect) => rect.width < PRUNE_EPSILON || rect.height < PRUNE_EPSILON,
        }
    }
}

/// The best (free rectangle, orientation) pair found for a piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestFit {
    /// Index of the free rectangle in the pool
    pub index: usize,
    pub orientation: Orientation,
    /// Area that would be wasted: free rectangle area minus the area of the oriented piece
    pub score: fsize,
}

/// The set of unallocated regions of the sheet during a single packing run.
///
/// After every placement the pool is cleaned up: degenerate rectangles are removed, as are rectangles contained in
/// another surviving one. This keeps the candidate set small. It does not guarantee the pool to be a minimal
/// or gapless cover of the free space of the sheet.
#[derive(Clone, Debug)]
pub struct FreeSpacePool {
    rects: Vec<FreeRect>,
}

impl FreeSpacePool {
    /// A pool for an empty sheet: a single pending placeholder spanning the full width.
    pub fn new(sheet_width: fsize) -> Self {
        FreeSpacePool {
            rects: vec![FreeRect::Pending {
                x: 0.0,
                y: 0.0,
                width: sheet_width,
            }],
        }
    }

    pub fn rects(&self) -> &[FreeRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Searches all (free rectangle, candidate) pairs for the one wasting the least area.
    ///
    /// Ties go to the first pair in enumeration order: rectangles in pool order, then candidates in the given order.
    pub fn best_fit(&self, candidates: &[Orientation]) -> Option<BestFit> {
        let mut best: Option<BestFit> = None;
        for (index, free) in self.rects.iter().enumerate() {
            for orientation in candidates.iter().filter(|o| free.fits(o)) {
                let score = free.area() - orientation.area();
                if best.is_none_or(|b| score < b.score) {
                    best = Some(BestFit {
                        index,
                        orientation: *orientation,
                        score,
                    });
                }
            }
        }
        best
    }

    /// Appends a concrete free rectangle at the end of the pool.
    pub fn push(&mut self, rect: Rect) {
        self.rects.push(FreeRect::Concrete(rect));
    }

    /// Allocates `placed` inside the free rectangle at `index`.
    /// The rectangle is replaced by its guillotine residuals, after which the pool is cleaned up.
    pub fn occupy(&mut self, index: usize, placed: &Rect) {
        let free = self.rects.remove(index);
        let residuals = guillotine::split(&free.as_rect(), placed);
        trace!(
            "[POOL] split {:?} around {:?} into {} residuals",
            free,
            placed,
            residuals.len()
        );
        self.rects.extend(residuals.into_iter().map(FreeRect::Concrete));
        self.clean_up();
    }

    /// Removes degenerate rectangles, then every rectangle contained in another surviving one.
    /// Of two identical rectangles the later one in pool order survives.
    fn clean_up(&mut self) {
        self.rects.retain(|r| !r.is_degenerate());

        let rects = self.rects.iter().map(|r| r.as_rect()).collect_vec();
        let mut discarded = vec![false; rects.len()];
        for i in 0..rects.len() {
            let contained = (0..rects.len()).any(|j| {
                j != i && !discarded[j] && rects[j].relation_to(&rects[i]) == GeoRelation::Surrounding
            });
            discarded[i] = contained;
        }

        let mut flags = discarded.into_iter();
        self.rects.retain(|_| !flags.next().unwrap_or(false));
    }
}
