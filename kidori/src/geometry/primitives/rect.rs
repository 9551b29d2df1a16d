use crate::fsize;
use crate::geometry::geo_enums::GeoRelation;
use crate::geometry::geo_traits::{CollidesWith, Shape};
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in sheet coordinates.
/// The origin is the top-left corner of the sheet, `x` runs across the width and `y` along the length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: fsize,
    pub y: fsize,
    pub width: fsize,
    pub height: fsize,
}

impl Rect {
    pub fn new(x: fsize, y: fsize, width: fsize, height: fsize) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative rectangle dimensions");
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Like [`Rect::new`], but rejects negative or non-finite dimensions instead of asserting.
    pub fn try_new(x: fsize, y: fsize, width: fsize, height: fsize) -> Result<Self> {
        ensure!(
            [x, y, width, height].iter().all(|v| v.is_finite()) && width >= 0.0 && height >= 0.0,
            "invalid rectangle, x: {x}, y: {y}, width: {width}, height: {height}"
        );
        Ok(Rect::new(x, y, width, height))
    }

    pub fn left(&self) -> fsize {
        self.x
    }

    pub fn right(&self) -> fsize {
        self.x + self.width
    }

    pub fn top(&self) -> fsize {
        self.y
    }

    pub fn bottom(&self) -> fsize {
        self.y + self.height
    }

    /// True if `other` lies within `self`. Shared edges count as contained.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the geometric relation between `self` and another [`Rect`].
    /// Optimized for `GeoRelation::Disjoint`
    #[inline(always)]
    pub fn relation_to(&self, other: &Rect) -> GeoRelation {
        if !self.collides_with(other) {
            return GeoRelation::Disjoint;
        }
        if self.contains(other) {
            return GeoRelation::Surrounding;
        }
        if other.contains(self) {
            return GeoRelation::Enclosed;
        }
        GeoRelation::Intersecting
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`, if it has a positive area.
    pub fn intersection(a: &Rect, b: &Rect) -> Option<Rect> {
        let left = fsize::max(a.left(), b.left());
        let top = fsize::max(a.top(), b.top());
        let right = fsize::min(a.right(), b.right());
        let bottom = fsize::min(a.bottom(), b.bottom());
        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        fsize::max(self.left(), other.left()) < fsize::min(self.right(), other.right())
            && fsize::max(self.top(), other.top()) < fsize::min(self.bottom(), other.bottom())
    }
}

impl Shape for Rect {
    fn area(&self) -> fsize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 300.0, 500.0);
        let b = Rect::new(300.0, 0.0, 300.0, 500.0);
        let c = Rect::new(0.0, 500.0, 300.0, 10.0);
        assert!(!a.collides_with(&b));
        assert!(!a.collides_with(&c));
        assert_eq!(a.relation_to(&b), GeoRelation::Disjoint);
    }

    #[test]
    fn relations() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        let crossing = Rect::new(90.0, 90.0, 20.0, 20.0);
        assert_eq!(outer.relation_to(&inner), GeoRelation::Surrounding);
        assert_eq!(inner.relation_to(&outer), GeoRelation::Enclosed);
        assert_eq!(outer.relation_to(&crossing), GeoRelation::Intersecting);
        assert_eq!(outer.relation_to(&outer), GeoRelation::Surrounding);
    }

    #[test]
    fn containment_is_non_strict() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(a.contains(&a));
        assert!(a.contains(&Rect::new(0.0, 50.0, 100.0, 0.0)));
        assert!(!a.contains(&Rect::new(0.0, 0.0, 100.1, 50.0)));
    }

    #[test]
    fn intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(Rect::intersection(&a, &b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(Rect::intersection(&a, &Rect::new(10.0, 0.0, 5.0, 5.0)), None);
    }

    #[test]
    fn try_new_rejects_bad_dimensions() {
        assert!(Rect::try_new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(Rect::try_new(0.0, fsize::NAN, 1.0, 1.0).is_err());
        assert!(Rect::try_new(0.0, 0.0, 0.0, 1.0).is_ok());
    }
}
