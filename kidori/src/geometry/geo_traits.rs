use crate::fsize;

/// Trait for types that can detect collisions between `Self` and `T`.
///
/// A collision requires an overlap of strictly positive area: shapes that only share an edge or a corner do not collide.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Area of the interior of the shape
    fn area(&self) -> fsize;
}
