//! Geometry primitives.
//!
//! A single [`Point`] type is shared across the kernels as the coordinate
//! type for path and visibility results.

use std::fmt;

/// A 2D integer grid coordinate. `x` is the major axis (`index = x * height + y`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_coords() {
        assert_eq!(Point::new(3, -2).to_string(), "(3, -2)");
    }
}
