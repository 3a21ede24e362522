//! Integer geometry for laid-out graphs.
//!
//! Layout positions are integral so renderers and editors can diff them
//! between runs without float noise.

use serde::Serialize;

/// A point in layout space.
///
/// # Examples
///
/// ```
/// use loom_core::geometry::Point;
///
/// let p = Point::new(40, 180);
/// assert_eq!(p.x(), 40);
/// assert_eq!(p.y(), 180);
/// assert!(Point::default().is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }
}
