//! Screen-space geometry for widget placement and hit testing.
//!
//! Coordinates are in pixels with the origin at the top-left corner and the
//! y axis growing downwards.

use bytemuck::{Pod, Zeroable};

use crate::error::{WidgetError, WidgetResult};

/// A point in screen coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Point {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f64,
    /// Y position (top edge).
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle of the given size centered on `center`.
    #[must_use]
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom exclusive,
    /// so two rects sharing an edge never both claim a point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Grows the rectangle by `dx` in total width and `dy` in total height,
    /// keeping its center.
    #[must_use]
    pub fn inflate(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x - dx * 0.5,
            self.y - dy * 0.5,
            self.width + dx,
            self.height + dy,
        )
    }

    /// Returns the same rectangle moved so its center lands on `center`.
    #[must_use]
    pub fn with_center(&self, center: Point) -> Self {
        Self::from_center(center, self.width, self.height)
    }

    /// Returns the rectangle moved by the given offset.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns true if the rectangle has no area (or NaN dimensions).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns the rectangle if it has positive width and height.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidBounds`] for zero, negative or NaN sizes.
    pub fn validated(self) -> WidgetResult<Self> {
        if self.is_degenerate() {
            return Err(WidgetError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(Point::new(50.0, 30.0)));
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(!rect.contains(Point::new(110.0, 30.0)));
        assert!(!rect.contains(Point::new(5.0, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 80.0)));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        let grown = rect.inflate(20.0, 20.0);

        assert_eq!(grown.center(), rect.center());
        assert_eq!(grown.width, 60.0);
        assert_eq!(grown.height, 30.0);
        assert_eq!(grown.x, -10.0);
    }

    #[test]
    fn test_validated_rejects_flat_rects() {
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).validated().is_ok());
        assert_eq!(
            Rect::new(0.0, 0.0, 0.0, 10.0).validated(),
            Err(WidgetError::InvalidBounds { width: 0.0, height: 10.0 })
        );
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).validated().is_err());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 1.0).validated().is_err());
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);

        assert_eq!(a + b, Point::new(5.0, 8.0));
        assert_eq!(b - a, Point::new(3.0, 4.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }
}
