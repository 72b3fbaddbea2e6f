//! Geometric primitives for layout analysis.
//!
//! This module provides the basic geometric types and operations used by
//! the segmenter, the table extractor and the anchored search.

use serde::Serialize;

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in page space.
///
/// The origin is the top-left corner of the page; `y` grows downward,
/// matching OCR output conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width of the box
    pub width: f32,
    /// Height of the box
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(bbox.width, 100.0);
    /// assert_eq!(bbox.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a bounding box from two corner points.
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the box.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    /// let center = bbox.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this box intersects with another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if this box contains a point.
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Compute the union of this box with another.
    ///
    /// Returns the smallest box that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_oxide::geometry::BoundingBox;
    ///
    /// let b1 = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
    /// let b2 = BoundingBox::new(25.0, 25.0, 50.0, 50.0);
    /// let union = b1.union(&b2);
    ///
    /// assert_eq!(union.x, 0.0);
    /// assert_eq!(union.y, 0.0);
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        BoundingBox::from_points(x0, y0, x1, y1)
    }

    /// Check that all coordinates and dimensions are finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        finite && self.x >= 0.0 && self.y >= 0.0 && self.width >= 0.0 && self.height >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_bbox_edges() {
        let b = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 110.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 70.0);
    }

    #[test]
    fn test_bbox_from_points() {
        let b = BoundingBox::from_points(10.0, 20.0, 110.0, 70.0);
        assert_eq!(b.width, 100.0);
        assert_eq!(b.height, 50.0);
    }

    #[test]
    fn test_bbox_center() {
        let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let c = b.center();
        assert_eq!(c.x, 50.0);
        assert_eq!(c.y, 25.0);
    }

    #[test]
    fn test_bbox_intersects() {
        let b1 = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b2 = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        let b3 = BoundingBox::new(200.0, 200.0, 100.0, 100.0);

        assert!(b1.intersects(&b2));
        assert!(b2.intersects(&b1));
        assert!(!b1.intersects(&b3));
    }

    #[test]
    fn test_bbox_contains_point() {
        let b = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert!(b.contains_point(&Point::new(50.0, 50.0)));
        assert!(b.contains_point(&Point::new(0.0, 0.0)));
        assert!(b.contains_point(&Point::new(100.0, 100.0)));
        assert!(!b.contains_point(&Point::new(150.0, 150.0)));
    }

    #[test]
    fn test_bbox_union() {
        let b1 = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b2 = BoundingBox::new(25.0, 25.0, 50.0, 50.0);
        let u = b1.union(&b2);

        assert_eq!(u.x, 0.0);
        assert_eq!(u.y, 0.0);
        assert_eq!(u.right(), 75.0);
        assert_eq!(u.bottom(), 75.0);
    }

    #[test]
    fn test_bbox_well_formed() {
        assert!(BoundingBox::new(0.0, 0.0, 10.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(f32::NAN, 0.0, 10.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(0.0, 0.0, -10.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(-1.0, 0.0, 10.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(0.0, f32::INFINITY, 10.0, 10.0).is_well_formed());
    }
}
