//! Axis-aligned 2D boxes in canonical XYXY form.

use super::vector::Vector2D;
use crate::error::GeometryError;

/// An axis-aligned box stored as (xmin, ymin, xmax, ymax).
///
/// Unlike a raw label record, a `Box2D` is always ordered and finite: the
/// constructors reject inverted or non-finite input instead of clamping it.
#[derive(Clone, Copy, PartialEq)]
pub struct Box2D {
    min: Vector2D,
    max: Vector2D,
}

impl Box2D {
    /// Creates a box from explicit coordinates.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if any coordinate is non-finite
    /// or if `xmin > xmax` or `ymin > ymax`.
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, GeometryError> {
        Self::from_corners(Vector2D::new(xmin, ymin), Vector2D::new(xmax, ymax))
    }

    /// Creates a box from its top-left and bottom-right corners.
    pub fn from_corners(top_left: Vector2D, bottom_right: Vector2D) -> Result<Self, GeometryError> {
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(GeometryError::validation(format!(
                "non-finite box corners {top_left:?}, {bottom_right:?}"
            )));
        }
        if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return Err(GeometryError::validation(format!(
                "box min ({}, {}) must be <= max ({}, {})",
                top_left.x, top_left.y, bottom_right.x, bottom_right.y
            )));
        }
        Ok(Self {
            min: top_left,
            max: bottom_right,
        })
    }

    /// Creates a box from XYWH format, where (x, y) is the top-left corner.
    ///
    /// This is the form used by COCO-style annotations.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        if width < 0.0 || height < 0.0 {
            return Err(GeometryError::validation(format!(
                "box size {width}x{height} must not be negative"
            )));
        }
        Self::from_xyxy(x, y, x + width, y + height)
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Vector2D>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Vector2D::new(min.x.min(p.x), min.y.min(p.y)),
                Vector2D::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self { min, max })
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    #[inline]
    pub fn top_left(&self) -> Vector2D {
        self.min
    }

    #[inline]
    pub fn bottom_right(&self) -> Vector2D {
        self.max
    }

    /// All four corners, clockwise from the top-left in image coordinates.
    pub fn corners(&self) -> [Vector2D; 4] {
        [
            self.min,
            Vector2D::new(self.max.x, self.min.y),
            self.max,
            Vector2D::new(self.min.x, self.max.y),
        ]
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the area of the box, `max(0, w) * max(0, h)`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    pub fn center(&self) -> Vector2D {
        (self.min + self.max) * 0.5
    }

    /// Converts to XYWH format (x, y, width, height).
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.xmin(), self.ymin(), self.width(), self.height())
    }

    /// Returns true if the point lies inside the box or on its border.
    pub fn contains(&self, point: Vector2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f64 {
        self.min.distance(self.max)
    }
}

impl std::fmt::Debug for Box2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Box2D")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_xyxy() {
        let b = Box2D::from_xyxy(10.0, 20.0, 100.0, 80.0).unwrap();
        assert_eq!(b.xmin(), 10.0);
        assert_eq!(b.ymin(), 20.0);
        assert_eq!(b.xmax(), 100.0);
        assert_eq!(b.ymax(), 80.0);
    }

    #[test]
    fn test_box_constructors_agree() {
        let xyxy = Box2D::from_xyxy(10.0, 20.0, 100.0, 80.0).unwrap();
        let xywh = Box2D::from_xywh(10.0, 20.0, 90.0, 60.0).unwrap();
        let corners =
            Box2D::from_corners(Vector2D::new(10.0, 20.0), Vector2D::new(100.0, 80.0)).unwrap();
        assert_eq!(xyxy, xywh);
        assert_eq!(xyxy, corners);
    }

    #[test]
    fn test_box_dimensions() {
        let b = Box2D::from_xyxy(10.0, 20.0, 100.0, 80.0).unwrap();
        assert_eq!(b.width(), 90.0);
        assert_eq!(b.height(), 60.0);
        assert_eq!(b.area(), 5400.0);
        assert_eq!(b.center(), Vector2D::new(55.0, 50.0));
    }

    #[test]
    fn test_zero_size_box_has_zero_area() {
        let b = Box2D::from_xyxy(5.0, 5.0, 5.0, 9.0).unwrap();
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn test_inverted_box_is_rejected() {
        let err = Box2D::from_xyxy(100.0, 80.0, 10.0, 20.0).unwrap_err();
        assert!(matches!(err, GeometryError::Validation(_)));
        assert!(Box2D::from_xywh(0.0, 0.0, -1.0, 2.0).is_err());
        assert!(Box2D::from_xyxy(f64::NAN, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_box_to_xywh_roundtrip() {
        let original = Box2D::from_xywh(15.0, 25.0, 50.0, 30.0).unwrap();
        let (x, y, w, h) = original.to_xywh();
        assert_eq!(original, Box2D::from_xywh(x, y, w, h).unwrap());
    }

    #[test]
    fn test_corners_and_contains() {
        let b = Box2D::from_xyxy(0.0, 0.0, 2.0, 1.0).unwrap();
        assert_eq!(
            b.corners(),
            [
                Vector2D::new(0.0, 0.0),
                Vector2D::new(2.0, 0.0),
                Vector2D::new(2.0, 1.0),
                Vector2D::new(0.0, 1.0),
            ]
        );
        assert!(b.contains(Vector2D::new(2.0, 0.5)));
        assert!(!b.contains(Vector2D::new(2.1, 0.5)));
    }

    #[test]
    fn test_enclosing() {
        let points = [
            Vector2D::new(1.0, 5.0),
            Vector2D::new(-2.0, 3.0),
            Vector2D::new(4.0, 1.0),
        ];
        let b = Box2D::enclosing(&points).unwrap();
        assert_eq!(b, Box2D::from_xyxy(-2.0, 1.0, 4.0, 5.0).unwrap());
        assert!(Box2D::enclosing(&[]).is_none());
    }
}
