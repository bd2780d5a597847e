//! Polygons and the planar-region family.

use super::box2d::Box2D;
use super::rle::Rle;
use super::vector::Vector2D;
use crate::error::GeometryError;

/// A simple polygon given by its vertex loop.
///
/// The last vertex implicitly connects back to the first. Polygons with fewer
/// than three vertices are representable but degenerate: their area is zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2D>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if any vertex is non-finite.
    pub fn new(vertices: Vec<Vector2D>) -> Result<Self, GeometryError> {
        if let Some(idx) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeometryError::validation(format!(
                "polygon vertex {idx} is not finite: {:?}",
                vertices[idx]
            )));
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2D] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if the polygon cannot enclose a region.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Unsigned area by the shoelace formula.
    pub fn area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|i| self.vertices[i].cross(self.vertices[(i + 1) % n]))
            .sum();
        0.5 * twice.abs()
    }

    pub fn bounds(&self) -> Option<Box2D> {
        Box2D::enclosing(&self.vertices)
    }
}

/// A union of polygons, which may be disjoint or overlapping.
///
/// Has no `area()`: members may overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    pub fn bounds(&self) -> Option<Box2D> {
        Box2D::enclosing(self.polygons.iter().flat_map(|p| p.vertices()))
    }
}

impl<'a> IntoIterator for &'a MultiPolygon {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

/// The three interchangeable-but-not-substitutable forms of a 2D region.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanarRegion {
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    Rle(Rle),
}

impl PlanarRegion {
    /// Only the run-length form converts to and from a raster losslessly.
    pub fn supports_raster_roundtrip(&self) -> bool {
        matches!(self, PlanarRegion::Rle(_))
    }

    pub fn as_rle(&self) -> Option<&Rle> {
        match self {
            PlanarRegion::Rle(rle) => Some(rle),
            _ => None,
        }
    }

    /// Area where it is well defined: polygon area or RLE foreground count.
    pub fn area(&self) -> Option<f64> {
        match self {
            PlanarRegion::Polygon(p) => Some(p.area()),
            PlanarRegion::MultiPolygon(_) => None,
            PlanarRegion::Rle(rle) => Some(rle.foreground_area() as f64),
        }
    }
}
