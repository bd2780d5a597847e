//! Polylines and curve similarity.

use std::fmt;

use super::box2d::Box2D;
use super::vector::Vector2D;
use crate::error::GeometryError;

/// Role of a vertex when a polyline encodes a Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurvePointType {
    /// An on-curve vertex (`V`).
    Vertex,
    /// An off-curve control point (`C`).
    Control,
}

impl CurvePointType {
    pub fn as_char(self) -> char {
        match self {
            CurvePointType::Vertex => 'V',
            CurvePointType::Control => 'C',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'V' => Some(CurvePointType::Vertex),
            'C' => Some(CurvePointType::Control),
            _ => None,
        }
    }

    /// Parses a tag string such as `"VCCV"`.
    pub fn parse_tags(tags: &str) -> Result<Vec<Self>, GeometryError> {
        tags.chars()
            .enumerate()
            .map(|(idx, c)| {
                Self::from_char(c).ok_or_else(|| {
                    GeometryError::validation(format!(
                        "curve point type {c:?} at index {idx} is not 'V' or 'C'"
                    ))
                })
            })
            .collect()
    }

    pub fn format_tags(tags: &[Self]) -> String {
        tags.iter().map(|t| t.as_char()).collect()
    }
}

impl fmt::Display for CurvePointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An open polyline with at least two vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline2D {
    vertices: Vec<Vector2D>,
    curve_points: Option<Vec<CurvePointType>>,
}

impl Polyline2D {
    /// Creates a plain polyline.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] for fewer than two vertices or a
    /// non-finite vertex.
    pub fn new(vertices: Vec<Vector2D>) -> Result<Self, GeometryError> {
        if vertices.len() < 2 {
            return Err(GeometryError::validation(format!(
                "polyline needs at least 2 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(idx) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeometryError::validation(format!(
                "polyline vertex {idx} is not finite: {:?}",
                vertices[idx]
            )));
        }
        Ok(Self {
            vertices,
            curve_points: None,
        })
    }

    /// Creates a polyline describing a Bézier curve.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if there is not exactly one tag
    /// per vertex.
    pub fn with_curve_points(
        vertices: Vec<Vector2D>,
        curve_points: Vec<CurvePointType>,
    ) -> Result<Self, GeometryError> {
        if curve_points.len() != vertices.len() {
            return Err(GeometryError::validation(format!(
                "{} curve point type(s) for {} vertices",
                curve_points.len(),
                vertices.len()
            )));
        }
        let mut polyline = Self::new(vertices)?;
        polyline.curve_points = Some(curve_points);
        Ok(polyline)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2D] {
        &self.vertices
    }

    #[inline]
    pub fn curve_points(&self) -> Option<&[CurvePointType]> {
        self.curve_points.as_deref()
    }

    #[inline]
    pub fn is_bezier_curve(&self) -> bool {
        self.curve_points.is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false: a polyline has at least two vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    pub fn bounds(&self) -> Option<Box2D> {
        Box2D::enclosing(&self.vertices)
    }

    /// The same polyline traversed in the opposite direction.
    pub fn reversed(&self) -> Polyline2D {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        let curve_points = self.curve_points.as_ref().map(|tags| {
            let mut tags = tags.clone();
            tags.reverse();
            tags
        });
        Self {
            vertices,
            curve_points,
        }
    }
}

/// An ordered collection of polylines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPolyline2D {
    polylines: Vec<Polyline2D>,
}

impl MultiPolyline2D {
    pub fn new(polylines: Vec<Polyline2D>) -> Self {
        Self { polylines }
    }

    #[inline]
    pub fn polylines(&self) -> &[Polyline2D] {
        &self.polylines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polyline2D> {
        self.polylines.iter()
    }

    /// Total length of all member polylines.
    pub fn length(&self) -> f64 {
        self.polylines.iter().map(Polyline2D::length).sum()
    }

    pub fn bounds(&self) -> Option<Box2D> {
        Box2D::enclosing(self.polylines.iter().flat_map(|p| p.vertices()))
    }
}

impl<'a> IntoIterator for &'a MultiPolyline2D {
    type Item = &'a Polyline2D;
    type IntoIter = std::slice::Iter<'a, Polyline2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.iter()
    }
}

/// Discrete Fréchet distance between two point sequences.
///
/// Runs in `O(m * n)` time and keeps a single row of the dynamic-programming
/// table, sized to the shorter input. Returns 0 if either input is empty.
pub fn frechet_distance(p: &[Vector2D], q: &[Vector2D]) -> f64 {
    if p.is_empty() || q.is_empty() {
        return 0.0;
    }
    // The distance is symmetric, so iterate over the longer sequence.
    let (outer, inner) = if p.len() >= q.len() { (p, q) } else { (q, p) };

    let mut row: Vec<f64> = Vec::with_capacity(inner.len());
    let mut acc = 0.0f64;
    for point in inner {
        acc = acc.max(outer[0].distance(*point));
        row.push(acc);
    }

    for a in &outer[1..] {
        let mut diagonal = row[0];
        row[0] = row[0].max(a.distance(inner[0]));
        for j in 1..inner.len() {
            let up = row[j];
            let best = diagonal.min(up).min(row[j - 1]);
            row[j] = best.max(a.distance(inner[j]));
            diagonal = up;
        }
    }

    row[inner.len() - 1]
}

/// Fréchet distance that ignores the traversal direction of `q`.
pub fn uniform_frechet_distance(p: &Polyline2D, q: &Polyline2D) -> f64 {
    let forward = frechet_distance(p.vertices(), q.vertices());
    let mut reversed = q.vertices().to_vec();
    reversed.reverse();
    forward.min(frechet_distance(p.vertices(), &reversed))
}

/// Similarity score in `[0, 1]`; identical polylines score 1.
///
/// The direction-independent Fréchet distance is normalised by the diagonal
/// of the box enclosing both polylines, which bounds any distance between
/// their vertices.
pub fn similarity(p: &Polyline2D, q: &Polyline2D) -> f64 {
    let distance = uniform_frechet_distance(p, q);
    let scale = Box2D::enclosing(p.vertices().iter().chain(q.vertices()))
        .map_or(0.0, |b| b.diagonal());
    if scale == 0.0 {
        return 1.0;
    }
    (1.0 - distance / scale).max(0.0)
}
