//! Keypoint sets with optional visibility.

use std::fmt;
use std::str::FromStr;

use super::box2d::Box2D;
use super::vector::Vector2D;
use crate::error::GeometryError;

/// How integer visibility codes are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisibilityScheme {
    /// `0` invisible, `1` visible.
    Binary,
    /// `0` invisible, `1` occluded, `2` visible.
    Ternary,
}

impl VisibilityScheme {
    /// Largest valid code under this scheme.
    pub fn max_code(self) -> u8 {
        match self {
            VisibilityScheme::Binary => 1,
            VisibilityScheme::Ternary => 2,
        }
    }
}

impl fmt::Display for VisibilityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityScheme::Binary => write!(f, "binary"),
            VisibilityScheme::Ternary => write!(f, "ternary"),
        }
    }
}

impl FromStr for VisibilityScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(VisibilityScheme::Binary),
            "ternary" => Ok(VisibilityScheme::Ternary),
            other => Err(format!(
                "unknown visibility scheme '{other}' (expected 'binary' or 'ternary')"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Invisible,
    Occluded,
    Visible,
}

impl Visibility {
    /// Interprets a raw code under `scheme`.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] for codes outside the scheme.
    pub fn from_code(code: u8, scheme: VisibilityScheme) -> Result<Self, GeometryError> {
        match (scheme, code) {
            (_, 0) => Ok(Visibility::Invisible),
            (VisibilityScheme::Binary, 1) => Ok(Visibility::Visible),
            (VisibilityScheme::Ternary, 1) => Ok(Visibility::Occluded),
            (VisibilityScheme::Ternary, 2) => Ok(Visibility::Visible),
            _ => Err(GeometryError::validation(format!(
                "visibility {code} is out of range for the {scheme} scheme (0..={})",
                scheme.max_code()
            ))),
        }
    }

    /// Raw code of this visibility under `scheme`, if representable.
    pub fn code(self, scheme: VisibilityScheme) -> Option<u8> {
        match (scheme, self) {
            (_, Visibility::Invisible) => Some(0),
            (VisibilityScheme::Binary, Visibility::Visible) => Some(1),
            (VisibilityScheme::Binary, Visibility::Occluded) => None,
            (VisibilityScheme::Ternary, Visibility::Occluded) => Some(1),
            (VisibilityScheme::Ternary, Visibility::Visible) => Some(2),
        }
    }
}

/// A single keypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint2D {
    pub x: f64,
    pub y: f64,
    pub v: Option<Visibility>,
}

impl Keypoint2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, v: None }
    }

    pub fn with_visibility(x: f64, y: f64, v: Visibility) -> Self {
        Self { x, y, v: Some(v) }
    }

    #[inline]
    pub fn position(&self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }
}

/// A fixed-length, index-addressable set of keypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Keypoints2D {
    points: Vec<Keypoint2D>,
    scheme: Option<VisibilityScheme>,
}

impl Keypoints2D {
    /// Creates a keypoint set, checking every visibility against `scheme`.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if a coordinate is non-finite, a
    /// visibility is given without a scheme, or a visibility cannot be
    /// expressed in the scheme (occluded under the binary scheme).
    pub fn new(
        points: Vec<Keypoint2D>,
        scheme: Option<VisibilityScheme>,
    ) -> Result<Self, GeometryError> {
        for (idx, point) in points.iter().enumerate() {
            if !point.position().is_finite() {
                return Err(GeometryError::validation(format!(
                    "keypoint {idx} is not finite: ({}, {})",
                    point.x, point.y
                )));
            }
            let Some(v) = point.v else { continue };
            let Some(scheme) = scheme else {
                return Err(GeometryError::validation(format!(
                    "keypoint {idx} has a visibility but no visibility scheme was given"
                )));
            };
            if v.code(scheme).is_none() {
                return Err(GeometryError::validation(format!(
                    "keypoint {idx} visibility {v:?} is not allowed by the {scheme} scheme"
                )));
            }
        }
        Ok(Self { points, scheme })
    }

    /// Creates a keypoint set from raw `(x, y, v)` triples.
    pub fn from_codes(
        raw: &[(f64, f64, Option<u8>)],
        scheme: Option<VisibilityScheme>,
    ) -> Result<Self, GeometryError> {
        let points = raw
            .iter()
            .enumerate()
            .map(|(idx, &(x, y, code))| {
                let v = match (code, scheme) {
                    (None, _) => None,
                    (Some(code), Some(scheme)) => Some(Visibility::from_code(code, scheme)?),
                    (Some(_), None) => {
                        return Err(GeometryError::validation(format!(
                            "keypoint {idx} has a visibility but no visibility scheme was given"
                        )))
                    }
                };
                Ok(Keypoint2D { x, y, v })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points, scheme)
    }

    #[inline]
    pub fn scheme(&self) -> Option<VisibilityScheme> {
        self.scheme
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keypoint2D> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keypoint2D> {
        self.points.iter()
    }

    /// Raw visibility code of each keypoint under the set's scheme.
    pub fn codes(&self) -> Vec<Option<u8>> {
        self.points
            .iter()
            .map(|p| match (p.v, self.scheme) {
                (Some(v), Some(scheme)) => v.code(scheme),
                _ => None,
            })
            .collect()
    }

    /// Number of keypoints marked visible.
    pub fn visible_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.v == Some(Visibility::Visible))
            .count()
    }

    pub fn bounds(&self) -> Option<Box2D> {
        let positions: Vec<Vector2D> = self.points.iter().map(Keypoint2D::position).collect();
        Box2D::enclosing(&positions)
    }
}

impl std::ops::Index<usize> for Keypoints2D {
    type Output = Keypoint2D;

    fn index(&self, index: usize) -> &Keypoint2D {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Keypoints2D {
    type Item = &'a Keypoint2D;
    type IntoIter = std::slice::Iter<'a, Keypoint2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_per_scheme() {
        use VisibilityScheme::*;
        assert_eq!(Visibility::from_code(1, Binary).unwrap(), Visibility::Visible);
        assert_eq!(Visibility::from_code(1, Ternary).unwrap(), Visibility::Occluded);
        assert_eq!(Visibility::from_code(2, Ternary).unwrap(), Visibility::Visible);
        assert!(Visibility::from_code(2, Binary).is_err());
        assert!(Visibility::from_code(3, Ternary).is_err());
        assert_eq!(Visibility::Occluded.code(Binary), None);
    }

    #[test]
    fn test_out_of_range_fails_at_construction() {
        let raw = [(1.0, 2.0, Some(0)), (3.0, 4.0, Some(2))];
        let err = Keypoints2D::from_codes(&raw, Some(VisibilityScheme::Binary)).unwrap_err();
        assert!(matches!(err, GeometryError::Validation(_)));
        assert!(Keypoints2D::from_codes(&raw, Some(VisibilityScheme::Ternary)).is_ok());
    }

    #[test]
    fn test_visibility_requires_scheme() {
        let raw = [(1.0, 2.0, Some(1))];
        assert!(Keypoints2D::from_codes(&raw, None).is_err());

        let points = vec![Keypoint2D::with_visibility(1.0, 2.0, Visibility::Visible)];
        assert!(Keypoints2D::new(points, None).is_err());
    }

    #[test]
    fn test_occluded_is_not_binary() {
        let points = vec![Keypoint2D::with_visibility(0.0, 0.0, Visibility::Occluded)];
        assert!(Keypoints2D::new(points, Some(VisibilityScheme::Binary)).is_err());
    }

    #[test]
    fn test_index_access_and_codes() {
        let raw = [(1.0, 2.0, Some(2)), (3.0, 4.0, None), (5.0, 0.5, Some(1))];
        let kp = Keypoints2D::from_codes(&raw, Some(VisibilityScheme::Ternary)).unwrap();
        assert_eq!(kp.len(), 3);
        assert_eq!(kp[0], Keypoint2D::with_visibility(1.0, 2.0, Visibility::Visible));
        assert_eq!(kp.get(1).unwrap().v, None);
        assert!(kp.get(3).is_none());
        assert_eq!(kp.codes(), vec![Some(2), None, Some(1)]);
        assert_eq!(kp.visible_count(), 1);
        assert_eq!(kp.bounds(), Box2D::from_xyxy(1.0, 0.5, 5.0, 4.0).ok());
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("BINARY".parse::<VisibilityScheme>(), Ok(VisibilityScheme::Binary));
        assert_eq!("ternary".parse::<VisibilityScheme>(), Ok(VisibilityScheme::Ternary));
        assert!("quaternary".parse::<VisibilityScheme>().is_err());
    }
}
