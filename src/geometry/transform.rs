//! Rigid-body poses.

use super::rotation::Rotation;
use super::vector::Vector3D;
use crate::error::GeometryError;

/// A rigid-body pose: rotate first, then translate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform3D {
    translation: Vector3D,
    rotation: Rotation,
}

impl Transform3D {
    /// Creates a transform from a translation and a rotation.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if the translation is not finite.
    pub fn new(translation: Vector3D, rotation: Rotation) -> Result<Self, GeometryError> {
        if !translation.is_finite() {
            return Err(GeometryError::validation(format!(
                "non-finite translation {translation:?}"
            )));
        }
        Ok(Self {
            translation,
            rotation,
        })
    }

    /// Creates a transform from the top three rows of a row-major 4x4
    /// homogeneous matrix.
    pub fn from_matrix(rows: &[[f64; 4]; 3]) -> Result<Self, GeometryError> {
        let linear: [[f64; 3]; 3] = std::array::from_fn(|r| [rows[r][0], rows[r][1], rows[r][2]]);
        let rotation = Rotation::from_matrix(&linear)?;
        let translation = Vector3D::new(rows[0][3], rows[1][3], rows[2][3]);
        Self::new(translation, rotation)
    }

    #[inline]
    pub fn translation(&self) -> Vector3D {
        self.translation
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Applies the pose to a point.
    pub fn apply(&self, point: Vector3D) -> Vector3D {
        self.rotation.rotate(point) + self.translation
    }

    /// Returns the pose equivalent to applying `other`, then `self`.
    pub fn compose(&self, other: &Transform3D) -> Transform3D {
        Self {
            translation: self.rotation.rotate(other.translation) + self.translation,
            rotation: self.rotation.compose(&other.rotation),
        }
    }

    pub fn inverse(&self) -> Transform3D {
        let rotation = self.rotation.inverse();
        Self {
            translation: -rotation.rotate(self.translation),
            rotation,
        }
    }

    /// Returns the row-major 4x4 homogeneous matrix.
    pub fn to_matrix(&self) -> [[f64; 4]; 4] {
        let r = self.rotation.to_matrix();
        let t = self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t.x],
            [r[1][0], r[1][1], r[1][2], t.y],
            [r[2][0], r[2][1], r[2][2], t.z],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn assert_vec_eq(a: Vector3D, b: Vector3D) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
    }

    fn sample() -> Transform3D {
        Transform3D::new(
            Vector3D::new(1.0, 2.0, 3.0),
            Rotation::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_apply_rotates_then_translates() {
        let p = sample().apply(Vector3D::new(1.0, 0.0, 0.0));
        assert_vec_eq(p, Vector3D::new(1.0, 3.0, 3.0));
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let a = sample();
        let b = Transform3D::new(
            Vector3D::new(-4.0, 0.5, 2.0),
            Rotation::new(0.9, 0.1, -0.3, 0.2).unwrap(),
        )
        .unwrap();
        let p = Vector3D::new(0.3, -1.2, 7.0);
        assert_vec_eq(a.compose(&b).apply(p), a.apply(b.apply(p)));
    }

    #[test]
    fn test_compose_translation_formula() {
        let a = sample();
        let b = Transform3D::new(Vector3D::new(1.0, 0.0, 0.0), Rotation::identity()).unwrap();
        let c = a.compose(&b);
        assert_vec_eq(c.translation(), Vector3D::new(1.0, 3.0, 3.0));
        assert_eq!(c.rotation(), a.rotation());
    }

    #[test]
    fn test_inverse_undoes_pose() {
        let t = sample();
        let p = Vector3D::new(5.0, -1.0, 0.25);
        assert_vec_eq(t.inverse().apply(t.apply(p)), p);
    }

    #[test]
    fn test_matrix_roundtrip() {
        let t = sample();
        let m = t.to_matrix();
        let rows = [m[0], m[1], m[2]];
        let restored = Transform3D::from_matrix(&rows).unwrap();
        assert_vec_eq(restored.translation(), t.translation());
        assert_relative_eq!(restored.rotation().angle_to(&t.rotation()), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_non_finite_translation_is_rejected() {
        let err = Transform3D::new(Vector3D::new(f64::NAN, 0.0, 0.0), Rotation::identity());
        assert!(matches!(err, Err(GeometryError::Validation(_))));
    }
}
