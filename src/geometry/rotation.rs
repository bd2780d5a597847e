//! Unit-quaternion rotations.

use nalgebra::{Matrix3, Quaternion, Rotation3, UnitQuaternion};

use super::vector::Vector3D;
use crate::error::GeometryError;

/// Norms below this are treated as a degenerate (zero) quaternion.
const DEGENERATE_NORM: f64 = 1e-9;

/// Inputs whose norm is this close to one are stored as given.
const UNIT_NORM_TOLERANCE: f64 = 1e-12;

/// Tolerance used when checking that a matrix is a proper rotation.
const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// A 3D orientation stored as a unit quaternion `{w, x, y, z}`.
///
/// The unit norm is established once at construction. Inputs that are already
/// unit length (within floating tolerance) are stored bit-for-bit, so values
/// read from a label file are written back unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation(UnitQuaternion<f64>);

impl Rotation {
    /// Creates a rotation from quaternion components.
    ///
    /// # Errors
    /// Returns [`GeometryError::InvalidRotation`] if any component is
    /// non-finite or the quaternion norm is (near) zero.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Result<Self, GeometryError> {
        let q = Quaternion::new(w, x, y, z);
        if !(w.is_finite() && x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(GeometryError::InvalidRotation(format!(
                "non-finite quaternion ({w}, {x}, {y}, {z})"
            )));
        }

        let norm = q.norm();
        if norm <= DEGENERATE_NORM {
            return Err(GeometryError::InvalidRotation(format!(
                "quaternion ({w}, {x}, {y}, {z}) has near-zero norm {norm:e}"
            )));
        }

        if (norm - 1.0).abs() <= UNIT_NORM_TOLERANCE {
            return Ok(Self(UnitQuaternion::new_unchecked(q)));
        }

        // Scale by the largest component first so the norm cannot overflow.
        let largest = w.abs().max(x.abs()).max(y.abs()).max(z.abs());
        Ok(Self(UnitQuaternion::new_normalize(q / largest)))
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self(UnitQuaternion::identity())
    }

    /// Creates a rotation from a row-major 3x3 rotation matrix.
    ///
    /// # Errors
    /// Returns [`GeometryError::InvalidRotation`] if the matrix is not
    /// orthonormal with a positive determinant.
    pub fn from_matrix(rows: &[[f64; 3]; 3]) -> Result<Self, GeometryError> {
        let m = Matrix3::from_fn(|r, c| rows[r][c]);
        if m.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidRotation(
                "rotation matrix has non-finite entries".into(),
            ));
        }

        let drift = (m * m.transpose() - Matrix3::identity()).norm();
        if drift > ORTHONORMAL_TOLERANCE || m.determinant() <= 0.0 {
            return Err(GeometryError::InvalidRotation(format!(
                "matrix is not a proper rotation (orthonormality drift {drift:e}, det {})",
                m.determinant()
            )));
        }

        let rotation = Rotation3::from_matrix_unchecked(m);
        Ok(Self(UnitQuaternion::from_rotation_matrix(&rotation)))
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.0.w
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.i
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.j
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.k
    }

    /// Applies the rotation to a vector.
    pub fn rotate(&self, vector: Vector3D) -> Vector3D {
        Vector3D::from_na(self.0.transform_vector(&vector.to_na()))
    }

    /// Returns the Hamilton product `self * other`.
    ///
    /// The result rotates by `other` first, then by `self`.
    pub fn compose(&self, other: &Rotation) -> Rotation {
        Self(self.0 * other.0)
    }

    /// Returns the conjugate, which is the inverse for a unit quaternion.
    pub fn inverse(&self) -> Rotation {
        Self(self.0.conjugate())
    }

    /// Returns the row-major 3x3 rotation matrix.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        let m = self.0.to_rotation_matrix();
        let m = m.matrix();
        std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)]))
    }

    /// Angle in radians of the rotation taking `self` to `other`.
    pub fn angle_to(&self, other: &Rotation) -> f64 {
        self.0.angle_to(&other.0)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}
