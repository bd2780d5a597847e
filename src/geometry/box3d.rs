//! Oriented 3D boxes.
//!
//! A box is the unit cube centred on the origin, scaled by `size` and then
//! posed by a [`Transform3D`]. Intersection and IoU of oriented boxes are not
//! provided.

use super::rotation::Rotation;
use super::transform::Transform3D;
use super::vector::Vector3D;
use crate::error::GeometryError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box3D {
    transform: Transform3D,
    size: Vector3D,
}

impl Box3D {
    /// Creates a box from a translation, rotation and size.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if the translation or size is not
    /// finite, or if any size component is negative.
    pub fn new(
        translation: Vector3D,
        rotation: Rotation,
        size: Vector3D,
    ) -> Result<Self, GeometryError> {
        Self::from_transform(Transform3D::new(translation, rotation)?, size)
    }

    /// Creates a box from the top three rows of a homogeneous pose matrix.
    pub fn from_matrix(rows: &[[f64; 4]; 3], size: Vector3D) -> Result<Self, GeometryError> {
        Self::from_transform(Transform3D::from_matrix(rows)?, size)
    }

    /// Creates a box from an existing pose.
    pub fn from_transform(transform: Transform3D, size: Vector3D) -> Result<Self, GeometryError> {
        if !size.is_finite() || size.x < 0.0 || size.y < 0.0 || size.z < 0.0 {
            return Err(GeometryError::validation(format!(
                "box size ({}, {}, {}) must be finite and non-negative",
                size.x, size.y, size.z
            )));
        }
        Ok(Self { transform, size })
    }

    #[inline]
    pub fn transform(&self) -> Transform3D {
        self.transform
    }

    #[inline]
    pub fn translation(&self) -> Vector3D {
        self.transform.translation()
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.transform.rotation()
    }

    #[inline]
    pub fn size(&self) -> Vector3D {
        self.size
    }

    /// Returns `size.x * size.y * size.z`; the pose does not matter.
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }

    /// The eight corners in world coordinates.
    ///
    /// Corner `i` takes the positive half-extent on x when bit 2 is set, on y
    /// when bit 1 is set and on z when bit 0 is set.
    pub fn corners(&self) -> [Vector3D; 8] {
        let half = self.size * 0.5;
        std::array::from_fn(|i| {
            let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
            let local = Vector3D::new(sign(4) * half.x, sign(2) * half.y, sign(1) * half.z);
            self.transform.apply(local)
        })
    }
}
