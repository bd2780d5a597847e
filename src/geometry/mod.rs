//! The geometric kernel.
//!
//! Every type here is an immutable value: constructors validate their input
//! once and either return a fully valid object or a [`GeometryError`].
//! Nothing in this module performs I/O or holds shared state.
//!
//! # Example
//!
//! ```
//! use annokit::geometry::{rle, BinaryMask, Box2D, Polygon, Vector2D};
//!
//! let by_corners = Box2D::from_xyxy(10.0, 20.0, 40.0, 60.0).unwrap();
//! let by_size = Box2D::from_xywh(10.0, 20.0, 30.0, 40.0).unwrap();
//! assert_eq!(by_corners, by_size);
//! assert_eq!(by_corners.area(), 1200.0);
//!
//! let square = Polygon::new(vec![
//!     Vector2D::new(0.0, 0.0),
//!     Vector2D::new(1.0, 0.0),
//!     Vector2D::new(1.0, 1.0),
//!     Vector2D::new(0.0, 1.0),
//! ])
//! .unwrap();
//! assert_eq!(square.area(), 1.0);
//!
//! let mask = BinaryMask::from_rows(&[vec![true, false], vec![false, true]]).unwrap();
//! let runs = rle::encode(&mask);
//! assert_eq!(runs.counts(), &[0, 1, 2, 1]);
//! assert_eq!(rle::decode(&runs, 2, 2).unwrap(), mask);
//! ```

mod box2d;
mod box3d;
mod keypoints;
mod polygon;
pub mod polyline;
pub mod rle;
mod rotation;
mod transform;
mod vector;

pub use crate::error::GeometryError;
pub use box2d::Box2D;
pub use box3d::Box3D;
pub use keypoints::{Keypoint2D, Keypoints2D, Visibility, VisibilityScheme};
pub use polygon::{MultiPolygon, PlanarRegion, Polygon};
pub use polyline::{
    frechet_distance, similarity, uniform_frechet_distance, CurvePointType, MultiPolyline2D,
    Polyline2D,
};
pub use rle::{BinaryMask, Rle};
pub use rotation::Rotation;
pub use transform::Transform3D;
pub use vector::{Vector2D, Vector3D};
