//! Wire model for label documents.
//!
//! These records mirror the JSON field names exactly and accept anything that
//! parses, including geometry the kernel would reject. Turning a record into
//! a kernel type is done by [`LabelSet::from_document`](super::LabelSet) or by
//! validation, which reports every problem instead of stopping at the first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::{Vector2D, Vector3D};

/// All labels attached to one data item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelDocument {
    /// Raster width of the data item, needed to check RLE labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Raster height of the data item, needed to check RLE labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(rename = "BOX2D", default, skip_serializing_if = "Vec::is_empty")]
    pub box2d: Vec<Box2DLabel>,

    #[serde(rename = "BOX3D", default, skip_serializing_if = "Vec::is_empty")]
    pub box3d: Vec<Box3DLabel>,

    #[serde(rename = "POLYGON", default, skip_serializing_if = "Vec::is_empty")]
    pub polygon: Vec<PolygonLabel>,

    #[serde(rename = "MULTI_POLYGON", default, skip_serializing_if = "Vec::is_empty")]
    pub multi_polygon: Vec<MultiPolygonLabel>,

    #[serde(rename = "RLE", default, skip_serializing_if = "Vec::is_empty")]
    pub rle: Vec<RleLabel>,

    #[serde(rename = "POLYLINE2D", default, skip_serializing_if = "Vec::is_empty")]
    pub polyline2d: Vec<Polyline2DLabel>,

    #[serde(
        rename = "MULTI_POLYLINE2D",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub multi_polyline2d: Vec<MultiPolyline2DLabel>,

    #[serde(rename = "KEYPOINTS2D", default, skip_serializing_if = "Vec::is_empty")]
    pub keypoints2d: Vec<Keypoints2DLabel>,
}

impl LabelDocument {
    /// Total number of labels of every kind.
    pub fn label_count(&self) -> usize {
        self.box2d.len()
            + self.box3d.len()
            + self.polygon.len()
            + self.multi_polygon.len()
            + self.rle.len()
            + self.polyline2d.len()
            + self.multi_polyline2d.len()
            + self.keypoints2d.len()
    }
}

/// Fields shared by every label and passed through uninterpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,

    /// Tracking identity across frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl LabelMeta {
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2DRecord {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuaternionRecord {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for QuaternionRecord {
    fn default() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box3DRecord {
    pub translation: Vector3D,
    #[serde(default)]
    pub rotation: QuaternionRecord,
    pub size: Vector3D,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeypointRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2DLabel {
    pub box2d: Box2DRecord,
    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box3DLabel {
    pub box3d: Box3DRecord,
    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonLabel {
    pub polygon: Vec<Vector2D>,
    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygonLabel {
    #[serde(rename = "multiPolygon")]
    pub multi_polygon: Vec<Vec<Vector2D>>,
    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RleLabel {
    pub rle: Vec<u64>,
    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline2DLabel {
    pub polyline2d: Vec<Vector2D>,

    /// One `V` (vertex) or `C` (control point) per vertex for Bézier curves.
    #[serde(
        rename = "beizerPointTypes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub beizer_point_types: Option<String>,

    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolyline2DLabel {
    #[serde(rename = "multiPolyline2d")]
    pub multi_polyline2d: Vec<Vec<Vector2D>>,
    #[serde(flatten)]
    pub meta: LabelMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoints2DLabel {
    pub keypoints2d: Vec<KeypointRecord>,
    #[serde(flatten)]
    pub meta: LabelMeta,
}
