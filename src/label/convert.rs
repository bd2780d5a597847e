//! Conversions between wire records and kernel types.
//!
//! Each `*_from_record` is strict and each `*_to_record` is its exact
//! inverse for valid input, so a document survives
//! `LabelSet::from_document(..)?.to_document()` unchanged.

use crate::error::GeometryError;
use crate::geometry::{
    rle, Box2D, Box3D, CurvePointType, Keypoints2D, MultiPolygon, MultiPolyline2D, Polygon,
    Polyline2D, Rle, Rotation, Vector2D, VisibilityScheme,
};

use super::model::{
    Box2DLabel, Box2DRecord, Box3DLabel, Box3DRecord, KeypointRecord, Keypoints2DLabel,
    LabelDocument, LabelMeta, MultiPolygonLabel, MultiPolyline2DLabel, Polyline2DLabel,
    PolygonLabel, QuaternionRecord, RleLabel,
};

/// Settings the catalog supplies for interpreting a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelContext {
    /// How keypoint `v` codes are read. `None` means keypoints carry none.
    pub visibility: Option<VisibilityScheme>,

    /// Whether polylines describe Bézier curves and must carry point types.
    pub bezier_curve: bool,
}

/// A kernel geometry together with its pass-through fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Labeled<G> {
    pub geometry: G,
    pub meta: LabelMeta,
}

/// A fully validated label document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelSet {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub box2d: Vec<Labeled<Box2D>>,
    pub box3d: Vec<Labeled<Box3D>>,
    pub polygon: Vec<Labeled<Polygon>>,
    pub multi_polygon: Vec<Labeled<MultiPolygon>>,
    pub rle: Vec<Labeled<Rle>>,
    pub polyline2d: Vec<Labeled<Polyline2D>>,
    pub multi_polyline2d: Vec<Labeled<MultiPolyline2D>>,
    pub keypoints2d: Vec<Labeled<Keypoints2D>>,
}

impl LabelSet {
    /// Builds every label in `doc`, failing on the first invalid one.
    pub fn from_document(doc: &LabelDocument, ctx: &LabelContext) -> Result<Self, GeometryError> {
        fn build<R, G>(
            labels: &[R],
            f: impl Fn(&R) -> Result<(G, LabelMeta), GeometryError>,
        ) -> Result<Vec<Labeled<G>>, GeometryError> {
            labels
                .iter()
                .map(|label| f(label).map(|(geometry, meta)| Labeled { geometry, meta }))
                .collect()
        }

        let raster = raster_size(doc);
        Ok(Self {
            width: doc.width,
            height: doc.height,
            box2d: build(&doc.box2d, |l| Ok((box2d_from_record(&l.box2d)?, l.meta.clone())))?,
            box3d: build(&doc.box3d, |l| Ok((box3d_from_record(&l.box3d)?, l.meta.clone())))?,
            polygon: build(&doc.polygon, |l| {
                Ok((polygon_from_record(&l.polygon)?, l.meta.clone()))
            })?,
            multi_polygon: build(&doc.multi_polygon, |l| {
                Ok((multi_polygon_from_record(&l.multi_polygon)?, l.meta.clone()))
            })?,
            rle: build(&doc.rle, |l| Ok((rle_from_record(&l.rle, raster)?, l.meta.clone())))?,
            polyline2d: build(&doc.polyline2d, |l| {
                let polyline = polyline_from_record(
                    &l.polyline2d,
                    l.beizer_point_types.as_deref(),
                    ctx.bezier_curve,
                )?;
                Ok((polyline, l.meta.clone()))
            })?,
            multi_polyline2d: build(&doc.multi_polyline2d, |l| {
                Ok((
                    multi_polyline_from_record(&l.multi_polyline2d)?,
                    l.meta.clone(),
                ))
            })?,
            keypoints2d: build(&doc.keypoints2d, |l| {
                Ok((
                    keypoints_from_record(&l.keypoints2d, ctx.visibility)?,
                    l.meta.clone(),
                ))
            })?,
        })
    }

    /// Maps every label back to its wire record.
    pub fn to_document(&self) -> LabelDocument {
        LabelDocument {
            width: self.width,
            height: self.height,
            box2d: self
                .box2d
                .iter()
                .map(|l| Box2DLabel {
                    box2d: box2d_to_record(&l.geometry),
                    meta: l.meta.clone(),
                })
                .collect(),
            box3d: self
                .box3d
                .iter()
                .map(|l| Box3DLabel {
                    box3d: box3d_to_record(&l.geometry),
                    meta: l.meta.clone(),
                })
                .collect(),
            polygon: self
                .polygon
                .iter()
                .map(|l| PolygonLabel {
                    polygon: l.geometry.vertices().to_vec(),
                    meta: l.meta.clone(),
                })
                .collect(),
            multi_polygon: self
                .multi_polygon
                .iter()
                .map(|l| MultiPolygonLabel {
                    multi_polygon: l.geometry.iter().map(|p| p.vertices().to_vec()).collect(),
                    meta: l.meta.clone(),
                })
                .collect(),
            rle: self
                .rle
                .iter()
                .map(|l| RleLabel {
                    rle: l.geometry.counts().to_vec(),
                    meta: l.meta.clone(),
                })
                .collect(),
            polyline2d: self
                .polyline2d
                .iter()
                .map(|l| Polyline2DLabel {
                    polyline2d: l.geometry.vertices().to_vec(),
                    beizer_point_types: l.geometry.curve_points().map(CurvePointType::format_tags),
                    meta: l.meta.clone(),
                })
                .collect(),
            multi_polyline2d: self
                .multi_polyline2d
                .iter()
                .map(|l| MultiPolyline2DLabel {
                    multi_polyline2d: l.geometry.iter().map(|p| p.vertices().to_vec()).collect(),
                    meta: l.meta.clone(),
                })
                .collect(),
            keypoints2d: self
                .keypoints2d
                .iter()
                .map(|l| Keypoints2DLabel {
                    keypoints2d: keypoints_to_record(&l.geometry),
                    meta: l.meta.clone(),
                })
                .collect(),
        }
    }
}

/// Raster size declared by the document, if both sides are present.
pub fn raster_size(doc: &LabelDocument) -> Option<(usize, usize)> {
    Some((doc.width? as usize, doc.height? as usize))
}

pub fn box2d_from_record(record: &Box2DRecord) -> Result<Box2D, GeometryError> {
    Box2D::from_xyxy(record.xmin, record.ymin, record.xmax, record.ymax)
}

pub fn box2d_to_record(b: &Box2D) -> Box2DRecord {
    Box2DRecord {
        xmin: b.xmin(),
        ymin: b.ymin(),
        xmax: b.xmax(),
        ymax: b.ymax(),
    }
}

pub fn box3d_from_record(record: &Box3DRecord) -> Result<Box3D, GeometryError> {
    let q = record.rotation;
    let rotation = Rotation::new(q.w, q.x, q.y, q.z)?;
    Box3D::new(record.translation, rotation, record.size)
}

pub fn box3d_to_record(b: &Box3D) -> Box3DRecord {
    let r = b.rotation();
    Box3DRecord {
        translation: b.translation(),
        rotation: QuaternionRecord {
            w: r.w(),
            x: r.x(),
            y: r.y(),
            z: r.z(),
        },
        size: b.size(),
    }
}

pub fn polygon_from_record(vertices: &[Vector2D]) -> Result<Polygon, GeometryError> {
    Polygon::new(vertices.to_vec())
}

pub fn multi_polygon_from_record(
    polygons: &[Vec<Vector2D>],
) -> Result<MultiPolygon, GeometryError> {
    polygons
        .iter()
        .map(|p| polygon_from_record(p))
        .collect::<Result<Vec<_>, _>>()
        .map(MultiPolygon::new)
}

/// Builds an RLE, checking its coverage when the raster size is known.
pub fn rle_from_record(
    counts: &[u64],
    raster: Option<(usize, usize)>,
) -> Result<Rle, GeometryError> {
    let rle = Rle::new(counts.to_vec());
    let actual = rle.total()?;
    if let Some((width, height)) = raster {
        let expected = rle::raster_size(width, height)?;
        if actual != expected {
            return Err(GeometryError::ShapeMismatch { expected, actual });
        }
    }
    Ok(rle)
}

pub fn polyline_from_record(
    vertices: &[Vector2D],
    point_types: Option<&str>,
    bezier_curve: bool,
) -> Result<Polyline2D, GeometryError> {
    match (point_types, bezier_curve) {
        (Some(tags), true) => {
            Polyline2D::with_curve_points(vertices.to_vec(), CurvePointType::parse_tags(tags)?)
        }
        (None, false) => Polyline2D::new(vertices.to_vec()),
        (Some(_), false) => Err(GeometryError::validation(
            "beizerPointTypes given but polylines are not Bézier curves",
        )),
        (None, true) => Err(GeometryError::validation(
            "Bézier curve polyline is missing beizerPointTypes",
        )),
    }
}

pub fn multi_polyline_from_record(
    polylines: &[Vec<Vector2D>],
) -> Result<MultiPolyline2D, GeometryError> {
    polylines
        .iter()
        .map(|p| Polyline2D::new(p.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map(MultiPolyline2D::new)
}

pub fn keypoints_from_record(
    records: &[KeypointRecord],
    scheme: Option<VisibilityScheme>,
) -> Result<Keypoints2D, GeometryError> {
    let raw: Vec<(f64, f64, Option<u8>)> = records.iter().map(|k| (k.x, k.y, k.v)).collect();
    Keypoints2D::from_codes(&raw, scheme)
}

pub fn keypoints_to_record(keypoints: &Keypoints2D) -> Vec<KeypointRecord> {
    keypoints
        .iter()
        .zip(keypoints.codes())
        .map(|(k, v)| KeypointRecord { x: k.x, y: k.y, v })
        .collect()
}
