//! Label documents: the JSON wire form of the labels on one data item.
//!
//! The wire model ([`LabelDocument`]) is permissive so that validation can
//! report problems label by label. [`LabelSet`] is the strict counterpart,
//! holding kernel geometry for every label.

mod convert;
pub mod io_json;
mod model;

pub use convert::{
    box2d_from_record, box2d_to_record, box3d_from_record, box3d_to_record,
    keypoints_from_record, keypoints_to_record, multi_polygon_from_record,
    multi_polyline_from_record, polygon_from_record, polyline_from_record, raster_size,
    rle_from_record, LabelContext, LabelSet, Labeled,
};
pub use model::{
    Box2DLabel, Box2DRecord, Box3DLabel, Box3DRecord, KeypointRecord, Keypoints2DLabel,
    LabelDocument, LabelMeta, MultiPolygonLabel, MultiPolyline2DLabel, Polyline2DLabel,
    PolygonLabel, QuaternionRecord, RleLabel,
};
