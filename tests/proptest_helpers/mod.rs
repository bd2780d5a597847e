#![allow(dead_code)]

use std::collections::BTreeMap;

use annokit::geometry::{rle, BinaryMask, Polyline2D, Rle, Rotation, Vector2D, Vector3D};
use annokit::label::{
    Box2DLabel, Box2DRecord, Box3DLabel, Box3DRecord, KeypointRecord, Keypoints2DLabel,
    LabelDocument, LabelMeta, MultiPolygonLabel, MultiPolyline2DLabel, Polyline2DLabel,
    PolygonLabel, QuaternionRecord, RleLabel,
};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Coordinates stay within this range so distances stay well conditioned.
pub const COORD_RANGE: f64 = 1000.0;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_coord() -> impl Strategy<Value = f64> {
    -COORD_RANGE..COORD_RANGE
}

pub fn arb_point() -> impl Strategy<Value = Vector2D> {
    (arb_coord(), arb_coord()).prop_map(|(x, y)| Vector2D::new(x, y))
}

pub fn arb_vector3() -> impl Strategy<Value = Vector3D> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Vector3D::new(x, y, z))
}

pub fn arb_points(min: usize, max: usize) -> impl Strategy<Value = Vec<Vector2D>> {
    prop::collection::vec(arb_point(), min..=max)
}

pub fn arb_polyline(max_vertices: usize) -> impl Strategy<Value = Polyline2D> {
    arb_points(2, max_vertices.max(2))
        .prop_map(|vertices| Polyline2D::new(vertices).expect("finite points, 2+ vertices"))
}

/// Unit quaternion components, normalised so the kernel stores them as given.
pub fn arb_unit_quaternion() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64)
        .prop_filter("quaternion too close to zero", |(w, x, y, z)| {
            (w * w + x * x + y * y + z * z).sqrt() > 0.1
        })
        .prop_map(|(w, x, y, z)| {
            let n = (w * w + x * x + y * y + z * z).sqrt();
            (w / n, x / n, y / n, z / n)
        })
}

pub fn arb_rotation() -> impl Strategy<Value = Rotation> {
    arb_unit_quaternion()
        .prop_map(|(w, x, y, z)| Rotation::new(w, x, y, z).expect("non-zero quaternion"))
}

pub fn arb_mask(max_width: usize, max_height: usize) -> BoxedStrategy<BinaryMask> {
    (0..=max_width, 0..=max_height)
        .prop_flat_map(|(width, height)| {
            prop::collection::vec(any::<bool>(), width * height).prop_map(move |pixels| {
                BinaryMask::from_pixels(width, height, pixels).expect("pixel count matches")
            })
        })
        .boxed()
}

/// Canonical run lists: positive runs, optionally led by a zero-length
/// background run. Returned with a one-row raster that they cover exactly.
pub fn arb_canonical_rle(max_runs: usize) -> impl Strategy<Value = (Rle, usize, usize)> {
    (
        any::<bool>(),
        prop::collection::vec(1u64..50, 1..=max_runs.max(1)),
    )
        .prop_map(|(leading_foreground, runs)| {
            let mut counts = Vec::with_capacity(runs.len() + 1);
            if leading_foreground {
                counts.push(0);
            }
            counts.extend(runs);
            let total: u64 = counts.iter().sum();
            (Rle::new(counts), total as usize, 1)
        })
}

fn arb_meta() -> impl Strategy<Value = LabelMeta> {
    (
        prop::option::of(prop::sample::select(vec!["car", "person", "road", "lane"])),
        prop::option::of(any::<bool>()),
        prop::option::of(0u32..5),
    )
        .prop_map(|(category, occluded, instance)| {
            let mut attributes = BTreeMap::new();
            if let Some(occluded) = occluded {
                attributes.insert("occluded".to_string(), serde_json::Value::Bool(occluded));
            }
            LabelMeta {
                category: category.map(str::to_string),
                attributes,
                instance: instance.map(|i| i.to_string()),
            }
        })
}

fn arb_box2d_label() -> impl Strategy<Value = Box2DLabel> {
    (arb_point(), 0.0..100.0f64, 0.0..100.0f64, arb_meta()).prop_map(|(tl, w, h, meta)| {
        Box2DLabel {
            box2d: Box2DRecord {
                xmin: tl.x,
                ymin: tl.y,
                xmax: tl.x + w,
                ymax: tl.y + h,
            },
            meta,
        }
    })
}

fn arb_box3d_label() -> impl Strategy<Value = Box3DLabel> {
    (
        arb_vector3(),
        arb_unit_quaternion(),
        (0.0..50.0f64, 0.0..50.0f64, 0.0..50.0f64),
        arb_meta(),
    )
        .prop_map(|(translation, (w, x, y, z), (sx, sy, sz), meta)| Box3DLabel {
            box3d: Box3DRecord {
                translation,
                rotation: QuaternionRecord { w, x, y, z },
                size: Vector3D::new(sx, sy, sz),
            },
            meta,
        })
}

fn arb_keypoints_label() -> impl Strategy<Value = Keypoints2DLabel> {
    (
        prop::collection::vec((arb_point(), prop::option::of(0u8..=2)), 0..6),
        arb_meta(),
    )
        .prop_map(|(points, meta)| Keypoints2DLabel {
            keypoints2d: points
                .into_iter()
                .map(|(p, v)| KeypointRecord { x: p.x, y: p.y, v })
                .collect(),
            meta,
        })
}

/// Documents whose every label is valid under the ternary visibility scheme
/// with non-Bézier polylines.
pub fn arb_valid_document() -> BoxedStrategy<LabelDocument> {
    (
        prop::collection::vec(arb_box2d_label(), 0..4),
        prop::collection::vec(arb_box3d_label(), 0..3),
        prop::collection::vec((arb_points(0, 6), arb_meta()), 0..3),
        prop::collection::vec((prop::collection::vec(arb_points(3, 5), 0..3), arb_meta()), 0..2),
        prop::collection::vec((arb_mask(6, 6), arb_meta()), 0..2),
        prop::collection::vec((arb_points(2, 6), arb_meta()), 0..3),
        prop::collection::vec((prop::collection::vec(arb_points(2, 4), 0..3), arb_meta()), 0..2),
        prop::collection::vec(arb_keypoints_label(), 0..3),
    )
        .prop_map(
            |(box2d, box3d, polygons, multi_polygons, masks, polylines, multi_polylines, keypoints2d)| {
                // All RLE labels in one document share its raster; resize
                // every mask to the first one's shape by re-encoding.
                let raster = masks.first().map(|(m, _)| (m.width(), m.height()));
                let rle = masks
                    .into_iter()
                    .map(|(mask, meta)| {
                        let (width, height) = raster.unwrap_or((0, 0));
                        let mut pixels = mask.pixels().to_vec();
                        pixels.resize(width * height, false);
                        let mask = BinaryMask::from_pixels(width, height, pixels)
                            .expect("resized to raster");
                        RleLabel {
                            rle: rle::encode(&mask).into_counts(),
                            meta,
                        }
                    })
                    .collect();

                LabelDocument {
                    width: raster.map(|(w, _)| w as u32),
                    height: raster.map(|(_, h)| h as u32),
                    box2d,
                    box3d,
                    polygon: polygons
                        .into_iter()
                        .map(|(polygon, meta)| PolygonLabel { polygon, meta })
                        .collect(),
                    multi_polygon: multi_polygons
                        .into_iter()
                        .map(|(multi_polygon, meta)| MultiPolygonLabel {
                            multi_polygon,
                            meta,
                        })
                        .collect(),
                    rle,
                    polyline2d: polylines
                        .into_iter()
                        .map(|(polyline2d, meta)| Polyline2DLabel {
                            polyline2d,
                            beizer_point_types: None,
                            meta,
                        })
                        .collect(),
                    multi_polyline2d: multi_polylines
                        .into_iter()
                        .map(|(multi_polyline2d, meta)| MultiPolyline2DLabel {
                            multi_polyline2d,
                            meta,
                        })
                        .collect(),
                    keypoints2d,
                }
            },
        )
        .boxed()
}
