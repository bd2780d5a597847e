//! Label measurements.
//!
//! Computes area, volume and length for every label of a validated
//! [`LabelSet`] and aggregates them per category.

mod report;

pub use report::{CategoryTotals, LabelMeasure, MeasureReport};

use crate::label::{LabelSet, Labeled};
use crate::validation::LabelKind;

/// Measures every label in the set.
pub fn measure_labels(set: &LabelSet) -> MeasureReport {
    let mut labels = Vec::with_capacity(32);

    collect(&mut labels, LabelKind::Box2D, &set.box2d, |b| Quantities {
        points: 4,
        area: Some(b.area()),
        ..Default::default()
    });
    collect(&mut labels, LabelKind::Box3D, &set.box3d, |b| Quantities {
        points: 8,
        volume: Some(b.volume()),
        ..Default::default()
    });
    collect(&mut labels, LabelKind::Polygon, &set.polygon, |p| Quantities {
        points: p.len(),
        area: Some(p.area()),
        ..Default::default()
    });
    collect(
        &mut labels,
        LabelKind::MultiPolygon,
        &set.multi_polygon,
        |mp| Quantities {
            points: mp.iter().map(|p| p.len()).sum(),
            ..Default::default()
        },
    );
    collect(&mut labels, LabelKind::Rle, &set.rle, |rle| {
        let foreground = rle.foreground_area();
        Quantities {
            points: foreground as usize,
            area: Some(foreground as f64),
            ..Default::default()
        }
    });
    collect(&mut labels, LabelKind::Polyline2D, &set.polyline2d, |p| {
        Quantities {
            points: p.len(),
            length: Some(p.length()),
            ..Default::default()
        }
    });
    collect(
        &mut labels,
        LabelKind::MultiPolyline2D,
        &set.multi_polyline2d,
        |mp| Quantities {
            points: mp.iter().map(|p| p.len()).sum(),
            length: Some(mp.length()),
            ..Default::default()
        },
    );
    collect(&mut labels, LabelKind::Keypoints2D, &set.keypoints2d, |kp| {
        Quantities {
            points: kp.len(),
            ..Default::default()
        }
    });

    let mut report = MeasureReport::default();
    for m in &labels {
        *report.counts.entry(m.kind.to_string()).or_default() += 1;
        if let Some(category) = &m.category {
            report.categories.entry(category.clone()).or_default().add(m);
        }
    }
    report.labels = labels;
    report
}

#[derive(Default)]
struct Quantities {
    points: usize,
    area: Option<f64>,
    volume: Option<f64>,
    length: Option<f64>,
}

fn collect<G>(
    out: &mut Vec<LabelMeasure>,
    kind: LabelKind,
    labels: &[Labeled<G>],
    measure: impl Fn(&G) -> Quantities,
) {
    for (index, label) in labels.iter().enumerate() {
        let q = measure(&label.geometry);
        out.push(LabelMeasure {
            kind,
            index,
            category: label.meta.category.clone(),
            points: q.points,
            area: q.area,
            volume: q.volume,
            length: q.length,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Box2D, Box3D, MultiPolygon, Polygon, Rle, Rotation, Vector2D, Vector3D};
    use crate::label::LabelMeta;

    fn labeled<G>(geometry: G, category: &str) -> Labeled<G> {
        Labeled {
            geometry,
            meta: LabelMeta::with_category(category),
        }
    }

    fn sample_set() -> LabelSet {
        let square = Polygon::new(vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(2.0, 0.0),
            Vector2D::new(2.0, 2.0),
            Vector2D::new(0.0, 2.0),
        ])
        .unwrap();
        LabelSet {
            box2d: vec![
                labeled(Box2D::from_xywh(0.0, 0.0, 10.0, 5.0).unwrap(), "car"),
                labeled(Box2D::from_xywh(3.0, 3.0, 2.0, 2.0).unwrap(), "car"),
            ],
            box3d: vec![labeled(
                Box3D::new(
                    Vector3D::new(5.0, 5.0, 5.0),
                    Rotation::new(0.9, 0.1, -0.3, 0.2).unwrap(),
                    Vector3D::new(10.0, 20.0, 30.0),
                )
                .unwrap(),
                "truck",
            )],
            polygon: vec![labeled(square.clone(), "road")],
            multi_polygon: vec![labeled(MultiPolygon::new(vec![square.clone(), square]), "road")],
            rle: vec![labeled(Rle::new(vec![0, 3, 2, 4]), "road")],
            ..Default::default()
        }
    }

    #[test]
    fn test_per_label_quantities() {
        let report = measure_labels(&sample_set());
        assert_eq!(report.labels.len(), 6);
        assert_eq!(report.labels[0].area, Some(50.0));
        assert_eq!(report.labels[2].volume, Some(6000.0));
        assert_eq!(report.labels[3].area, Some(4.0));
        assert_eq!(report.labels[4].area, None);
        assert_eq!(report.labels[4].points, 8);
        assert_eq!(report.labels[5].area, Some(7.0));
    }

    #[test]
    fn test_category_totals() {
        let report = measure_labels(&sample_set());
        let car = &report.categories["car"];
        assert_eq!(car.labels, 2);
        assert_eq!(car.area, 54.0);
        assert_eq!(report.categories["truck"].volume, 6000.0);
        assert_eq!(report.categories["road"].area, 11.0);
        assert_eq!(report.counts["BOX2D"], 2);
    }

    #[test]
    fn test_display_lists_labels() {
        let text = measure_labels(&sample_set()).to_string();
        assert!(text.contains("Labels: 6"));
        assert!(text.contains("BOX3D[0] truck volume=6000.00"));
        assert!(text.contains("MULTI_POLYGON[0] road points=8"));
    }
}
