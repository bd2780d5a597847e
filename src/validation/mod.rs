//! Label document validation.
//!
//! Every label is pushed through the strict kernel constructors. Construction
//! failures become errors; geometry that constructs but looks wrong (zero
//! area, outside the raster, non-canonical runs) becomes a warning. Unlike
//! [`LabelSet::from_document`](crate::label::LabelSet::from_document), this
//! keeps going after the first problem.

mod report;

pub use report::{IssueCode, IssueContext, LabelKind, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::geometry::{Box2D, GeometryError, Vector2D};
use crate::label::{self, LabelContext, LabelDocument, LabelMeta};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,

    /// Catalog settings used to interpret the labels.
    pub context: LabelContext,
}

/// Slack allowed when checking geometry against the raster bounds.
const BOUNDS_TOLERANCE: f64 = 0.5;

/// Validates a label document and returns a report of all issues found.
pub fn validate_document(doc: &LabelDocument, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();
    let raster = label::raster_size(doc);
    let ctx = &opts.context;

    validate_document_fields(doc, &mut report);
    if !doc.rle.is_empty() && raster.is_none() {
        report_missing_raster(doc, &mut report);
    }

    let mut check = Checker {
        report: &mut report,
        raster,
    };

    for (index, l) in doc.box2d.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::Box2D,
            index,
        };
        check.meta(&l.meta, &at);
        if let Some(b) = check.built(label::box2d_from_record(&l.box2d), &at) {
            if b.area() == 0.0 {
                check.warn(IssueCode::ZeroArea, "box has zero area", &at);
            }
            check.bounds(Some(b), &at);
        }
    }

    for (index, l) in doc.box3d.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::Box3D,
            index,
        };
        check.meta(&l.meta, &at);
        if let Some(b) = check.built(label::box3d_from_record(&l.box3d), &at) {
            if b.volume() == 0.0 {
                check.warn(IssueCode::ZeroArea, "3D box has zero volume", &at);
            }
        }
    }

    for (index, l) in doc.polygon.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::Polygon,
            index,
        };
        check.meta(&l.meta, &at);
        if let Some(p) = check.built(label::polygon_from_record(&l.polygon), &at) {
            if p.is_degenerate() {
                check.warn(
                    IssueCode::DegeneratePolygon,
                    format!("polygon has {} vertex(es), needs at least 3", p.len()),
                    &at,
                );
            } else if p.area() == 0.0 {
                check.warn(IssueCode::ZeroArea, "polygon has zero area", &at);
            }
            check.bounds(p.bounds(), &at);
        }
    }

    for (index, l) in doc.multi_polygon.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::MultiPolygon,
            index,
        };
        check.meta(&l.meta, &at);
        if let Some(mp) = check.built(label::multi_polygon_from_record(&l.multi_polygon), &at) {
            if mp.is_empty() {
                check.warn(IssueCode::EmptyGeometry, "multi-polygon has no polygons", &at);
            }
            if let Some(idx) = mp.iter().position(|p| p.is_degenerate()) {
                check.warn(
                    IssueCode::DegeneratePolygon,
                    format!("member polygon {idx} has fewer than 3 vertices"),
                    &at,
                );
            }
            check.bounds(mp.bounds(), &at);
        }
    }

    for (index, l) in doc.rle.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::Rle,
            index,
        };
        check.meta(&l.meta, &at);
        if let Some(rle) = check.built(label::rle_from_record(&l.rle, raster), &at) {
            if !rle.is_canonical() {
                check.warn(
                    IssueCode::NonCanonicalRle,
                    "RLE has a zero-length run that re-encoding would merge",
                    &at,
                );
            }
        }
    }

    for (index, l) in doc.polyline2d.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::Polyline2D,
            index,
        };
        check.meta(&l.meta, &at);
        let built = label::polyline_from_record(
            &l.polyline2d,
            l.beizer_point_types.as_deref(),
            ctx.bezier_curve,
        );
        if let Some(p) = check.built(built, &at) {
            check.bounds(p.bounds(), &at);
        }
    }

    for (index, l) in doc.multi_polyline2d.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::MultiPolyline2D,
            index,
        };
        check.meta(&l.meta, &at);
        let built = label::multi_polyline_from_record(&l.multi_polyline2d);
        if let Some(mp) = check.built(built, &at) {
            if mp.is_empty() {
                check.warn(IssueCode::EmptyGeometry, "multi-polyline has no polylines", &at);
            }
            check.bounds(mp.bounds(), &at);
        }
    }

    for (index, l) in doc.keypoints2d.iter().enumerate() {
        let at = IssueContext::Label {
            kind: LabelKind::Keypoints2D,
            index,
        };
        check.meta(&l.meta, &at);
        let built = label::keypoints_from_record(&l.keypoints2d, ctx.visibility);
        if let Some(kp) = check.built(built, &at) {
            check.bounds(kp.bounds(), &at);
        }
    }

    report
}

/// Document-level checks: duplicate tracking instances per label kind.
fn validate_document_fields(doc: &LabelDocument, report: &mut ValidationReport) {
    let kinds: [(LabelKind, Vec<&LabelMeta>); 8] = [
        (LabelKind::Box2D, doc.box2d.iter().map(|l| &l.meta).collect()),
        (LabelKind::Box3D, doc.box3d.iter().map(|l| &l.meta).collect()),
        (LabelKind::Polygon, doc.polygon.iter().map(|l| &l.meta).collect()),
        (
            LabelKind::MultiPolygon,
            doc.multi_polygon.iter().map(|l| &l.meta).collect(),
        ),
        (LabelKind::Rle, doc.rle.iter().map(|l| &l.meta).collect()),
        (
            LabelKind::Polyline2D,
            doc.polyline2d.iter().map(|l| &l.meta).collect(),
        ),
        (
            LabelKind::MultiPolyline2D,
            doc.multi_polyline2d.iter().map(|l| &l.meta).collect(),
        ),
        (
            LabelKind::Keypoints2D,
            doc.keypoints2d.iter().map(|l| &l.meta).collect(),
        ),
    ];

    for (kind, metas) in kinds {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, meta) in metas.into_iter().enumerate() {
            let Some(instance) = meta.instance.as_deref() else {
                continue;
            };
            if let Some(first) = seen.get(instance) {
                report.add(ValidationIssue::warning(
                    IssueCode::DuplicateInstance,
                    format!("instance '{}' already used by {}[{}]", instance, kind, first),
                    IssueContext::Label { kind, index },
                ));
            } else {
                seen.insert(instance, index);
            }
        }
    }
}

fn report_missing_raster(doc: &LabelDocument, report: &mut ValidationReport) {
    report.add(ValidationIssue::warning(
        IssueCode::MissingRasterSize,
        format!(
            "{} RLE label(s) but no width/height; run totals cannot be checked",
            doc.rle.len()
        ),
        IssueContext::Document,
    ));
}

/// Shared per-label checks.
struct Checker<'a> {
    report: &'a mut ValidationReport,
    raster: Option<(usize, usize)>,
}

impl Checker<'_> {
    /// Records a construction failure and returns the geometry on success.
    fn built<G>(&mut self, result: Result<G, GeometryError>, at: &IssueContext) -> Option<G> {
        match result {
            Ok(geometry) => Some(geometry),
            Err(err) => {
                self.report
                    .add(ValidationIssue::from_geometry_error(&err, at.clone()));
                None
            }
        }
    }

    fn warn(&mut self, code: IssueCode, message: impl Into<String>, at: &IssueContext) {
        self.report
            .add(ValidationIssue::warning(code, message, at.clone()));
    }

    fn meta(&mut self, meta: &LabelMeta, at: &IssueContext) {
        if meta.category.as_deref() == Some("") {
            self.warn(IssueCode::EmptyCategory, "empty category name", at);
        }
    }

    fn bounds(&mut self, bounds: Option<Box2D>, at: &IssueContext) {
        let (Some(b), Some((width, height))) = (bounds, self.raster) else {
            return;
        };
        let (w, h) = (width as f64, height as f64);
        let inside = |p: Vector2D| {
            p.x >= -BOUNDS_TOLERANCE
                && p.y >= -BOUNDS_TOLERANCE
                && p.x <= w + BOUNDS_TOLERANCE
                && p.y <= h + BOUNDS_TOLERANCE
        };
        if !inside(b.top_left()) || !inside(b.bottom_right()) {
            self.warn(
                IssueCode::OutOfBounds,
                format!(
                    "extent ({:.1}, {:.1}, {:.1}, {:.1}) extends outside the raster (0, 0, {}, {})",
                    b.xmin(),
                    b.ymin(),
                    b.xmax(),
                    b.ymax(),
                    width,
                    height
                ),
                at,
            );
        }
    }
}
