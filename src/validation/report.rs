//! Validation report types for structured error reporting.
//!
//! This module provides rich, structured validation results that can be
//! displayed to users, written as JSON, or processed programmatically.

use serde::Serialize;
use std::fmt;

use crate::geometry::GeometryError;

/// The result of validating a label document.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }

    /// Maps a kernel construction failure to an error issue.
    pub fn from_geometry_error(err: &GeometryError, context: IssueContext) -> Self {
        let code = match err {
            GeometryError::Validation(_) => IssueCode::InvalidGeometry,
            GeometryError::ShapeMismatch { .. } => IssueCode::RleShapeMismatch,
            GeometryError::InvalidRotation(_) => IssueCode::InvalidRotation,
        };
        Self::error(code, err.to_string(), context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Representable, but probably not what the annotator meant.
    Warning,
    /// The kernel refuses to construct the label.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Construction failures
    /// Malformed shape: vertex count, tag length, visibility code, ordering.
    InvalidGeometry,
    /// A 3D box rotation is degenerate.
    InvalidRotation,
    /// RLE runs do not cover the declared raster.
    RleShapeMismatch,

    // Suspicious but valid geometry
    /// An RLE contains a zero-length run after the first position.
    NonCanonicalRle,
    /// A polygon has fewer than three vertices.
    DegeneratePolygon,
    /// A box or polygon encloses no area, or a 3D box has no volume.
    ZeroArea,
    /// Geometry extends outside the declared raster.
    OutOfBounds,
    /// A multi-geometry label has no members.
    EmptyGeometry,

    // Document issues
    /// RLE labels are present but the document has no width/height.
    MissingRasterSize,
    /// A label has an empty category string.
    EmptyCategory,
    /// Two labels of the same kind share a tracking instance.
    DuplicateInstance,
}

/// The kind of label an issue refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LabelKind {
    Box2D,
    Box3D,
    Polygon,
    MultiPolygon,
    Rle,
    Polyline2D,
    MultiPolyline2D,
    Keypoints2D,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelKind::Box2D => "BOX2D",
            LabelKind::Box3D => "BOX3D",
            LabelKind::Polygon => "POLYGON",
            LabelKind::MultiPolygon => "MULTI_POLYGON",
            LabelKind::Rle => "RLE",
            LabelKind::Polyline2D => "POLYLINE2D",
            LabelKind::MultiPolyline2D => "MULTI_POLYLINE2D",
            LabelKind::Keypoints2D => "KEYPOINTS2D",
        };
        f.write_str(name)
    }
}

/// Context about where a validation issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum IssueContext {
    /// Issue with the document as a whole.
    Document,
    /// Issue with one label, addressed by kind and position.
    Label { kind: LabelKind, index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Document => write!(f, "document"),
            IssueContext::Label { kind, index } => write!(f, "{}[{}]", kind, index),
        }
    }
}
