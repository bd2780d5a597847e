//! Measurement report types and terminal formatting.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::validation::LabelKind;

/// Per-label measurements for one document.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MeasureReport {
    /// Number of labels of each kind.
    pub counts: BTreeMap<String, usize>,
    /// One entry per label, in document order.
    pub labels: Vec<LabelMeasure>,
    /// Totals grouped by category name.
    pub categories: BTreeMap<String, CategoryTotals>,
}

/// Measurements of a single label.
///
/// Only the quantities that are well defined for the label's kind are set:
/// multi-polygons have no area because their members may overlap.
#[derive(Clone, Debug, Serialize)]
pub struct LabelMeasure {
    pub kind: LabelKind,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Vertices, keypoints or foreground pixels, depending on kind.
    pub points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

/// Sums over all labels sharing a category.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub labels: usize,
    pub area: f64,
    pub volume: f64,
    pub length: f64,
}

impl CategoryTotals {
    pub(crate) fn add(&mut self, m: &LabelMeasure) {
        self.labels += 1;
        self.area += m.area.unwrap_or(0.0);
        self.volume += m.volume.unwrap_or(0.0);
        self.length += m.length.unwrap_or(0.0);
    }
}

impl fmt::Display for MeasureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.counts.values().sum();
        writeln!(f, "Labels: {}", total)?;
        for (kind, count) in &self.counts {
            writeln!(f, "  {:<18} {}", kind, count)?;
        }

        if !self.labels.is_empty() {
            writeln!(f)?;
            writeln!(f, "Per label:")?;
            for m in &self.labels {
                write!(
                    f,
                    "  {}[{}] {}",
                    m.kind,
                    m.index,
                    m.category.as_deref().unwrap_or("-")
                )?;
                if let Some(area) = m.area {
                    write!(f, " area={:.2}", area)?;
                }
                if let Some(volume) = m.volume {
                    write!(f, " volume={:.2}", volume)?;
                }
                if let Some(length) = m.length {
                    write!(f, " length={:.2}", length)?;
                }
                writeln!(f, " points={}", m.points)?;
            }
        }

        if !self.categories.is_empty() {
            writeln!(f)?;
            writeln!(f, "Per category:")?;
            for (name, t) in &self.categories {
                writeln!(
                    f,
                    "  {:<18} labels={} area={:.2} volume={:.2} length={:.2}",
                    name, t.labels, t.area, t.volume, t.length
                )?;
            }
        }

        Ok(())
    }
}
