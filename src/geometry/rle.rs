//! Run-length encoding of binary rasters.
//!
//! Runs alternate background/foreground and always start with background, so
//! a mask whose first pixel is foreground encodes with a leading zero-length
//! run. Rasters are flattened row-major. Run lists carry no dimensions; the
//! caller supplies width and height when decoding.

use crate::error::GeometryError;

/// A row-major boolean raster.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl BinaryMask {
    /// Creates an all-background mask.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Creates a mask from a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`GeometryError::ShapeMismatch`] if the buffer length is not
    /// `width * height`.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<bool>,
    ) -> Result<Self, GeometryError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(GeometryError::ShapeMismatch {
                expected: expected as u64,
                actual: pixels.len() as u64,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a mask from a list of rows.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if the rows are ragged.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GeometryError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(idx) = rows.iter().position(|row| row.len() != width) {
            return Err(GeometryError::validation(format!(
                "mask row {idx} has {} pixel(s), expected {width}",
                rows[idx].len()
            )));
        }
        Ok(Self {
            width,
            height: rows.len(),
            pixels: rows.concat(),
        })
    }

    /// Selects the pixels of one label value from a single-channel raster.
    ///
    /// Works for both 8-bit and 16-bit label images.
    pub fn from_label_raster<T>(
        width: usize,
        height: usize,
        raster: &[T],
        label: T,
    ) -> Result<Self, GeometryError>
    where
        T: Copy + PartialEq,
    {
        let pixels = raster.iter().map(|&value| value == label).collect();
        Self::from_pixels(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Returns the pixel at (x, y), or `None` when out of range.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Splits the mask back into rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.pixels.chunks(self.width).map(<[bool]>::to_vec).collect()
    }
}

impl std::fmt::Debug for BinaryMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("foreground", &self.count())
            .finish()
    }
}

/// Alternating background/foreground run lengths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rle {
    counts: Vec<u64>,
}

impl Rle {
    pub fn new(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }

    /// Total number of pixels covered by the runs.
    ///
    /// # Errors
    /// Returns [`GeometryError::Validation`] if the runs do not fit in a
    /// 64-bit pixel count.
    pub fn total(&self) -> Result<u64, GeometryError> {
        self.counts
            .iter()
            .try_fold(0u64, |acc, &run| acc.checked_add(run))
            .ok_or_else(|| {
                GeometryError::validation("RLE run lengths overflow a 64-bit pixel count")
            })
    }

    /// Number of foreground pixels (sum of the odd-indexed runs).
    ///
    /// Saturates for runs whose [`total`](Self::total) is out of range.
    pub fn foreground_area(&self) -> u64 {
        self.counts
            .iter()
            .skip(1)
            .step_by(2)
            .fold(0u64, |acc, &run| acc.saturating_add(run))
    }

    /// Returns true if this is exactly what [`encode`] would produce.
    ///
    /// Only the first run may be zero; a zero run anywhere else would merge
    /// two runs of the same polarity.
    pub fn is_canonical(&self) -> bool {
        self.counts.iter().skip(1).all(|&run| run > 0)
            && !(self.counts.len() == 1 && self.counts[0] == 0)
    }
}

impl From<Vec<u64>> for Rle {
    fn from(counts: Vec<u64>) -> Self {
        Self::new(counts)
    }
}

/// Encodes a mask into run lengths.
pub fn encode(mask: &BinaryMask) -> Rle {
    let mut counts = Vec::new();
    let mut current = false;
    let mut run = 0u64;

    for &pixel in mask.pixels() {
        if pixel != current {
            counts.push(run);
            current = pixel;
            run = 0;
        }
        run += 1;
    }
    if run > 0 {
        counts.push(run);
    }

    Rle::new(counts)
}

/// Decodes run lengths into a `width` x `height` mask.
///
/// # Errors
/// Returns [`GeometryError::ShapeMismatch`] if the runs do not sum to
/// `width * height`, and [`GeometryError::Validation`] if either count is
/// too large to represent.
pub fn decode(rle: &Rle, width: usize, height: usize) -> Result<BinaryMask, GeometryError> {
    let expected = raster_size(width, height)?;
    let actual = rle.total()?;
    if actual != expected {
        return Err(GeometryError::ShapeMismatch { expected, actual });
    }

    let mut pixels = Vec::with_capacity(width * height);
    let mut value = false;
    for &run in rle.counts() {
        pixels.extend(std::iter::repeat_n(value, run as usize));
        value = !value;
    }

    BinaryMask::from_pixels(width, height, pixels)
}

/// Pixel count of a `width` x `height` raster.
pub(crate) fn raster_size(width: usize, height: usize) -> Result<u64, GeometryError> {
    (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| GeometryError::validation(format!("raster {width}x{height} is too large")))
}
