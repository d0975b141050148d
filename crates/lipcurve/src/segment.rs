//! Lip segmentation: log red/green ratio field with a rank-order
//! adaptive threshold, then largest-component isolation.
//!
//! Lip skin reflects proportionally more red against the green channel
//! than the surrounding face, so `ln(r / (g + eps))` separates the two
//! populations. The threshold is re-derived from the sorted ratio values
//! of every frame; absolute ratio magnitudes drift with lighting and
//! skin tone, so a fixed constant does not transfer across clips.

use image::{GrayImage, RgbImage};

use crate::region::{label_components, MASK_FG};

/// Guards the green channel against division by zero.
const RATIO_EPS: f32 = 1e-6;

/// Errors from the segmentation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// Threshold fraction outside the open interval (0, 1).
    InvalidThresholdFraction {
        /// The rejected value.
        got: f32,
    },
    /// The frame has zero pixels.
    EmptyFrame,
}

impl std::fmt::Display for SegmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidThresholdFraction { got } => {
                write!(f, "threshold fraction must lie strictly inside (0, 1), got {}", got)
            }
            Self::EmptyFrame => write!(f, "frame has no pixels"),
        }
    }
}

impl std::error::Error for SegmentError {}

/// Configuration for lip segmentation.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Fraction of pixels kept by the rank threshold, in (0, 1).
    /// Lower values keep a smaller, stricter lip region.
    pub threshold_fraction: f32,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.18,
        }
    }
}

/// Per-pixel `ln(r / (g + eps))` over a [0, 1]-normalized RGB frame.
#[derive(Debug, Clone)]
pub struct RatioField {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl RatioField {
    /// Field width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Field height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major ratio values, one per pixel.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Ratio value at pixel `(x, y)`.
    pub fn value(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.width + x) as usize]
    }
}

/// Compute the log red/green ratio field of an RGB frame.
///
/// A pure black pixel yields `-inf`; downstream ordering stays total, so
/// this is harmless.
///
/// # Errors
/// [`SegmentError::EmptyFrame`] for a zero-pixel frame.
pub fn ratio_field(frame: &RgbImage) -> Result<RatioField, SegmentError> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(SegmentError::EmptyFrame);
    }

    let mut values = Vec::with_capacity(width as usize * height as usize);
    for pixel in frame.pixels() {
        let r = pixel[0] as f32 / 255.0;
        let g = pixel[1] as f32 / 255.0;
        values.push((r / (g + RATIO_EPS)).ln());
    }

    Ok(RatioField {
        values,
        width,
        height,
    })
}

/// Rank-order threshold over a ratio field.
///
/// Sorts all values ascending and returns the value at index
/// `floor(N * (1 - fraction))`: strictly exceeding it keeps roughly the
/// top `fraction` of pixels. Adaptive per frame by construction.
///
/// # Errors
/// [`SegmentError::InvalidThresholdFraction`] unless `0 < fraction < 1`.
pub fn rank_threshold(field: &RatioField, fraction: f32) -> Result<f32, SegmentError> {
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(SegmentError::InvalidThresholdFraction { got: fraction });
    }

    let mut sorted = field.values().to_vec();
    sorted.sort_by(f32::total_cmp);
    let n = sorted.len();
    let cut = (n as f64 * (1.0 - f64::from(fraction))).floor() as usize;
    Ok(sorted[cut.min(n - 1)])
}

/// Binary mask of the pixels whose ratio strictly exceeds `threshold`.
pub fn threshold_mask(field: &RatioField, threshold: f32) -> GrayImage {
    let mut mask = GrayImage::new(field.width(), field.height());
    let buf = mask.as_mut();
    for (i, &v) in field.values().iter().enumerate() {
        if v > threshold {
            buf[i] = MASK_FG;
        }
    }
    mask
}

/// Segment the lips region of an RGB frame into a binary mask.
///
/// Thresholds the log red/green ratio field at a per-frame rank-order
/// threshold, then keeps only the largest 8-connected component. A frame
/// with no pixel above threshold yields an all-background mask; that is
/// a normal outcome (closed mouth, black frame), not an error.
///
/// Pure function of its inputs; the frame is never mutated.
///
/// # Errors
/// [`SegmentError::InvalidThresholdFraction`] for a fraction outside
/// (0, 1); [`SegmentError::EmptyFrame`] for a zero-pixel frame.
pub fn segment_lips(frame: &RgbImage, config: &SegmentConfig) -> Result<GrayImage, SegmentError> {
    let field = ratio_field(frame)?;
    let threshold = rank_threshold(&field, config.threshold_fraction)?;
    let raw = threshold_mask(&field, threshold);

    let grid = label_components(&raw);
    match grid.largest_component() {
        Some(label) => Ok(grid.component_mask(label)),
        None => Ok(GrayImage::new(field.width(), field.height())),
    }
}
