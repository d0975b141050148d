//! Per-frame orchestration: segmentation followed by boundary extraction.

use image::RgbImage;

use crate::boundary::{extract_boundary, BoundaryConfig, BoundaryError};
use crate::segment::{segment_lips, SegmentConfig, SegmentError};
use crate::FrameAnalysis;

/// Combined configuration for one frame analysis.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Segmentation stage configuration.
    pub segment: SegmentConfig,
    /// Boundary-extraction stage configuration.
    pub boundary: BoundaryConfig,
}

/// Errors from [`analyze_frame`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    /// The segmentation stage rejected its input or configuration.
    Segment(SegmentError),
    /// The boundary stage rejected its input or configuration.
    Boundary(BoundaryError),
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Segment(e) => write!(f, "segmentation failed: {}", e),
            Self::Boundary(e) => write!(f, "boundary extraction failed: {}", e),
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Segment(e) => Some(e),
            Self::Boundary(e) => Some(e),
        }
    }
}

impl From<SegmentError> for AnalyzeError {
    fn from(e: SegmentError) -> Self {
        Self::Segment(e)
    }
}

impl From<BoundaryError> for AnalyzeError {
    fn from(e: BoundaryError) -> Self {
        Self::Boundary(e)
    }
}

/// Run the full per-frame pipeline on an RGB frame.
///
/// Stateless: every invocation depends only on its own inputs, so
/// distinct frames may be processed concurrently without locking. A frame
/// with no detectable lips produces an empty curve, not an error.
///
/// # Errors
/// [`AnalyzeError`] wrapping the offending stage's validation failure.
pub fn analyze_frame(
    frame: &RgbImage,
    config: &AnalyzeConfig,
) -> Result<FrameAnalysis, AnalyzeError> {
    let image_size = [frame.width(), frame.height()];

    let mask = segment_lips(frame, &config.segment)?;
    let lip_pixel_count = mask.as_raw().iter().filter(|&&v| v != 0).count();
    tracing::debug!("lip component covers {} px", lip_pixel_count);

    let curve = extract_boundary(&mask, &config.boundary)?;
    tracing::info!(
        "boundary curve has {} points ({} upper)",
        curve.points.len(),
        curve.n_upper
    );

    Ok(FrameAnalysis {
        mask,
        curve,
        lip_pixel_count,
        image_size,
    })
}
