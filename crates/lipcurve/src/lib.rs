//! lipcurve — per-frame lip boundary extraction from RGB video frames.
//!
//! The pipeline stages, run independently for every frame:
//!
//! 1. **Segment** – log red/green ratio field, rank-order adaptive
//!    threshold, largest-8-connected-component isolation.
//! 2. **Boundary** – per-column scan converting the binary lips mask into
//!    an ordered sequence of upper/lower boundary points that a line
//!    renderer can draw as one connected loop.
//!
//! # Public API
//! - [`analyze_frame`] with [`AnalyzeConfig`] as the per-frame entry point
//! - [`segment_lips`] / [`extract_boundary`] for the individual stages
//! - [`FrameSource`] as the seam to an external frame provider
//! - [`debug_dump`] for write-only text dumps of intermediate grids
//!
//! No state is carried between frames: an arbitrary frame index selected
//! out of order (a position-slider jump) reruns the same pure pipeline,
//! and distinct frames can be processed concurrently without locking.

mod boundary;
pub mod debug_dump;
mod frame_source;
mod pipeline;
mod region;
mod segment;
#[cfg(test)]
mod test_utils;

pub use boundary::{
    extract_boundary, BoundaryConfig, BoundaryCurve, BoundaryError, CurvePoint,
};
pub use frame_source::{FrameSource, FrameSourceError};
pub use pipeline::{analyze_frame, AnalyzeConfig, AnalyzeError};
pub use region::{label_components, LabelGrid};
pub use segment::{
    rank_threshold, ratio_field, segment_lips, threshold_mask, RatioField, SegmentConfig,
    SegmentError,
};

use image::GrayImage;

/// Full analysis result for a single frame.
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// Binary lips mask (0 = background, 255 = lips), for the debug view.
    pub mask: GrayImage,
    /// Ordered boundary points for curve rendering, in mask pixel space.
    pub curve: BoundaryCurve,
    /// Pixel population of the retained lip component.
    pub lip_pixel_count: usize,
    /// Frame dimensions [width, height].
    pub image_size: [u32; 2],
}

/// Serializable projection of [`FrameAnalysis`] for result reporting.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisReport {
    /// Frame dimensions [width, height].
    pub image_size: [u32; 2],
    /// Pixel population of the retained lip component.
    pub lip_pixel_count: usize,
    /// Ordered boundary points.
    pub curve: BoundaryCurve,
}

impl AnalysisReport {
    /// Construct an empty report for a frame with the provided dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            image_size: [width, height],
            lip_pixel_count: 0,
            curve: BoundaryCurve::default(),
        }
    }
}

impl From<&FrameAnalysis> for AnalysisReport {
    fn from(analysis: &FrameAnalysis) -> Self {
        Self {
            image_size: analysis.image_size,
            lip_pixel_count: analysis.lip_pixel_count,
            curve: analysis.curve.clone(),
        }
    }
}
