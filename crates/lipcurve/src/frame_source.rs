//! Seam to the external frame provider.
//!
//! Video decoding is not this crate's concern: anything that can hand
//! out RGB frames by index — a video decoder, an image sequence, a test
//! fixture — implements [`FrameSource`]. Frames must already be at the
//! processing resolution; resize policy belongs to the provider.

use image::RgbImage;

/// Errors raised at the frame-source boundary.
///
/// These never reach the segmentation or boundary stages; callers handle
/// them before invoking the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSourceError {
    /// The underlying media could not be opened.
    Open {
        /// Location of the media.
        path: String,
        /// Provider-specific failure description.
        reason: String,
    },
    /// The requested frame index is outside the source's range.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of frames the source holds.
        count: usize,
    },
}

impl std::fmt::Display for FrameSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, reason } => write!(f, "cannot open {}: {}", path, reason),
            Self::IndexOutOfRange { index, count } => {
                write!(f, "frame index {} out of range (source has {} frames)", index, count)
            }
        }
    }
}

impl std::error::Error for FrameSourceError {}

/// Supplier of decoded RGB frames by index.
///
/// Frame indices may arrive in any order (a position-slider jump selects
/// an arbitrary frame), so implementations must not assume sequential
/// access.
pub trait FrameSource {
    /// Total number of frames available.
    fn frame_count(&self) -> usize;

    /// Decode and return the frame at `index`.
    fn frame(&mut self, index: usize) -> Result<RgbImage, FrameSourceError>;
}
