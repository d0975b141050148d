//! Boundary-point extraction from a binary lips mask.
//!
//! Sampled columns are scanned top to bottom. The first background-to-
//! foreground transition gives the column's upper point; the lower point
//! is the last row of the final foreground band, so a background gap
//! between bands (teeth showing between the lips) never ends the search
//! early. Upper points are emitted left to right and lower points right
//! to left: consecutive points trace one connected loop.

use image::GrayImage;

/// Errors from the boundary-extraction stage.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// Column sample count of zero.
    InvalidColumnSamples {
        /// The rejected value.
        got: u32,
    },
    /// The mask has zero pixels.
    EmptyMask,
}

impl std::fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColumnSamples { got } => {
                write!(f, "column sample count must be at least 1, got {}", got)
            }
            Self::EmptyMask => write!(f, "mask has no pixels"),
        }
    }
}

impl std::error::Error for BoundaryError {}

/// Configuration for boundary extraction.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Target number of sampled columns; the scan stride is
    /// `max(1, width / column_samples)`.
    pub column_samples: u32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self { column_samples: 50 }
    }
}

/// A boundary point in mask pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CurvePoint {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

/// Ordered boundary points: all upper points in increasing-x order,
/// followed by all lower points in decreasing-x order, so a line renderer
/// connecting consecutive points draws one closed-looking outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryCurve {
    /// The point sequence.
    pub points: Vec<CurvePoint>,
    /// Number of leading upper points in `points`.
    pub n_upper: usize,
}

impl BoundaryCurve {
    /// The upper-lip points, left to right.
    pub fn upper(&self) -> &[CurvePoint] {
        &self.points[..self.n_upper]
    }

    /// The lower-lip points, right to left.
    pub fn lower(&self) -> &[CurvePoint] {
        &self.points[self.n_upper..]
    }

    /// True when no column contributed any point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Extract the ordered boundary curve of a binary mask.
///
/// Columns are visited at the derived stride; a trailing column that does
/// not align with the stride is skipped. A mask without any foreground
/// yields an empty curve, not an error.
///
/// # Errors
/// [`BoundaryError::InvalidColumnSamples`] when `column_samples` is zero;
/// [`BoundaryError::EmptyMask`] for a zero-pixel mask.
pub fn extract_boundary(
    mask: &GrayImage,
    config: &BoundaryConfig,
) -> Result<BoundaryCurve, BoundaryError> {
    if config.column_samples == 0 {
        return Err(BoundaryError::InvalidColumnSamples { got: 0 });
    }
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return Err(BoundaryError::EmptyMask);
    }

    let stride = (width / config.column_samples).max(1);
    let mut upper = Vec::new();
    let mut lower = Vec::new();

    let mut x = 0;
    while x < width {
        scan_column(mask, x, height, &mut upper, &mut lower);
        x += stride;
    }

    // Collected in visitation order; reversed here so the lower chain runs
    // right to left and the whole sequence stays connectable.
    lower.reverse();

    let n_upper = upper.len();
    let mut points = upper;
    points.extend(lower);
    Ok(BoundaryCurve { points, n_upper })
}

fn scan_column(
    mask: &GrayImage,
    x: u32,
    height: u32,
    upper: &mut Vec<CurvePoint>,
    lower: &mut Vec<CurvePoint>,
) {
    let mut upper_found = false;
    let mut lower_found = false;
    let mut lower_point = CurvePoint { x, y: 0 };

    for y in 0..height {
        let foreground = mask.get_pixel(x, y)[0] != 0;

        if foreground && !upper_found {
            upper.push(CurvePoint { x, y });
            upper_found = true;
        } else if !foreground && upper_found && !lower_found {
            // The band ended on the previous row.
            lower_point = CurvePoint { x, y: y - 1 };
            lower_found = true;
        } else if foreground && lower_found {
            // A gap inside the region; the search restarts below it.
            lower_found = false;
        }
    }

    if lower_found {
        lower.push(lower_point);
    } else if upper_found {
        // The band runs to the bottom edge.
        lower.push(CurvePoint { x, y: height - 1 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mask_with_rect;
    use image::Luma;

    const FG: Luma<u8> = Luma([255]);

    #[test]
    fn rejects_zero_column_samples() {
        let mask = GrayImage::new(8, 8);
        let config = BoundaryConfig { column_samples: 0 };
        assert_eq!(
            extract_boundary(&mask, &config),
            Err(BoundaryError::InvalidColumnSamples { got: 0 })
        );
    }

    #[test]
    fn rejects_empty_mask() {
        let mask = GrayImage::new(0, 0);
        assert_eq!(
            extract_boundary(&mask, &BoundaryConfig::default()),
            Err(BoundaryError::EmptyMask)
        );
    }

    #[test]
    fn all_background_mask_yields_empty_curve() {
        let mask = GrayImage::new(20, 20);
        let curve = extract_boundary(&mask, &BoundaryConfig::default()).unwrap();
        assert!(curve.is_empty());
        assert_eq!(curve.n_upper, 0);
    }

    #[test]
    fn single_block_scenario() {
        // 3x3 block on rows 2-4; stride 5 samples columns 0 and 5, and only
        // column 5 crosses the block.
        let mask = mask_with_rect(10, 10, 4, 2, 3, 3);
        let config = BoundaryConfig { column_samples: 2 };
        let curve = extract_boundary(&mask, &config).unwrap();

        assert_eq!(
            curve.points,
            vec![CurvePoint { x: 5, y: 2 }, CurvePoint { x: 5, y: 4 }]
        );
        assert_eq!(curve.n_upper, 1);
    }

    #[test]
    fn gap_between_bands_keeps_the_last_band() {
        // One column: bg, fg rows 2-3, bg, fg rows 5-6, bg. The lower point
        // must bound the second band, not the gap.
        let mut mask = GrayImage::new(1, 10);
        for y in [2, 3, 5, 6] {
            mask.put_pixel(0, y, FG);
        }

        let curve = extract_boundary(&mask, &BoundaryConfig { column_samples: 1 }).unwrap();
        assert_eq!(
            curve.points,
            vec![CurvePoint { x: 0, y: 2 }, CurvePoint { x: 0, y: 6 }]
        );
    }

    #[test]
    fn band_to_bottom_edge_synthesizes_last_row() {
        let mut mask = GrayImage::new(1, 12);
        for y in 5..12 {
            mask.put_pixel(0, y, FG);
        }

        let curve = extract_boundary(&mask, &BoundaryConfig { column_samples: 1 }).unwrap();
        assert_eq!(
            curve.points,
            vec![CurvePoint { x: 0, y: 5 }, CurvePoint { x: 0, y: 11 }]
        );
    }

    #[test]
    fn full_foreground_column_spans_both_edges() {
        // Foreground from row 0 to the bottom edge: upper at 0, synthesized
        // lower at height-1.
        let mask = mask_with_rect(1, 8, 0, 0, 1, 8);
        let curve = extract_boundary(&mask, &BoundaryConfig { column_samples: 1 }).unwrap();
        assert_eq!(
            curve.points,
            vec![CurvePoint { x: 0, y: 0 }, CurvePoint { x: 0, y: 7 }]
        );
    }

    #[test]
    fn point_count_never_exceeds_two_per_sampled_column() {
        let mask = mask_with_rect(64, 32, 0, 4, 64, 20);
        for column_samples in [1u32, 3, 7, 50, 64, 1000] {
            let config = BoundaryConfig { column_samples };
            let curve = extract_boundary(&mask, &config).unwrap();
            let stride = (64 / column_samples).max(1);
            let columns = 64u32.div_ceil(stride) as usize;
            assert!(
                curve.points.len() <= 2 * columns,
                "{} points for {} sampled columns",
                curve.points.len(),
                columns
            );
        }
    }

    #[test]
    fn curve_orders_upper_then_reversed_lower() {
        let mask = mask_with_rect(12, 12, 0, 3, 12, 5);
        let config = BoundaryConfig { column_samples: 4 };
        let curve = extract_boundary(&mask, &config).unwrap();

        // Stride 3: columns 0, 3, 6, 9 all cross the band.
        assert_eq!(curve.n_upper, 4);
        let upper_x: Vec<u32> = curve.upper().iter().map(|p| p.x).collect();
        let lower_x: Vec<u32> = curve.lower().iter().map(|p| p.x).collect();
        assert_eq!(upper_x, vec![0, 3, 6, 9]);
        assert_eq!(lower_x, vec![9, 6, 3, 0]);
        assert!(curve.upper().iter().all(|p| p.y == 3));
        assert!(curve.lower().iter().all(|p| p.y == 7));
    }

    #[test]
    fn nearest_neighbor_upscale_scales_the_curve() {
        // Doubling the mask with nearest-neighbor and keeping the sample
        // count (so the stride doubles too) must double every coordinate,
        // with lower rows landing on 2y+1 (the last duplicated row).
        let mut mask = mask_with_rect(12, 10, 0, 3, 12, 4);
        mask.put_pixel(5, 8, FG);

        let config = BoundaryConfig { column_samples: 4 };
        let small = extract_boundary(&mask, &config).unwrap();

        let big_mask = image::imageops::resize(&mask, 24, 20, image::imageops::FilterType::Nearest);
        let big = extract_boundary(&big_mask, &config).unwrap();

        assert_eq!(big.n_upper, small.n_upper);
        assert_eq!(big.points.len(), small.points.len());
        for (b, s) in big.upper().iter().zip(small.upper()) {
            assert_eq!((b.x, b.y), (2 * s.x, 2 * s.y));
        }
        for (b, s) in big.lower().iter().zip(small.lower()) {
            assert_eq!((b.x, b.y), (2 * s.x, 2 * s.y + 1));
        }
    }
}
