//! lipcurve CLI — lip boundary extraction for single frames and frame
//! sequences.

use clap::{Args, Parser, Subcommand};
use image::imageops::FilterType;
use image::RgbImage;
use std::path::{Path, PathBuf};

use lipcurve::{
    analyze_frame, debug_dump, label_components, rank_threshold, ratio_field, threshold_mask,
    AnalysisReport, AnalyzeConfig, BoundaryConfig, FrameSource, FrameSourceError, SegmentConfig,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "lipcurve")]
#[command(about = "Extract the lip boundary contour from video frames")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the lip boundary from a single frame image.
    Extract {
        /// Path to the input frame image.
        #[arg(long)]
        image: PathBuf,

        /// Path to write the boundary curve report (JSON).
        #[arg(long)]
        out: PathBuf,

        /// Directory to write intermediate-grid text dumps.
        #[arg(long)]
        debug_dir: Option<PathBuf>,

        #[command(flatten)]
        params: CliAnalyzeArgs,
    },

    /// Extract boundaries for every frame image in a directory.
    Sequence {
        /// Directory containing frame images, processed in file-name order.
        #[arg(long)]
        frames: PathBuf,

        /// Directory to write one report JSON per frame.
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        params: CliAnalyzeArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Rank-threshold fraction in (0, 1); lower keeps a stricter region.
    #[arg(long, default_value = "0.18")]
    threshold_fraction: f32,

    /// Target number of sampled columns for the boundary scan.
    #[arg(long, default_value = "50")]
    column_samples: u32,

    /// Processing resolution width; frames are resized before analysis.
    #[arg(long, default_value = "320")]
    width: u32,

    /// Processing resolution height.
    #[arg(long, default_value = "240")]
    height: u32,
}

impl CliAnalyzeArgs {
    fn to_config(&self) -> AnalyzeConfig {
        AnalyzeConfig {
            segment: SegmentConfig {
                threshold_fraction: self.threshold_fraction,
            },
            boundary: BoundaryConfig {
                column_samples: self.column_samples,
            },
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            image,
            out,
            debug_dir,
            params,
        } => run_extract(&image, &out, debug_dir.as_deref(), &params),
        Commands::Sequence {
            frames,
            out_dir,
            params,
        } => run_sequence(&frames, &out_dir, &params),
    }
}

/// Decode an image and resize it to the processing resolution.
fn load_frame(path: &Path, width: u32, height: u32) -> CliResult<RgbImage> {
    let img = image::open(path).map_err(|e| -> CliError {
        format!("Failed to open frame {}: {}", path.display(), e).into()
    })?;
    Ok(image::imageops::resize(
        &img.to_rgb8(),
        width,
        height,
        FilterType::Triangle,
    ))
}

fn run_extract(
    image_path: &Path,
    out_path: &Path,
    debug_dir: Option<&Path>,
    params: &CliAnalyzeArgs,
) -> CliResult<()> {
    let frame = load_frame(image_path, params.width, params.height)?;
    tracing::info!("Frame size: {}x{}", frame.width(), frame.height());

    if let Some(dir) = debug_dir {
        dump_intermediates(dir, &frame, params.threshold_fraction)?;
    }

    let analysis = analyze_frame(&frame, &params.to_config())?;
    let report = AnalysisReport::from(&analysis);
    std::fs::write(out_path, serde_json::to_string_pretty(&report)?)?;
    tracing::info!("Report written to {}", out_path.display());
    Ok(())
}

/// Recompute the pipeline's intermediate grids and dump them as text.
fn dump_intermediates(dir: &Path, frame: &RgbImage, threshold_fraction: f32) -> CliResult<()> {
    std::fs::create_dir_all(dir)?;

    let field = ratio_field(frame)?;
    let threshold = rank_threshold(&field, threshold_fraction)?;
    let raw = threshold_mask(&field, threshold);
    let labels = label_components(&raw);

    debug_dump::dump_ratio_field(&dir.join("ratio_field.txt"), &field)?;
    debug_dump::dump_mask(&dir.join("raw_mask.txt"), &raw)?;
    debug_dump::dump_labels(&dir.join("component_labels.txt"), &labels)?;
    tracing::info!("Intermediate grids written to {}", dir.display());
    Ok(())
}

/// Directory of frame images, ordered by file name.
struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    width: u32,
    height: u32,
}

impl ImageSequenceSource {
    fn open(dir: &Path, width: u32, height: u32) -> Result<Self, FrameSourceError> {
        let entries = std::fs::read_dir(dir).map_err(|e| FrameSourceError::Open {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        Ok(Self {
            paths,
            width,
            height,
        })
    }
}

impl FrameSource for ImageSequenceSource {
    fn frame_count(&self) -> usize {
        self.paths.len()
    }

    fn frame(&mut self, index: usize) -> Result<RgbImage, FrameSourceError> {
        let path = self
            .paths
            .get(index)
            .ok_or(FrameSourceError::IndexOutOfRange {
                index,
                count: self.paths.len(),
            })?;
        let img = image::open(path).map_err(|e| FrameSourceError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(image::imageops::resize(
            &img.to_rgb8(),
            self.width,
            self.height,
            FilterType::Triangle,
        ))
    }
}

fn run_sequence(frames_dir: &Path, out_dir: &Path, params: &CliAnalyzeArgs) -> CliResult<()> {
    let mut source = ImageSequenceSource::open(frames_dir, params.width, params.height)?;
    let config = params.to_config();
    std::fs::create_dir_all(out_dir)?;

    let count = source.frame_count();
    tracing::info!("{} frames in {}", count, frames_dir.display());

    for index in 0..count {
        let frame = match source.frame(index) {
            Ok(frame) => frame,
            Err(e) => {
                // Undecodable files are a source problem, not a pipeline
                // failure; report and move on.
                tracing::warn!("skipping frame {}: {}", index, e);
                continue;
            }
        };

        let analysis = analyze_frame(&frame, &config)?;
        let report = AnalysisReport::from(&analysis);
        let out_path = out_dir.join(format!("frame_{index:05}.json"));
        std::fs::write(&out_path, serde_json::to_string_pretty(&report)?)?;
        tracing::info!(
            "frame {}: {} curve points -> {}",
            index,
            report.curve.points.len(),
            out_path.display()
        );
    }
    Ok(())
}
