use std::error::Error;

use image::{Rgb, RgbImage};
use lipcurve::{analyze_frame, AnalysisReport, AnalyzeConfig};

fn main() -> Result<(), Box<dyn Error>> {
    let frame = match std::env::args().nth(1) {
        Some(path) => image::ImageReader::open(&path)?.decode()?.to_rgb8(),
        None => synthetic_frame(320, 240),
    };

    let analysis = analyze_frame(&frame, &AnalyzeConfig::default())?;
    println!("lip region: {} px", analysis.lip_pixel_count);
    println!(
        "boundary curve: {} points ({} upper)",
        analysis.curve.points.len(),
        analysis.curve.n_upper
    );

    if let Some(out_path) = std::env::args().nth(2) {
        let report = AnalysisReport::from(&analysis);
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}

/// Skin-colored frame with an elliptical lip blob, for running the example
/// without an input image.
fn synthetic_frame(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([205, 160, 140]));
    let center = [width as f32 * 0.5, height as f32 * 0.62];
    for y in 0..height {
        for x in 0..width {
            let dx = (x as f32 - center[0]) / (width as f32 * 0.14);
            let dy = (y as f32 - center[1]) / (height as f32 * 0.08);
            if dx * dx + dy * dy <= 1.0 {
                img.put_pixel(x, y, Rgb([190, 80, 90]));
            }
        }
    }
    img
}
