//! Write-only text dumps of intermediate pipeline grids.
//!
//! Row-major, whitespace-separated, one image row per line, so the files
//! load directly into numpy or Matlab for offline inspection. Nothing in
//! the pipeline ever reads these back.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::GrayImage;

use crate::region::LabelGrid;
use crate::segment::RatioField;

fn write_grid<W: Write, T: Display>(out: &mut W, values: &[T], width: usize) -> io::Result<()> {
    if width == 0 {
        return Ok(());
    }
    for row in values.chunks(width) {
        let mut first = true;
        for v in row {
            if !first {
                write!(out, " ")?;
            }
            write!(out, "{}", v)?;
            first = false;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Dump a ratio field as text.
pub fn dump_ratio_field(path: &Path, field: &RatioField) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_grid(&mut out, field.values(), field.width() as usize)
}

/// Dump a binary mask as text (raw 0/255 sample values).
pub fn dump_mask(path: &Path, mask: &GrayImage) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_grid(&mut out, mask.as_raw(), mask.width() as usize)
}

/// Dump a component label grid as text.
pub fn dump_labels(path: &Path, grid: &LabelGrid) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_grid(&mut out, grid.labels(), grid.width() as usize)
}
