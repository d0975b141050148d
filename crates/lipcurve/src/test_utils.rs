//! Shared test fixtures: synthetic speaker frames and masks with a known
//! lip region.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Skin-tone background pixel.
pub(crate) const SKIN: Rgb<u8> = Rgb([205, 160, 140]);

/// Lip-tone pixel: markedly more red against green than skin.
pub(crate) const LIP: Rgb<u8> = Rgb([190, 80, 90]);

/// Paint a skin-colored frame with an elliptical lip blob.
///
/// The blob covers pixels where `(dx/rx)^2 + (dy/ry)^2 <= 1` around
/// `center`.
pub(crate) fn draw_lip_frame(w: u32, h: u32, center: [f32; 2], rx: f32, ry: f32) -> RgbImage {
    let mut img = RgbImage::from_pixel(w, h, SKIN);
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f32 - center[0]) / rx;
            let dy = (y as f32 - center[1]) / ry;
            if dx * dx + dy * dy <= 1.0 {
                img.put_pixel(x, y, LIP);
            }
        }
    }
    img
}

/// Fill a rectangle of `img` with `pixel`.
pub(crate) fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, pixel: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, pixel);
        }
    }
}

/// All-background mask with one filled foreground rectangle.
pub(crate) fn mask_with_rect(w: u32, h: u32, x0: u32, y0: u32, rw: u32, rh: u32) -> GrayImage {
    let mut mask = GrayImage::new(w, h);
    for y in y0..y0 + rh {
        for x in x0..x0 + rw {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}
