use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::Art;
use super::raster::{blend_over, inside_rounded_rect, round_corners};

const SHADOW_ALPHA: u8 = 80;
const SHADOW_SIGMA: f32 = 1.0;
const BORDER_ALPHA: u8 = 180;

/// Load a cover picture, square it to `size_px`, round its corners and
/// place it on a soft shadow with a thin translucent white border.
pub fn load_cover(path: &Path, size_px: u32, corner_radius: u32, background: [u8; 3]) -> Result<Art> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode cover image: {}", path.display()))?
        .to_rgba8();
    Ok(Art::from_image(
        &compose(&image, size_px, corner_radius),
        background,
    ))
}

/// Lay the rounded picture out on a `size_px` square canvas.
pub(super) fn compose(image: &RgbaImage, size_px: u32, corner_radius: u32) -> RgbaImage {
    let margin = (size_px / 12).max(1).min(size_px / 4);
    let inner = size_px.saturating_sub(margin * 2).max(1);

    let mut picture = imageops::resize(image, inner, inner, FilterType::Lanczos3);
    round_corners(&mut picture, corner_radius);

    let mut shadow = RgbaImage::new(size_px, size_px);
    for (x, y, px) in shadow.enumerate_pixels_mut() {
        let (lx, ly) = (x as f32 + 0.5 - margin as f32, y as f32 + 0.5 - margin as f32);
        if inside_rounded_rect(lx, ly, inner as f32, inner as f32, corner_radius as f32) {
            *px = Rgba([0, 0, 0, SHADOW_ALPHA]);
        }
    }
    let mut canvas = imageops::blur(&shadow, SHADOW_SIGMA);

    imageops::overlay(&mut canvas, &picture, margin as i64, margin as i64);

    // One-pixel outline just inside the rounded edge.
    let r = corner_radius as f32;
    let edge = inner as f32;
    for y in 0..inner {
        for x in 0..inner {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let on_outline = inside_rounded_rect(fx, fy, edge, edge, r)
                && !inside_rounded_rect(fx - 1.0, fy - 1.0, edge - 2.0, edge - 2.0, (r - 1.0).max(0.0));
            if on_outline {
                let px = canvas.get_pixel_mut(x + margin, y + margin);
                blend_over(px, [255, 255, 255], BORDER_ALPHA);
            }
        }
    }

    canvas
}
