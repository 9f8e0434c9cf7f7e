use image::{Rgba, RgbaImage};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const UPPER_HALF: &str = "▀";

/// Parse `#rrggbb` (leading `#` optional).
pub fn hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Whether point `(x, y)` lies inside a `w`×`h` rectangle at the origin whose
/// corners are rounded with radius `r`.
pub(super) fn inside_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32) -> bool {
    if x < 0.0 || y < 0.0 || x > w || y > h {
        return false;
    }
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    let cx = x.clamp(r, w - r);
    let cy = y.clamp(r, h - r);
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

/// Make every pixel outside the rounded outline fully transparent.
pub(super) fn round_corners(image: &mut RgbaImage, radius: u32) {
    let (w, h) = (image.width() as f32, image.height() as f32);
    for (x, y, px) in image.enumerate_pixels_mut() {
        if !inside_rounded_rect(x as f32 + 0.5, y as f32 + 0.5, w, h, radius as f32) {
            px.0[3] = 0;
        }
    }
}

/// Alpha-composite `color` at `alpha` over `dst`.
pub(super) fn blend_over(dst: &mut Rgba<u8>, color: [u8; 3], alpha: u8) {
    let a = alpha as f32 / 255.0;
    for (c, src) in dst.0.iter_mut().take(3).zip(color) {
        *c = (src as f32 * a + *c as f32 * (1.0 - a)).round() as u8;
    }
    dst.0[3] = dst.0[3].max(alpha);
}

/// Flatten a pixel over an opaque background colour.
pub(super) fn flatten(px: &Rgba<u8>, background: [u8; 3]) -> [u8; 3] {
    let a = px.0[3] as f32 / 255.0;
    let mut out = [0u8; 3];
    for (i, o) in out.iter_mut().enumerate() {
        *o = (px.0[i] as f32 * a + background[i] as f32 * (1.0 - a)).round() as u8;
    }
    out
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

/// Render an image as lines of `▀` cells: foreground is the upper pixel,
/// background the lower one.
pub(super) fn to_half_blocks(image: &RgbaImage, background: [u8; 3]) -> Vec<Line<'static>> {
    let (w, h) = image.dimensions();
    (0..h.div_ceil(2))
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..w)
                .map(|x| {
                    let top = flatten(image.get_pixel(x, row * 2), background);
                    let bottom = if row * 2 + 1 < h {
                        flatten(image.get_pixel(x, row * 2 + 1), background)
                    } else {
                        background
                    };
                    Span::styled(UPPER_HALF, Style::default().fg(rgb(top)).bg(rgb(bottom)))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rgb_parses_with_and_without_hash() {
        assert_eq!(hex_rgb("#344e41"), Some([0x34, 0x4e, 0x41]));
        assert_eq!(hex_rgb("FFB5A7"), Some([0xff, 0xb5, 0xa7]));
        assert_eq!(hex_rgb("#fff"), None);
        assert_eq!(hex_rgb("#gggggg"), None);
        assert_eq!(hex_rgb("#ééé"), None);
    }

    #[test]
    fn rounded_rect_excludes_only_the_corners() {
        assert!(inside_rounded_rect(5.0, 5.0, 10.0, 10.0, 3.0));
        assert!(inside_rounded_rect(0.5, 5.0, 10.0, 10.0, 3.0));
        assert!(!inside_rounded_rect(0.2, 0.2, 10.0, 10.0, 3.0));
        assert!(!inside_rounded_rect(9.8, 9.8, 10.0, 10.0, 3.0));
        assert!(!inside_rounded_rect(11.0, 5.0, 10.0, 10.0, 3.0));
        // Zero radius is a plain rectangle.
        assert!(inside_rounded_rect(0.0, 0.0, 10.0, 10.0, 0.0));
    }

    #[test]
    fn round_corners_clears_corner_pixels() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 255]));
        round_corners(&mut img, 3);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(7, 7).0[3], 0);
        assert_eq!(img.get_pixel(4, 4).0[3], 255);
        assert_eq!(img.get_pixel(0, 4).0[3], 255);
    }

    #[test]
    fn flatten_mixes_with_background() {
        let bg = [0, 0, 0];
        assert_eq!(flatten(&Rgba([255, 255, 255, 255]), bg), [255, 255, 255]);
        assert_eq!(flatten(&Rgba([255, 255, 255, 0]), bg), [0, 0, 0]);
        assert_eq!(flatten(&Rgba([200, 100, 50, 128]), bg), [100, 50, 25]);
    }

    #[test]
    fn blend_over_keeps_strongest_alpha() {
        let mut px = Rgba([0, 0, 0, 255]);
        blend_over(&mut px, [255, 255, 255], 0);
        assert_eq!(px, Rgba([0, 0, 0, 255]));

        let mut px = Rgba([0, 0, 0, 0]);
        blend_over(&mut px, [255, 255, 255], 255);
        assert_eq!(px, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn half_blocks_pack_two_rows_per_line() {
        let img = RgbaImage::from_pixel(4, 5, Rgba([1, 2, 3, 255]));
        let lines = to_half_blocks(&img, [9, 9, 9]);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.spans.len() == 4));

        // The odd last row is padded with the background.
        let last = &lines[2].spans[0].style;
        assert_eq!(last.fg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(last.bg, Some(Color::Rgb(9, 9, 9)));
    }
}
