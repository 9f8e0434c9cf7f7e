//! Decorative pictures rendered as terminal half-block cells: the cover
//! image and the animated mascot.

mod cover;
mod mascot;
mod raster;

pub use cover::load_cover;
pub use mascot::Mascot;
pub use raster::hex_rgb;

use image::RgbaImage;
use ratatui::text::Line;

/// A picture already converted into styled terminal lines.
#[derive(Clone, Debug, Default)]
pub struct Art {
    pub lines: Vec<Line<'static>>,
    /// Width in cells.
    pub width: u16,
    /// Height in cells (two pixels per cell).
    pub height: u16,
}

impl Art {
    /// Flatten `image` over `background` and pack two pixel rows per cell.
    pub fn from_image(image: &RgbaImage, background: [u8; 3]) -> Self {
        let lines = raster::to_half_blocks(image, background);
        Self {
            width: image.width().min(u16::MAX as u32) as u16,
            height: lines.len().min(u16::MAX as usize) as u16,
            lines,
        }
    }
}
