use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, RgbaImage};

use super::Art;

/// A looping animation advanced by wall-clock time.
#[derive(Debug)]
pub struct Mascot {
    frames: Vec<Art>,
    index: usize,
    interval: Duration,
    last_step: Instant,
}

impl Mascot {
    /// Load every frame of a GIF (or a single still image) at `size_px` square.
    pub fn load(path: &Path, size_px: u32, interval: Duration, background: [u8; 3]) -> Result<Self> {
        let images = read_frames(path)?;
        if images.is_empty() {
            bail!("mascot has no frames: {}", path.display());
        }
        let frames = images
            .iter()
            .map(|img| {
                let scaled = imageops::resize(img, size_px, size_px, FilterType::Lanczos3);
                Art::from_image(&scaled, background)
            })
            .collect();
        Ok(Self::from_frames(frames, interval, Instant::now()))
    }

    pub fn from_frames(frames: Vec<Art>, interval: Duration, now: Instant) -> Self {
        Self {
            frames,
            index: 0,
            interval: interval.max(Duration::from_millis(1)),
            last_step: now,
        }
    }

    /// Advance as many frames as whole intervals have passed since the last step.
    pub fn tick(&mut self, now: Instant) {
        if self.frames.len() < 2 {
            return;
        }
        let elapsed = now.saturating_duration_since(self.last_step);
        let interval = self.interval.as_nanos();
        let steps = elapsed.as_nanos() / interval;
        if steps == 0 {
            return;
        }
        let len = self.frames.len() as u128;
        self.index = ((self.index as u128 + steps % len) % len) as usize;
        // Keep the partial interval so frame timing does not drift.
        let lag = u64::try_from(elapsed.as_nanos() % interval).unwrap_or(0);
        self.last_step = now - Duration::from_nanos(lag);
    }

    pub fn current(&self) -> Option<&Art> {
        self.frames.get(self.index)
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

fn read_frames(path: &Path) -> Result<Vec<RgbaImage>> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));

    if !is_gif {
        let still = image::open(path)
            .with_context(|| format!("failed to decode mascot: {}", path.display()))?;
        return Ok(vec![still.to_rgba8()]);
    }

    let file = File::open(path)
        .with_context(|| format!("unable to open mascot: {}", path.display()))?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("failed to decode mascot: {}", path.display()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("failed to read mascot frames: {}", path.display()))?;
    Ok(frames.into_iter().map(|f| f.into_buffer()).collect())
}
