//! Single-line text rasterized on the CPU into a `Surface`.

use std::fs;
use std::path::Path;

use chimp_core::{Rgb, Surface};
use fontdue::{Font, FontSettings};
use image::Rgba;

/// DejaVu Sans, compiled in so the title renders with no font file on disk.
pub const BUILTIN_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

pub struct TitleFont {
    font: Font,
    px: f32,
}

impl TitleFont {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self, String> {
        let font = Font::from_bytes(
            bytes,
            FontSettings {
                scale: px,
                ..Default::default()
            },
        )
        .map_err(|e| format!("Failed to parse font: {e}"))?;
        Ok(Self { font, px })
    }

    pub fn builtin(px: f32) -> Result<Self, String> {
        Self::from_bytes(BUILTIN_FONT, px)
    }

    pub fn load(path: &Path, px: f32) -> Result<Self, String> {
        let bytes =
            fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::from_bytes(&bytes, px)
            .map_err(|e| format!("{e} ({})", path.display()))
    }

    /// Render `text` in `color` onto a transparent surface sized to the
    /// line: advance widths across, ascent plus descent down.
    pub fn render(&self, text: &str, color: Rgb) -> Surface {
        let (ascent, line_height) = match self.font.horizontal_line_metrics(self.px) {
            Some(m) => (m.ascent, m.ascent - m.descent),
            None => (self.px, self.px),
        };
        let baseline = ascent.ceil() as i32;

        let glyphs: Vec<_> = text
            .chars()
            .map(|ch| self.font.rasterize(ch, self.px))
            .collect();
        let width: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();

        let mut surface = Surface::new(
            (width.ceil() as u32).max(1),
            (line_height.ceil() as u32).max(1),
        );
        let [r, g, b] = color;

        let mut pen_x = 0.0f32;
        for (metrics, coverage) in &glyphs {
            let left = (pen_x + metrics.xmin as f32).round() as i32;
            // ymin is the glyph bottom's offset above the baseline.
            let top = baseline - metrics.height as i32 - metrics.ymin;
            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = coverage[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let x = left + gx as i32;
                    let y = top + gy as i32;
                    if x >= 0 && y >= 0 {
                        surface.put_pixel(x as u32, y as u32, Rgba([r, g, b, alpha]));
                    }
                }
            }
            pen_x += metrics.advance_width;
        }

        surface
    }
}
