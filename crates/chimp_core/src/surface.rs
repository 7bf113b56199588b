//! CPU-side RGBA bitmaps: the images sprites display and the frame they are
//! composited into.
//!
//! Transparency is carried in the alpha channel. A colour key is applied once
//! (`set_color_key`) by zeroing the alpha of every matching pixel, so later
//! blits, flips and rotations never need to know which colour was keyed.

use glam::IVec2;
use image::{imageops, Rgba, RgbaImage};

use crate::rect::Rect;

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: RgbaImage,
    color_key: Option<Rgb>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let [r, g, b] = color;
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])))
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            color_key: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Bounding box at the origin, sized like the surface.
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    pub fn color_key(&self) -> Option<Rgb> {
        self.color_key
    }

    pub fn get_at(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.pixels.get_pixel(x, y))
        } else {
            None
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, color);
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Drop per-pixel alpha so every pixel is opaque. Mirrors converting a
    /// decoded file to the display's native format.
    pub fn convert_opaque(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            pixel[3] = 255;
        }
    }

    /// Make every pixel of `key` transparent and remember the key.
    pub fn set_color_key(&mut self, key: Rgb) {
        for pixel in self.pixels.pixels_mut() {
            if pixel[0] == key[0] && pixel[1] == key[1] && pixel[2] == key[2] {
                pixel[3] = 0;
            }
        }
        self.color_key = Some(key);
    }

    /// Composite `src` over this surface with its top-left at `dest`.
    /// Anything outside this surface is clipped.
    pub fn blit(&mut self, src: &Surface, dest: IVec2) {
        let target = Rect::new(dest.x, dest.y, src.width() as i32, src.height() as i32);
        let Some(visible) = target.clip(&self.rect()) else {
            return;
        };

        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                let s = *src
                    .pixels
                    .get_pixel((x - dest.x) as u32, (y - dest.y) as u32);
                match s[3] {
                    0 => {}
                    255 => self.pixels.put_pixel(x as u32, y as u32, s),
                    alpha => {
                        let d = self.pixels.get_pixel_mut(x as u32, y as u32);
                        *d = blend_over(s, *d, alpha);
                    }
                }
            }
        }
    }

    /// Mirrored copy (left and right swapped).
    pub fn flip_horizontal(&self) -> Surface {
        Surface {
            pixels: imageops::flip_horizontal(&self.pixels),
            color_key: self.color_key,
        }
    }

    /// Copy rotated counter-clockwise (as seen on screen) by `degrees`.
    ///
    /// The result is sized to the bounding box of the rotated source, so it
    /// grows for angles that are not a multiple of 90. Uncovered pixels are
    /// transparent. Sampling is nearest-neighbour from the source. Callers
    /// animating a rotation should always rotate the same pristine source
    /// rather than a previous result.
    pub fn rotate(&self, degrees: f32) -> Surface {
        let radians = f64::from(degrees).to_radians();
        let (sin, cos) = radians.sin_cos();
        let w = f64::from(self.width());
        let h = f64::from(self.height());
        let new_w = ((cos.abs() * w + sin.abs() * h) as u32).max(1);
        let new_h = ((sin.abs() * w + cos.abs() * h) as u32).max(1);

        let src_cx = w / 2.0;
        let src_cy = h / 2.0;
        let dst_cx = f64::from(new_w) / 2.0;
        let dst_cy = f64::from(new_h) / 2.0;

        let mut out = RgbaImage::new(new_w, new_h);
        for (x, y, pixel) in out.enumerate_pixels_mut() {
            // Inverse-map the destination pixel centre back into the source.
            let dx = f64::from(x) + 0.5 - dst_cx;
            let dy = f64::from(y) + 0.5 - dst_cy;
            let sx = dx * cos - dy * sin + src_cx;
            let sy = dx * sin + dy * cos + src_cy;
            if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                *pixel = *self.pixels.get_pixel(sx as u32, sy as u32);
            }
        }

        Surface {
            pixels: out,
            color_key: self.color_key,
        }
    }
}

fn blend_over(src: Rgba<u8>, dst: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = u32::from(alpha);
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * inv + 127) / 255) as u8;
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (a + (u32::from(dst[3]) * inv + 127) / 255) as u8,
    ])
}
