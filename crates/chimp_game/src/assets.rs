use std::path::{Path, PathBuf};

use chimp_audio::{AudioOutput, Playable};
use chimp_core::{Rect, Rgb, Surface};

/// Which colour, if any, becomes transparent when an image is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKey {
    None,
    /// Whatever colour the top-left pixel has.
    TopLeft,
    Rgb(Rgb),
}

/// Resolves asset names against a single directory.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    dir: PathBuf,
}

impl AssetLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Decode `name` to an opaque surface, then apply `key`. The rect sits at
    /// the origin, sized like the image.
    pub fn load_image(&self, name: &str, key: ColorKey) -> Result<(Surface, Rect), String> {
        let path = self.path(name);
        let decoded = image::open(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))
            .inspect_err(|_| log::error!("Cannot load image: {name}"))?;

        let mut surface = Surface::from_image(decoded.to_rgba8());
        surface.convert_opaque();
        match key {
            ColorKey::None => {}
            ColorKey::TopLeft => {
                if let Some(corner) = surface.get_at(0, 0) {
                    surface.set_color_key([corner[0], corner[1], corner[2]]);
                }
            }
            ColorKey::Rgb(color) => surface.set_color_key(color),
        }

        log::debug!(
            "Loaded image '{}' ({}x{})",
            name,
            surface.width(),
            surface.height()
        );
        let rect = surface.rect();
        Ok((surface, rect))
    }

    pub fn load_sound(&self, audio: &AudioOutput, name: &str) -> Result<Box<dyn Playable>, String> {
        audio.load_sound(&self.path(name))
    }
}
