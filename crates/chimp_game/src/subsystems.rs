//! Optional runtime services, checked once at startup.
//!
//! Losing either one never stops the game: without audio every sound is a
//! `NullSound`, without a font the background has no title. The title font is
//! the bundled one unless config names a file, so only a broken configured
//! font leaves the title out.

use chimp_audio::AudioOutput;
use chimp_render::TitleFont;

use crate::config::GameConfig;

pub const TITLE_FONT_PX: f32 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub audio: bool,
    pub font: bool,
}

pub struct Subsystems {
    pub audio: AudioOutput,
    pub font: Option<TitleFont>,
}

impl Subsystems {
    pub fn init(config: &GameConfig) -> Self {
        let audio = AudioOutput::init();
        let font = load_title_font(config);

        let subsystems = Self { audio, font };
        let caps = subsystems.capabilities();
        log::info!("Capabilities: audio={} font={}", caps.audio, caps.font);
        subsystems
    }

    /// No audio device and no font.
    #[cfg(test)]
    pub fn headless() -> Self {
        Self {
            audio: AudioOutput::disabled(),
            font: None,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            audio: self.audio.is_available(),
            font: self.font.is_some(),
        }
    }
}

/// The configured font file, else the bundled one. `None` only when a
/// configured file cannot be used.
fn load_title_font(config: &GameConfig) -> Option<TitleFont> {
    let loaded = match config.font_path() {
        Some(path) => TitleFont::load(&path, TITLE_FONT_PX)
            .inspect(|_| log::info!("Loaded title font {}", path.display())),
        None => TitleFont::builtin(TITLE_FONT_PX),
    };
    match loaded {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("Fonts have not been initialized: {err}");
            None
        }
    }
}
