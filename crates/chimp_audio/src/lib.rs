//! One-shot sound cues on top of rodio.
//!
//! Gameplay code only ever sees `Box<dyn Playable>`. When no output device can
//! be opened, `AudioOutput` hands out `NullSound`s and the game runs silent
//! without branching on audio availability.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

/// Anything that can be fired and forgotten.
pub trait Playable {
    fn play(&self);
}

/// Stand-in used when audio is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl Playable for NullSound {
    fn play(&self) {}
}

/// An encoded clip kept in memory and decoded afresh on every `play()`, so
/// overlapping plays are independent.
pub struct Sound {
    name: String,
    clip: Arc<[u8]>,
    handle: OutputStreamHandle,
}

impl Playable for Sound {
    fn play(&self) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            log::warn!("No sink available for '{}'", self.name);
            return;
        };
        let Ok(source) = Decoder::new(Cursor::new(self.clip.clone())) else {
            return;
        };
        sink.append(source);
        sink.detach();
    }
}

/// Process-wide audio device. Must outlive every `Sound` it loaded.
pub struct AudioOutput {
    device: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioOutput {
    /// Open the default output device, degrading to silence on failure.
    pub fn init() -> Self {
        match OutputStream::try_default() {
            Ok(device) => {
                log::info!("Audio output initialized");
                Self {
                    device: Some(device),
                }
            }
            Err(err) => {
                log::warn!("Sounds have not been initialized: {err}");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { device: None }
    }

    pub fn is_available(&self) -> bool {
        self.device.is_some()
    }

    /// Load a clip for playback. Without a device this returns a `NullSound`
    /// and never touches the file. With one, a missing or undecodable file is
    /// an error.
    pub fn load_sound(&self, path: &Path) -> Result<Box<dyn Playable>, String> {
        let Some((_, handle)) = &self.device else {
            return Ok(Box::new(NullSound));
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let loaded = fs::read(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))
            .and_then(|bytes| {
                let clip: Arc<[u8]> = Arc::from(bytes);
                validate_clip(&clip)
                    .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?;
                Ok(clip)
            });

        match loaded {
            Ok(clip) => {
                log::debug!("Loaded sound '{}' ({} bytes)", name, clip.len());
                Ok(Box::new(Sound {
                    name,
                    clip,
                    handle: handle.clone(),
                }))
            }
            Err(err) => {
                log::error!("Cannot load sound: {name}");
                Err(err)
            }
        }
    }
}

fn validate_clip(clip: &Arc<[u8]>) -> Result<(), String> {
    Decoder::new(Cursor::new(clip.clone()))
        .map(|_| ())
        .map_err(|e| e.to_string())
}
