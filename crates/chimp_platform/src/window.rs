use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub cursor_visible: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Apetrøbbel!".to_string(),
            width: 800,
            height: 600,
            cursor_visible: false,
        }
    }
}

/// Open a fixed-size window. Sizes are logical pixels, so the game's
/// coordinate space stays the same on high-DPI displays.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(false);

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Failed to create window: {e}"))?;
    window.set_cursor_visible(config.cursor_visible);
    log::info!(
        "Window created: {}x{} (scale factor {:.2})",
        config.width,
        config.height,
        window.scale_factor()
    );
    Ok(Arc::new(window))
}
