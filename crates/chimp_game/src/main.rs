//! Chimp: punch the monkey -- window, frame pacing and presentation.
//!
//! Everything fatal (config, assets, window, GPU) happens before the first
//! frame. After that winit drives a fixed 60 Hz loop:
//!
//!   1. `about_to_wait` parks the thread with `ControlFlow::WaitUntil` on the
//!      clock's next deadline and requests a redraw once it has passed
//!   2. `RedrawRequested` ticks the clock if the deadline is due, drains
//!      queued input and runs `Game::step` (events, update, CPU composite).
//!      Early redraws from the OS only re-present the last frame
//!   3. The composited frame is uploaded, drawn as one quad, and the egui
//!      overlay is painted on top before presenting
//!
//! Window events only record input; they never touch game state directly.

mod assets;
mod chimp;
mod config;
mod fist;
mod game;
#[cfg(test)]
mod replay;
mod subsystems;

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use chimp_core::input::{InputEvent, InputState, Key, MouseBtn};
use chimp_core::time::{FrameClock, TARGET_FPS};
use chimp_devtools::{DebugOverlay, OverlayStats};
use chimp_render::{FramePipeline, GpuContext};
use config::GameConfig;
use game::{FrameOutcome, Game};
use subsystems::{Capabilities, Subsystems};

struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    frame_pipeline: FramePipeline,
    debug_overlay: DebugOverlay,
    clock: FrameClock,
    input: InputState,
}

impl EngineState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let frame_pipeline =
            FramePipeline::new(&gpu.device, gpu.surface_format, config.screen_size(), gpu.size);
        let debug_overlay = DebugOverlay::new(
            &gpu.device,
            gpu.surface_format,
            &window,
            config.show_debug_overlay,
        );
        let (frame_w, frame_h) = config.screen_size();
        log::info!(
            "Frame pipeline ready: {}x{} frame in {}x{} surface",
            frame_w,
            frame_h,
            gpu.size.0,
            gpu.size.1
        );

        Ok(Self {
            window,
            gpu,
            frame_pipeline,
            debug_overlay,
            clock: FrameClock::new(TARGET_FPS),
            input: InputState::new(),
        })
    }

    /// Upload and show the latest frame. An upload failure is fatal; a lost
    /// surface only skips this frame.
    fn present(&mut self, game: &Game, stats: &OverlayStats) -> Result<(), String> {
        self.frame_pipeline
            .upload(&self.gpu.queue, game.screen())
            .map_err(|e| format!("Frame upload failed: {e}"))?;

        let Some((output, view)) = self.gpu.begin_frame() else {
            return Ok(());
        };

        let (primitives, textures_delta) =
            self.debug_overlay
                .prepare(&self.window, &self.clock, stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.frame_pipeline
            .draw(&mut encoder, &view, wgpu::Color::BLACK);

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );
        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.debug_overlay
                .paint(&mut egui_pass, &primitives, &screen_descriptor);
        }
        self.debug_overlay.cleanup(&textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

struct App {
    config: GameConfig,
    game: Game,
    state: Option<EngineState>,
    // Declared after `game` so sounds are dropped before the output device.
    subsystems: Subsystems,
    fatal: Option<String>,
}

impl App {
    fn new(config: GameConfig, subsystems: Subsystems, game: Game) -> Self {
        Self {
            config,
            game,
            state: None,
            subsystems,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: String) {
        log::error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    /// Step the game when the frame deadline has passed, then present. Redraws
    /// the OS asks for between deadlines re-present the last frame.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if state.clock.tick_if_due(Instant::now()) {
            let events = state.input.drain_events();
            if events.contains(&InputEvent::KeyDown(Key::F3)) {
                state.debug_overlay.toggle();
            }

            let outcome = self.game.step(&events, state.input.mouse_pixel());
            if outcome == FrameOutcome::Terminate {
                let stats = self.game.stats();
                log::info!(
                    "Exiting after {} frames ({} hits, {} whiffs)",
                    stats.frames,
                    stats.hits,
                    stats.whiffs
                );
                event_loop.exit();
                return;
            }
        }

        if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
            return;
        }
        let stats = overlay_stats(&self.game, self.subsystems.capabilities());
        if let Err(err) = state.present(&self.game, &stats) {
            self.fail(event_loop, err);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let created = chimp_platform::create_window(event_loop, &self.config.platform())
            .and_then(|window| EngineState::new(window, &self.config));
        match created {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            if state.clock.is_due(Instant::now()) {
                state.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(state.clock.next_tick()));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::Focused(false) => state.input.release_all(),

            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                state.input.quit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.frame_pipeline.set_viewport(&state.gpu.queue, (w, h));
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let frame_pos = state
                    .frame_pipeline
                    .camera()
                    .viewport_to_frame(Vec2::new(position.x as f32, position.y as f32));
                state.input.mouse_position = (f64::from(frame_pos.x), f64::from(frame_pos.y));
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } if !egui_consumed => {
                let btn = map_mouse_button(button);
                match button_state {
                    ElementState::Pressed => state.input.mouse_down(btn),
                    ElementState::Released => state.input.mouse_up(btn),
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn overlay_stats(game: &Game, caps: Capabilities) -> OverlayStats {
    let chimp = game.chimp();
    let stats = game.stats();
    OverlayStats {
        chimp_state: chimp.state().as_str(),
        dizzy: chimp.dizzy(),
        chimp_speed: chimp.move_speed(),
        punching: game.fist().is_punching(),
        hits: stats.hits,
        whiffs: stats.whiffs,
        sprite_count: game.sprites().len() as u32,
        audio_enabled: caps.audio,
        font_enabled: caps.font,
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn map_mouse_button(button: MouseButton) -> MouseBtn {
    match button {
        MouseButton::Left => MouseBtn::Left,
        MouseButton::Right => MouseBtn::Right,
        MouseButton::Middle => MouseBtn::Middle,
        MouseButton::Back => MouseBtn::Other(4),
        MouseButton::Forward => MouseBtn::Other(5),
        MouseButton::Other(id) => MouseBtn::Other(id),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Chimp starting...");

    let config = config::load_config()?;
    let subsystems = Subsystems::init(&config);
    let game = Game::load(&config, &subsystems)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, subsystems, game);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err.into());
    }
    log::info!("Goodbye");
    Ok(())
}
