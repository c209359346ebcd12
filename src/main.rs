use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use stair_gallery::cli::Cli;
use stair_gallery::config::GalleryConfig;
use stair_gallery::core::Clock;
use stair_gallery::gallery::Gallery;
use stair_gallery::interaction::{cursor_to_ndc, Button, InputEdge, WinitController};
use stair_gallery::render::{HudInfo, SceneRenderer};

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;

// === Application ===

struct App {
    config: GalleryConfig,
    show_hud: bool,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    gallery: Gallery,
    controller: WinitController,
    clock: Clock,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(config: GalleryConfig, show_hud: bool) -> Self {
        let aspect = config.window.width as f32 / config.window.height as f32;
        let gallery = Gallery::new(&config, aspect);
        Self {
            config,
            show_hud,
            window: None,
            renderer: None,
            gallery,
            controller: WinitController::new(),
            clock: Clock::new(),
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::trace!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn pointer_ndc(&self) -> Option<Vec2> {
        let window = self.window.as_ref()?;
        let size = window.inner_size();
        let position = self.controller.mouse_position()?;
        Some(cursor_to_ndc(position, Vec2::new(size.width as f32, size.height as f32)))
    }

    fn handle_edge(&mut self, event_loop: &ActiveEventLoop, edge: InputEdge) {
        match edge {
            InputEdge::Pressed(Button::Escape) => event_loop.exit(),
            InputEdge::Pressed(Button::MouseLeft) => {
                if let Some(ndc) = self.pointer_ndc() {
                    self.gallery.pointer_down(ndc);
                }
            }
            InputEdge::Released(Button::MouseLeft) => {
                if let Some(ndc) = self.pointer_ndc() {
                    self.gallery.pointer_up(ndc);
                }
            }
            InputEdge::Pressed(button) => self.gallery.key_pressed(button),
            InputEdge::CursorMoved(_) => {
                if let Some(ndc) = self.pointer_ndc() {
                    self.gallery.pointer_move(ndc);
                }
            }
            InputEdge::FocusLost => self.gallery.cancel_drag(),
            InputEdge::Released(_) => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();
        self.update_fps(frame.delta);
        self.gallery.update(frame, &self.controller);

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };
        let hud = HudInfo {
            fps: self.fps,
            rows: self.gallery.hud_rows(),
        };
        match renderer.render(&self.gallery.scene, &self.gallery.camera, self.gallery.time(), window, &hud) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let mut renderer = match pollster::block_on(SceneRenderer::new(window.clone(), self.show_hud)) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("failed to initialize renderer: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };
            renderer.upload_scene(&self.gallery.scene);

            let (width, height) = renderer.size();
            self.gallery.resize(width, height);
            self.clock.reset();

            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                // A release over the overlay still ends held buttons and drags
                if self.controller.release_consumed(&event) {
                    self.gallery.cancel_drag();
                }
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.gallery.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                if let Some(edge) = self.controller.process_event(&event) {
                    self.handle_edge(event_loop, edge);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = GalleryConfig::from_cli(&cli)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, !cli.no_ui);

    log::info!("Stair Gallery - Controls: WASD/arrows, Q/E turn, Space/Shift, click stairs, drag lamps, R reset, L sun, Escape quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
