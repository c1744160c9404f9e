use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::Vec2;

use offview::{BoundsSeed, ViewerConfig, is_off_path};

mod renderer;
mod ui;

use renderer::{Camera, GpuState, ModelRotation, SceneUniform};
use ui::{MeshInfo, UiActions, ViewerState, apply_theme, draw_fps, draw_hint, draw_mesh_panel};

#[derive(Parser, Debug)]
#[command(name = "offview")]
#[command(about = "Drag-and-drop viewer for OFF triangle meshes")]
struct Cli {
    /// OFF file to open at start-up
    path: Option<PathBuf>,

    /// Include the origin in the bounding box used for centering
    #[arg(long)]
    origin_seeded_bounds: bool,

    #[arg(long)]
    vsync: bool,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frame rate cap, 0 disables it
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Degrees of rotation per pixel of mouse drag
    #[arg(long, default_value_t = 0.4)]
    sensitivity: f32,
}

impl Cli {
    fn into_config(self) -> (ViewerConfig, Option<PathBuf>) {
        let config = ViewerConfig {
            width: self.width.max(1),
            height: self.height.max(1),
            vsync: self.vsync,
            target_fps: (self.fps > 0).then_some(self.fps),
            rotation_sensitivity: self.sensitivity,
            bounds_seed: if self.origin_seeded_bounds {
                BoundsSeed::Origin
            } else {
                BoundsSeed::FirstVertex
            },
            ..ViewerConfig::default()
        };
        (config, self.path)
    }
}

#[derive(Default)]
struct InputState {
    rotating: bool,
    cursor: Option<PhysicalPosition<f64>>,
    drag_delta: Vec2,
}

struct App {
    config: ViewerConfig,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    rotation: ModelRotation,
    ui_state: ViewerState,
    input: InputState,

    pending_drops: Vec<PathBuf>,
    startup_path: Option<PathBuf>,

    frame_count: u32,
    fps_timer: Instant,
    last_vsync_state: bool,
    last_frame_time: Instant,

    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, startup_path: Option<PathBuf>) -> Self {
        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::from_config(&config),
            rotation: ModelRotation::new(config.rotation_sensitivity),
            ui_state: ViewerState::from_config(&config),
            input: InputState::default(),

            pending_drops: Vec::new(),
            startup_path,

            frame_count: 0,
            fps_timer: Instant::now(),
            last_vsync_state: config.vsync,
            last_frame_time: Instant::now(),

            init_error: None,
            config,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> anyhow::Result<()> {
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.vsync))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let size = window.inner_size();
        self.camera
            .set_aspect(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);

        if let Some(path) = self.startup_path.take() {
            self.open(&path);
        }

        Ok(())
    }

    fn open(&mut self, path: &Path) {
        let Some(gpu) = &mut self.gpu else { return };

        match gpu.open_mesh(path, self.config.bounds_seed) {
            Ok(loaded) => {
                self.ui_state.mesh_info = Some(MeshInfo::from_loaded(&loaded));
                self.ui_state.last_error = None;
            }
            Err(e) => {
                if e.is_io() {
                    error!("failed to read {}: {e}", path.display());
                } else {
                    warn!("{} is not a valid OFF file: {e}", path.display());
                }
                self.ui_state.last_error = Some(e.to_string());
            }
        }
    }

    fn handle_dropped_files(&mut self) {
        if self.pending_drops.is_empty() {
            return;
        }

        let drops = std::mem::take(&mut self.pending_drops);
        let (mut meshes, ignored): (Vec<_>, Vec<_>) =
            drops.into_iter().partition(|p| is_off_path(p));

        for path in &ignored {
            debug!("ignoring dropped file {}", path.display());
        }

        // one mesh on screen at a time: the first dropped .off wins
        if !meshes.is_empty() {
            let path = meshes.swap_remove(0);
            info!("loading {}", path.display());
            self.open(&path);
        }
    }

    fn update(&mut self) {
        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            self.ui_state.fps = self.frame_count as f32 / self.fps_timer.elapsed().as_secs_f32();
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        if self.input.drag_delta != Vec2::ZERO {
            self.rotation.process_drag(self.input.drag_delta);
        }
        self.input.drag_delta = Vec2::ZERO;
    }

    fn render(&mut self) {
        if self.ui_state.fps_cap_enabled && self.ui_state.fps_cap > 0 {
            let frame_duration = Duration::from_secs_f64(1.0 / self.ui_state.fps_cap as f64);
            let elapsed = self.last_frame_time.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
        self.last_frame_time = Instant::now();

        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);
        let loaded = self.gpu.as_ref().is_some_and(|gpu| gpu.mesh.is_loaded());
        let fps = self.ui_state.fps;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            draw_hint(ctx, loaded);
            draw_fps(ctx, fps);
            ui_actions = draw_mesh_panel(ctx, &mut self.ui_state);
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("out of GPU memory, skipping frame");
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_scene(&SceneUniform::new(
            &self.camera,
            self.rotation.matrix(),
            self.config.light_position,
            self.config.base_color,
        ));

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_mesh(&view, &mut encoder, self.config.clear_color);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.reset_view {
            self.reset_view();
        }

        if actions.dismiss_error {
            self.ui_state.last_error = None;
        }
    }

    fn reset_view(&mut self) {
        self.rotation.reset();
        self.camera.reset();
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::KeyR if pressed => self.reset_view(),
            KeyCode::Tab if pressed => self.ui_state.show_panel = !self.ui_state.show_panel,
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let result = event_loop
            .create_window(window_attrs)
            .context("failed to create window")
            .and_then(|window| self.init_gpu(Arc::new(window)));

        if let Err(e) = result {
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::DroppedFile(path) = &event {
            self.pending_drops.push(path.clone());
        }

        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.input.rotating = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(prev) = self.input.cursor {
                    if self.input.rotating {
                        self.input.drag_delta.x += (position.x - prev.x) as f32;
                        self.input.drag_delta.y += (position.y - prev.y) as f32;
                    }
                }
                self.input.cursor = Some(position);
            }

            WindowEvent::CursorLeft { .. } => {
                self.input.cursor = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                // loads happen between frames so drawing never sees a half-built mesh
                self.handle_dropped_files();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, startup_path) = Cli::parse().into_config();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, startup_path);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
