//! Fire truck viewer: main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Key-down events are
//! queued in `InputState` as they arrive and applied in order at the start of
//! each `RedrawRequested`:
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed the tick accumulator
//!   2. apply queued presses and scroll as scene transitions
//!   3. `while should_tick()` -- advance blinkers at the fixed tick rate
//!   4. rebuild the draw list, replay it once per viewport, composite the panel

mod blinker;
mod config;
mod controls;
#[cfg(test)]
mod replay;
mod scene;
mod state;
mod truck;

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key as LogicalKey, NamedKey};
use winit::window::{Window, WindowId};

use config::ViewerConfig;
use controls::{key_from_name, Action, BINDINGS};
use ftr_core::input::{InputState, Key};
use ftr_core::time::TimeState;
use ftr_devtools::{ControlPanel, PanelStatus};
use ftr_platform::window::PlatformConfig;
use ftr_render::{GpuContext, SolidPipeline, ViewPass};
use state::SceneState;

const DEFAULT_CONFIG_PATH: &str = "assets/config/viewer.json";
/// Browser wheel events report about this many pixels per line.
const PIXELS_PER_SCROLL_LINE: f64 = 100.0;

struct ViewerState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    scene: SceneState,
    pipeline: SolidPipeline,
    panel: ControlPanel,
    clear_color: wgpu::Color,
}

impl ViewerState {
    fn new(window: Arc<Window>, config: &ViewerConfig) -> Self {
        let gpu = GpuContext::new(window.clone());
        let scene = SceneState::new(&config.scene);
        let pipeline = SolidPipeline::new(&gpu.device, gpu.surface_format);
        let panel = ControlPanel::new(
            &gpu.device,
            gpu.surface_format,
            &window,
            BINDINGS,
            scene.panel_visible,
        );
        let [r, g, b, a] = config.clear_color;

        Self {
            window,
            gpu,
            time: TimeState::new(config.tick_rate_hz),
            input: InputState::new(),
            scene,
            pipeline,
            panel,
            clear_color: wgpu::Color { r, g, b, a },
        }
    }

    fn panel_status(&self, draw_commands: usize) -> PanelStatus {
        let scene = &self.scene;
        PanelStatus {
            wheel_radius: scene.metrics.wheel_radius,
            car_x: scene.car.position.x,
            wheel_rotation: scene.car.wheel_rotation,
            ladder_angle: scene.ladder.angle,
            ladder_rotation: scene.ladder.rotation,
            ladder_extension: scene.ladder.extension,
            ladder_steps: scene.ladder.steps,
            blinkers_active: scene.blinkers_active(),
            view_label: scene.camera.active().to_string(),
            quad_view: scene.camera.is_quad(),
            mode_label: scene.render_mode.to_string(),
            zoom: scene.camera.zoom,
            theta: scene.camera.theta(),
            gamma: scene.camera.gamma(),
            draw_commands,
        }
    }
}

struct App {
    config: ViewerConfig,
    state: Option<ViewerState>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let platform = PlatformConfig {
            title: self.config.window.title.clone(),
            width: self.config.window.width,
            height: self.config.window.height,
        };
        let window = ftr_platform::window::create_window(event_loop, &platform);
        log::info!("Window created: {}x{}", platform.width, platform.height);
        self.state = Some(ViewerState::new(window, &self.config));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.panel.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::Focused(false) => state.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let Some(key) = map_key(&event.logical_key) {
                    match event.state {
                        ElementState::Pressed => state.input.key_down(key, event.repeat),
                        ElementState::Released => state.input.key_up(key),
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } if !egui_consumed => {
                // winit reports scrolling up as positive; the zoom uses the
                // browser convention where scrolling down is positive.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * PIXELS_PER_SCROLL_LINE,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y,
                };
                state.input.scroll(delta_y);
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.time.begin_frame();

                for key in state.input.drain_presses() {
                    if key == Key::Escape {
                        log::info!("Escape pressed, exiting.");
                        event_loop.exit();
                        return;
                    }
                    if let Some(action) = Action::for_key(key) {
                        state.scene.apply(action);
                    }
                }
                let scroll = state.input.take_scroll();
                if scroll != 0.0 {
                    state.scene.scroll(scroll as f32);
                }
                state.panel.set_visible(state.scene.panel_visible);

                while state.time.should_tick() {
                    state.scene.tick();
                }

                let commands = scene::build_scene(&state.scene);
                let camera = &state.scene.camera;
                let passes: Vec<ViewPass> = camera
                    .layout(state.gpu.size.0, state.gpu.size.1)
                    .into_iter()
                    .map(|(viewport, view)| ViewPass {
                        viewport,
                        view: camera.view_matrix(view),
                    })
                    .collect();
                // Each quadrant keeps the surface aspect, matching the single view.
                let projection = camera.projection(state.gpu.aspect());
                state.pipeline.prepare(
                    &state.gpu.device,
                    &state.gpu.queue,
                    projection,
                    &passes,
                    &commands,
                );

                let Some((output, view)) = state.gpu.begin_frame() else {
                    return;
                };

                let status = state.panel_status(commands.len());
                let (egui_primitives, egui_textures_delta) =
                    state.panel.prepare(&state.window, &state.time, &status);
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.gpu.size.0, state.gpu.size.1],
                    pixels_per_point: state.window.scale_factor() as f32,
                };

                let mut encoder =
                    state
                        .gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Render Encoder"),
                        });

                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Scene Render Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(state.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                            view: &state.gpu.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        }),
                        ..Default::default()
                    });

                    state.pipeline.render(&mut render_pass, &passes, &commands);
                }

                state.panel.upload(
                    &state.gpu.device,
                    &state.gpu.queue,
                    &mut encoder,
                    &egui_primitives,
                    &egui_textures_delta,
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

                    state
                        .panel
                        .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
                }

                state.panel.cleanup(&egui_textures_delta);

                state.gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();
            }

            _ => {}
        }
    }
}

/// Keys are matched by the character they produce, so bindings follow the
/// active keyboard layout. Shifted letters map to the same key.
fn map_key(key: &LogicalKey) -> Option<Key> {
    match key {
        LogicalKey::Character(text) => key_from_name(&text.to_lowercase()),
        LogicalKey::Named(named) => match named {
            NamedKey::ArrowUp => Some(Key::Up),
            NamedKey::ArrowDown => Some(Key::Down),
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowRight => Some(Key::Right),
            NamedKey::Space => Some(Key::Space),
            NamedKey::PageUp => Some(Key::PageUp),
            NamedKey::PageDown => Some(Key::PageDown),
            NamedKey::Escape => Some(Key::Escape),
            _ => None,
        },
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Fire truck viewer starting...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = config::load_or_default(&config_path);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
