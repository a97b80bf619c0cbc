//! Side panel with the key bindings and live scene status, drawn with egui on
//! top of the scene.
//!
//! egui needs a three-phase render split because `egui_wgpu::Renderer::render()`
//! takes a `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` -- run the UI, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! Input is always routed through egui so the panel can claim clicks and
//! keyboard focus while it is shown.

use ftr_core::time::TimeState;
use winit::window::Window;

#[derive(Debug, Clone, Default)]
pub struct PanelStatus {
    pub wheel_radius: f32,
    pub car_x: f32,
    pub wheel_rotation: f32,
    pub ladder_angle: f32,
    pub ladder_rotation: f32,
    pub ladder_extension: f32,
    pub ladder_steps: u32,
    pub blinkers_active: usize,
    pub view_label: String,
    pub quad_view: bool,
    pub mode_label: String,
    pub zoom: f32,
    pub theta: f32,
    pub gamma: f32,
    pub draw_commands: usize,
}

pub struct ControlPanel {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
    bindings: &'static [(&'static str, &'static str)],
}

impl ControlPanel {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
        bindings: &'static [(&'static str, &'static str)],
        visible: bool,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible,
            bindings,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            log::info!("Control panel: {}", if visible { "shown" } else { "hidden" });
        }
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        status: &PanelStatus,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let bindings = self.bindings;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !self.visible {
                return;
            }
            egui::SidePanel::left("controls")
                .resizable(false)
                .default_width(230.0)
                .show(ctx, |ui| {
                    ui.heading("Controls");
                    egui::Grid::new("bindings")
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui| {
                            for (key, action) in bindings {
                                ui.monospace(*key);
                                ui.label(*action);
                                ui.end_row();
                            }
                        });

                    ui.separator();
                    ui.heading("Truck");
                    ui.label(format!("Wheel radius: {:.2}", status.wheel_radius));
                    ui.label(format!("Position x: {:.2}", status.car_x));
                    ui.label(format!("Wheel rotation: {:.1}\u{b0}", status.wheel_rotation));
                    ui.label(format!(
                        "Blinkers: {}",
                        if status.blinkers_active > 0 { "on" } else { "off" }
                    ));

                    ui.separator();
                    ui.heading("Ladder");
                    ui.label(format!("Angle: {:.0}\u{b0}", status.ladder_angle));
                    ui.label(format!("Rotation: {:.0}\u{b0}", status.ladder_rotation));
                    ui.label(format!("Extension: {:.3}", status.ladder_extension));
                    ui.label(format!("Steps: {}", status.ladder_steps));

                    ui.separator();
                    ui.heading("View");
                    if status.quad_view {
                        ui.label("Layout: all views");
                    } else {
                        ui.label(format!("Layout: {}", status.view_label));
                    }
                    ui.label(format!("Mode: {}", status.mode_label));
                    ui.label(format!("Zoom: {:.2}", status.zoom));
                    ui.label(format!(
                        "Theta / gamma: {:.0}\u{b0} / {:.0}\u{b0}",
                        status.theta, status.gamma
                    ));

                    ui.separator();
                    ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                    ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                    ui.label(format!("Draw commands: {}", status.draw_commands));
                });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
