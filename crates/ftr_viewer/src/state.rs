//! Scene state and the key-driven transitions that mutate it.
//!
//! Every transition applies a bounded increment and then clamps, so the
//! ranges documented on [`CarState`] and [`LadderState`] hold after any
//! sequence of actions.

use std::f32::consts::PI;

use ftr_core::RenderMode;
use ftr_render::CameraRig;
use glam::Vec3;

use crate::blinker::Blinker;
use crate::config::SceneSettings;
use crate::controls::Action;

// The radius is stepped in f64: whether a step lands past a bound depends on
// double-precision rounding (0.49 + 0.01 > 0.5).
pub const MIN_WHEEL_RADIUS: f64 = 0.1;
pub const MAX_WHEEL_RADIUS: f64 = 0.5;
const WHEEL_RADIUS_STEP: f64 = 0.01;
/// Zoom follows the wheel radius so the truck keeps its on-screen size.
const ZOOM_PER_RADIUS_STEP: f32 = 0.05;
const ZOOM_KEY_STEP: f32 = 0.1;

pub const CAR_X_LIMIT: f32 = 0.5;
const DRIVE_STEP: f32 = 0.01;

pub const MIN_LADDER_ANGLE: f32 = -90.0;
pub const MAX_LADDER_ANGLE: f32 = 0.0;
const LADDER_ANGLE_STEP: f32 = 5.0;
const LADDER_ROTATION_STEP: f32 = 5.0;
const INITIAL_LADDER_ANGLE: f32 = -10.0;

pub const MIN_LADDER_STEPS: u32 = 5;
pub const MAX_LADDER_STEPS: u32 = 20;

const ORBIT_STEP: f32 = 1.0;

/// Lengths derived from the wheel radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruckMetrics {
    pub wheel_radius: f32,
    pub wheel_width: f32,
    /// `(-x, +z)`, `(+x, +z)`, `(-x, -z)`, `(+x, -z)`; the cab is at `-x`.
    pub wheel_positions: [Vec3; 4],
    pub dist_x: f32,
    pub dist_z: f32,
    pub blinker_positions: [Vec3; 4],
    pub blinker_radius: f32,
    pub ride_height: f32,
}

impl TruckMetrics {
    pub fn new(wheel_radius: f32) -> Self {
        let r = wheel_radius;
        let ww = r / 2.0;
        let (wx, wz) = (2.0 * r, 3.0 * ww);
        let dist_x = 4.0 * r - r - ww;
        let dist_z = 6.0 * ww - ww / 2.0;
        let front = Vec3::new(-3.0 * r, 1.2 * r, dist_z / 2.0);
        let back = Vec3::new(3.0 * r + ww / 2.0, 0.35 * r, 0.4 * dist_z);

        Self {
            wheel_radius: r,
            wheel_width: ww,
            wheel_positions: [
                Vec3::new(-wx, 0.0, wz),
                Vec3::new(wx, 0.0, wz),
                Vec3::new(-wx, 0.0, -wz),
                Vec3::new(wx, 0.0, -wz),
            ],
            dist_x,
            dist_z,
            blinker_positions: [
                front,
                front * Vec3::new(1.0, 1.0, -1.0),
                back,
                back * Vec3::new(1.0, 1.0, -1.0),
            ],
            blinker_radius: 0.6 * ww,
            ride_height: (r + ww) / 2.0,
        }
    }

    /// Past this extension the fly section snaps back to [`Self::max_extension`].
    pub fn extension_limit(&self) -> f32 {
        3.5 * self.wheel_radius - 1.5 * self.wheel_width
    }

    pub fn max_extension(&self) -> f32 {
        2.9 * self.wheel_radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarState {
    /// `x` stays within `[-CAR_X_LIMIT, CAR_X_LIMIT]`.
    pub position: Vec3,
    pub body_rotation: f32,
    pub wheel_rotation: f32,
    /// `[MIN_WHEEL_RADIUS, MAX_WHEEL_RADIUS]`.
    pub wheel_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderState {
    /// Tilt in degrees, `[-90, 0]`.
    pub angle: f32,
    /// Turntable rotation in degrees, unbounded.
    pub rotation: f32,
    /// Fly section offset, `[0, 2.9 * wheel_radius]`.
    pub extension: f32,
    pub steps: u32,
}

pub struct SceneState {
    pub car: CarState,
    pub ladder: LadderState,
    pub camera: CameraRig,
    pub blinkers: [Blinker; 4],
    pub render_mode: RenderMode,
    pub panel_visible: bool,
    pub metrics: TruckMetrics,
}

impl SceneState {
    pub fn new(settings: &SceneSettings) -> Self {
        let wheel_radius = settings
            .wheel_radius
            .clamp(MIN_WHEEL_RADIUS, MAX_WHEEL_RADIUS);
        let metrics = TruckMetrics::new(wheel_radius as f32);

        Self {
            car: CarState {
                position: Vec3::new(0.0, metrics.ride_height, 0.0),
                body_rotation: 0.0,
                wheel_rotation: 0.0,
                wheel_radius,
            },
            ladder: LadderState {
                angle: INITIAL_LADDER_ANGLE,
                rotation: 0.0,
                extension: 0.0,
                steps: settings
                    .ladder_steps
                    .clamp(MIN_LADDER_STEPS, MAX_LADDER_STEPS),
            },
            camera: CameraRig::new(settings.zoom),
            blinkers: place_blinkers(&metrics),
            render_mode: RenderMode::default(),
            panel_visible: settings.show_panel,
            metrics,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectView(view) => {
                self.camera.select(view);
                log::info!("View: {view}");
            }
            Action::ToggleQuad => {
                self.camera.toggle_quad();
                log::info!(
                    "View: {}",
                    if self.camera.is_quad() {
                        "all four".to_string()
                    } else {
                        self.camera.active().to_string()
                    }
                );
            }
            Action::TogglePanel => self.panel_visible = !self.panel_visible,
            Action::RotateLadder(dir) => {
                self.ladder.rotation += f32::from(dir) * LADDER_ROTATION_STEP;
            }
            Action::TiltLadder(dir) => {
                self.ladder.angle = (self.ladder.angle + f32::from(dir) * LADDER_ANGLE_STEP)
                    .clamp(MIN_LADDER_ANGLE, MAX_LADDER_ANGLE);
            }
            Action::ExtendLadder => {
                self.ladder.extension += 0.1 * self.metrics.wheel_radius;
                self.snap_extension();
            }
            Action::RetractLadder => {
                self.ladder.extension =
                    (self.ladder.extension - 0.1 * self.metrics.wheel_radius).max(0.0);
            }
            Action::Drive(dir) => self.drive(f32::from(dir) * DRIVE_STEP),
            Action::Orbit { theta, gamma } => self.camera.orbit(
                f32::from(theta) * ORBIT_STEP,
                f32::from(gamma) * ORBIT_STEP,
            ),
            Action::ResetCamera => self.camera.reset_axonometric(),
            Action::ToggleFill => {
                self.render_mode = self.render_mode.toggled();
                log::info!("Render mode: {}", self.render_mode);
            }
            Action::Zoom(dir) => self.camera.add_zoom(f32::from(dir) * ZOOM_KEY_STEP),
            Action::StartBlinkers => {
                for blinker in &mut self.blinkers {
                    blinker.start();
                }
                log::debug!("Blinkers started");
            }
            Action::GrowWheels => {
                let grown = self.car.wheel_radius + WHEEL_RADIUS_STEP;
                if grown > MAX_WHEEL_RADIUS {
                    self.set_wheel_radius(MAX_WHEEL_RADIUS);
                } else {
                    self.camera.add_zoom(ZOOM_PER_RADIUS_STEP);
                    self.set_wheel_radius(grown);
                }
            }
            Action::ShrinkWheels => {
                let shrunk = self.car.wheel_radius - WHEEL_RADIUS_STEP;
                if shrunk < MIN_WHEEL_RADIUS {
                    self.set_wheel_radius(MIN_WHEEL_RADIUS);
                } else {
                    self.camera.add_zoom(-ZOOM_PER_RADIUS_STEP);
                    self.set_wheel_radius(shrunk);
                }
                self.snap_extension();
            }
            Action::AddStep => {
                self.ladder.steps = (self.ladder.steps + 1).min(MAX_LADDER_STEPS);
            }
            Action::RemoveStep => {
                self.ladder.steps = self.ladder.steps.saturating_sub(1).max(MIN_LADDER_STEPS);
            }
        }
    }

    /// Advance the per-tick animations.
    pub fn tick(&mut self) {
        for blinker in &mut self.blinkers {
            blinker.tick();
        }
    }

    /// Scroll-wheel zoom, `delta_y` in pixels with positive meaning away.
    pub fn scroll(&mut self, delta_y: f32) {
        self.camera.scroll_zoom(delta_y);
    }

    pub fn blinkers_active(&self) -> usize {
        self.blinkers.iter().filter(|b| b.blinking).count()
    }

    /// Wheel rotation in degrees for a linear displacement of `dx`.
    pub fn wheel_degrees(&self, dx: f32) -> f32 {
        dx / (2.0 * PI * self.metrics.wheel_radius) * 360.0
    }

    fn drive(&mut self, dx: f32) {
        self.car.position.x = (self.car.position.x + dx).clamp(-CAR_X_LIMIT, CAR_X_LIMIT);
        // The wheels turn by the nominal step even when the body is clamped.
        self.car.wheel_rotation -= self.wheel_degrees(dx);
    }

    /// Rebuild the truck around a new radius. The car returns to the origin.
    fn set_wheel_radius(&mut self, radius: f64) {
        self.car.wheel_radius = radius;
        self.metrics = TruckMetrics::new(radius as f32);
        self.car.position = Vec3::new(0.0, self.metrics.ride_height, 0.0);
        self.blinkers = place_blinkers(&self.metrics);
        log::debug!("Wheel radius: {radius:.2}");
    }

    fn snap_extension(&mut self) {
        if self.ladder.extension > self.metrics.extension_limit() {
            self.ladder.extension = self.metrics.max_extension();
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(&SceneSettings::default())
    }
}

fn place_blinkers(metrics: &TruckMetrics) -> [Blinker; 4] {
    metrics.blinker_positions.map(Blinker::new)
}
