use glam::{Mat4, Vec3};

pub const DEFAULT_ZOOM: f32 = 1.2;
pub const DEFAULT_THETA: f32 = -25.0;
pub const DEFAULT_GAMMA: f32 = 25.0;
const MIN_ZOOM: f32 = 0.05;
const NEAR: f32 = -100.0;
const FAR: f32 = 100.0;
const EYE_DISTANCE: f32 = 10.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_projection(projection: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Front,
    Left,
    Top,
    Axonometric,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Left => "Left",
            Self::Top => "Top",
            Self::Axonometric => "Axonometric",
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pixel rectangle with a top-left origin, as consumed by
/// `RenderPass::set_viewport`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Orthographic camera rig with three fixed views and one orbiting
/// axonometric view.
///
/// The active single view is stored as a [`ViewKind`], so the axonometric
/// matrix keeps following theta/gamma no matter which view is shown.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub zoom: f32,
    theta: f32,
    gamma: f32,
    active: ViewKind,
    quad: bool,
    front: Mat4,
    left: Mat4,
    top: Mat4,
    axonometric: Mat4,
}

impl CameraRig {
    pub fn new(zoom: f32) -> Self {
        let front = Mat4::look_at_rh(Vec3::new(0.0, 0.0, EYE_DISTANCE), Vec3::ZERO, Vec3::Y);
        let left = front * Mat4::from_rotation_y(90f32.to_radians());
        let top = front * Mat4::from_rotation_x(90f32.to_radians());
        let mut rig = Self {
            zoom: zoom.max(MIN_ZOOM),
            theta: DEFAULT_THETA,
            gamma: DEFAULT_GAMMA,
            active: ViewKind::Axonometric,
            quad: false,
            front,
            left,
            top,
            axonometric: front,
        };
        rig.update_axonometric();
        rig
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn active(&self) -> ViewKind {
        self.active
    }

    pub fn is_quad(&self) -> bool {
        self.quad
    }

    /// Show a single view full-surface.
    pub fn select(&mut self, view: ViewKind) {
        self.quad = false;
        self.active = view;
    }

    pub fn toggle_quad(&mut self) {
        self.quad = !self.quad;
    }

    /// Rotate the axonometric camera by the given degrees.
    pub fn orbit(&mut self, d_theta: f32, d_gamma: f32) {
        self.theta += d_theta;
        self.gamma += d_gamma;
        self.update_axonometric();
    }

    pub fn reset_axonometric(&mut self) {
        self.theta = DEFAULT_THETA;
        self.gamma = DEFAULT_GAMMA;
        self.update_axonometric();
    }

    pub fn add_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).max(MIN_ZOOM);
    }

    /// Wheel zoom: `deltaY` in browser pixel units, positive zooms out.
    pub fn scroll_zoom(&mut self, delta_y: f32) {
        self.zoom = (self.zoom * (1.0 + delta_y / 1000.0)).max(MIN_ZOOM);
    }

    fn update_axonometric(&mut self) {
        self.axonometric = self.front
            * Mat4::from_rotation_x(self.gamma.to_radians())
            * Mat4::from_rotation_y(self.theta.to_radians());
    }

    pub fn view_matrix(&self, view: ViewKind) -> Mat4 {
        match view {
            ViewKind::Front => self.front,
            ViewKind::Left => self.left,
            ViewKind::Top => self.top,
            ViewKind::Axonometric => self.axonometric,
        }
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::orthographic_rh(
            -aspect * self.zoom,
            aspect * self.zoom,
            -self.zoom,
            self.zoom,
            NEAR,
            FAR,
        )
    }

    /// Viewports to render this frame and the view shown in each.
    ///
    /// Quad layout: front top-left, left top-right, top bottom-left,
    /// axonometric bottom-right.
    pub fn layout(&self, width: u32, height: u32) -> Vec<(Viewport, ViewKind)> {
        let (w, h) = (width as f32, height as f32);
        if !self.quad {
            return vec![(
                Viewport {
                    x: 0.0,
                    y: 0.0,
                    width: w,
                    height: h,
                },
                self.active,
            )];
        }

        let (hw, hh) = ((width / 2) as f32, (height / 2) as f32);
        let quadrant = |x: f32, y: f32| Viewport {
            x,
            y,
            width: hw,
            height: hh,
        };
        vec![
            (quadrant(0.0, 0.0), ViewKind::Front),
            (quadrant(hw, 0.0), ViewKind::Left),
            (quadrant(0.0, hh), ViewKind::Top),
            (quadrant(hw, hh), ViewKind::Axonometric),
        ]
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}
