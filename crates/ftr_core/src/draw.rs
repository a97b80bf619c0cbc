//! Draw command recording.
//!
//! The scene builder never talks to the GPU. It walks the model with a
//! [`Painter`], which pairs a [`TransformStack`] with a list of
//! [`DrawCommand`]s; each command captures the transform that was on top of
//! the stack when the primitive was emitted. The renderer later replays the
//! list once per viewport.

use glam::{Mat4, Vec3};

use crate::palette::Color;
use crate::render_mode::RenderMode;
use crate::transform::TransformStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
    Cylinder,
    Torus,
}

impl MeshKind {
    pub const ALL: &'static [MeshKind] = &[
        MeshKind::Cube,
        MeshKind::Sphere,
        MeshKind::Cylinder,
        MeshKind::Torus,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    /// Model transform; the renderer prepends the camera view.
    pub transform: Mat4,
    pub color: Color,
    pub fill_mode: RenderMode,
}

pub struct Painter {
    stack: TransformStack,
    mode: RenderMode,
    commands: Vec<DrawCommand>,
}

impl Painter {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            stack: TransformStack::new(),
            mode,
            commands: Vec::new(),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn push(&mut self) {
        self.stack.push();
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Run `f` with the current transform saved, restoring it afterwards.
    pub fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.depth();
        self.push();
        f(self);
        debug_assert_eq!(self.depth(), depth + 1, "unbalanced transform scope");
        self.pop();
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.stack.translate(Vec3::new(x, y, z));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.stack.scale(Vec3::new(x, y, z));
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.stack.rotate_x(degrees);
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.stack.rotate_y(degrees);
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.stack.rotate_z(degrees);
    }

    /// Record one primitive under the current transform.
    pub fn draw(&mut self, mesh: MeshKind, color: Color, fill_mode: RenderMode) {
        self.commands.push(DrawCommand {
            mesh,
            transform: self.stack.top(),
            color,
            fill_mode,
        });
    }

    /// Record one primitive in the global fill mode.
    pub fn plain(&mut self, mesh: MeshKind, color: Color) {
        self.draw(mesh, color, self.mode);
    }

    /// Record the outlined pair: the body in the global mode, then its edges.
    pub fn solid(&mut self, mesh: MeshKind, base: Color, edge: Color) {
        self.plain(mesh, base);
        self.draw(mesh, edge, RenderMode::Wireframe);
    }

    /// Hand over the recorded commands.
    ///
    /// # Panics
    ///
    /// Panics if a push was left without its pop.
    pub fn finish(self) -> Vec<DrawCommand> {
        assert_eq!(
            self.stack.depth(),
            0,
            "scene traversal left {} transform(s) on the stack",
            self.stack.depth()
        );
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DARK_RED, RED};

    #[test]
    fn solid_emits_body_then_outline() {
        let mut painter = Painter::new(RenderMode::Filled);
        painter.solid(MeshKind::Cube, RED, DARK_RED);
        let commands = painter.finish();

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].color, RED);
        assert_eq!(commands[0].fill_mode, RenderMode::Filled);
        assert_eq!(commands[1].color, DARK_RED);
        assert_eq!(commands[1].fill_mode, RenderMode::Wireframe);
    }

    #[test]
    fn wireframe_mode_applies_to_body_pass() {
        let mut painter = Painter::new(RenderMode::Wireframe);
        painter.solid(MeshKind::Torus, RED, DARK_RED);
        painter.plain(MeshKind::Sphere, RED);
        let commands = painter.finish();

        assert!(commands
            .iter()
            .all(|c| c.fill_mode == RenderMode::Wireframe));
    }

    #[test]
    fn commands_capture_transform_at_emit_time() {
        let mut painter = Painter::new(RenderMode::Filled);
        painter.scoped(|p| {
            p.translate(1.0, 0.0, 0.0);
            p.plain(MeshKind::Cube, RED);
        });
        painter.plain(MeshKind::Cube, RED);
        let commands = painter.finish();

        assert_eq!(
            commands[0].transform,
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
        );
        assert_eq!(commands[1].transform, Mat4::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "left 1 transform")]
    fn finish_rejects_unbalanced_traversal() {
        let mut painter = Painter::new(RenderMode::Filled);
        painter.push();
        painter.plain(MeshKind::Cube, RED);
        let _ = painter.finish();
    }
}
