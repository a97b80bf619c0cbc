//! Hierarchical transform stack.
//!
//! The stack holds the current composed transform plus every transform saved
//! by `push()`. Elementary transforms right-multiply the current matrix, so
//! the last one applied is the first one seen by local coordinates:
//!
//! ```text
//! stack.translate(p);   // applied to the vertex last
//! stack.rotate_y(a);
//! stack.scale(s);       // applied to the vertex first
//! ```
//!
//! Angles are in degrees, matching the key-driven scene parameters.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn top(&self) -> Mat4 {
        self.current
    }

    /// Number of saved transforms below the current one.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the transform saved by the matching `push()`.
    ///
    /// # Panics
    ///
    /// Panics if there is no saved transform. An unbalanced pop is a bug in
    /// the traversal, not a runtime condition.
    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(m) => self.current = m,
            None => panic!("TransformStack::pop called with no matching push"),
        }
    }

    fn multiply(&mut self, m: Mat4) {
        self.current *= m;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.multiply(Mat4::from_rotation_x(degrees.to_radians()));
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.multiply(Mat4::from_rotation_y(degrees.to_radians()));
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.multiply(Mat4::from_rotation_z(degrees.to_radians()));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.multiply(Mat4::from_scale(factors));
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
