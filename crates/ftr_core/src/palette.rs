//! Flat RGBA colors shared by the scene builder and the renderer.

use glam::Vec4;

pub type Color = Vec4;

pub const WHITE: Color = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const GRAY: Color = Vec4::new(0.4, 0.4, 0.4, 1.0);
pub const DARK_GRAY: Color = Vec4::new(0.3, 0.3, 0.3, 1.0);
pub const LIGHT_GRAY: Color = Vec4::new(0.7, 0.7, 0.7, 1.0);
pub const RED: Color = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const DARK_RED: Color = Vec4::new(0.8, 0.0, 0.0, 1.0);
pub const YELLOW: Color = Vec4::new(1.0, 1.0, 0.0, 1.0);
pub const ORANGE: Color = Vec4::new(1.0, 0.66, 0.0, 1.0);
pub const DARK_ORANGE: Color = Vec4::new(0.8, 0.5, 0.0, 1.0);
pub const BLUE: Color = Vec4::new(0.0, 0.6, 1.0, 1.0);
/// Translucent; used for the cabin glass.
pub const LIGHT_BLUE: Color = Vec4::new(0.0, 0.6, 0.8, 0.8);
