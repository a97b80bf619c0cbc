pub mod draw;
pub mod input;
pub mod palette;
pub mod render_mode;
pub mod time;
pub mod transform;

pub use draw::{DrawCommand, MeshKind, Painter};
pub use render_mode::RenderMode;
pub use transform::TransformStack;
