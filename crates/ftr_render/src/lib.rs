pub mod camera;
pub mod gpu_context;
pub mod mesh;
pub mod solid_pipeline;
pub mod vertex;

pub use camera::{CameraRig, CameraUniform, ViewKind, Viewport};
pub use gpu_context::GpuContext;
pub use mesh::MeshData;
pub use solid_pipeline::{SolidPipeline, ViewPass};
pub use vertex::MeshVertex;
