pub mod camera;
pub mod frame_pipeline;
pub mod gpu_context;
pub mod text;
pub mod texture;
pub mod vertex;

pub use camera::{CameraUniform, FrameCamera};
pub use frame_pipeline::FramePipeline;
pub use gpu_context::GpuContext;
pub use text::TitleFont;
pub use texture::FrameTexture;
pub use vertex::FrameVertex;
