//! wgpu rendering for the orrery: device and surface management, reverse-Z
//! depth, the camera, and the three pipelines the scene is drawn with
//! (star billboards, orbit lines, lit bodies). The egui overlay is drawn
//! over the scene in a second pass.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod lit_pipeline;
pub mod overlay;
pub mod pass;
pub mod pipeline;
pub mod renderer;
pub mod surface;

pub use buffer::{
    BodyInstance, BufferAllocator, InstanceBuffer, MeshBuffer, StarInstance, VertexBuffer,
    VertexPositionColor, VertexPositionNormal,
};
pub use camera::{Camera, Ray};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use lit_pipeline::{BODY_SHADER_SOURCE, BodyPipeline, LightUniform};
pub use overlay::{OverlayFrame, OverlayRenderer};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{CameraUniform, LINE_SHADER_SOURCE, LinePipeline, STAR_SHADER_SOURCE, StarPipeline};
pub use renderer::{SceneGeometry, SceneRenderer};
pub use surface::{PhysicalSize, SurfaceWrapper};
