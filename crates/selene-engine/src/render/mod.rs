//! GPU rendering subsystem.
//!
//! Renderers consume the frame's `DrawList` and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.
//! - Colors reach the GPU linear and premultiplied.

mod ctx;
mod shader_locs;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use shader_locs::{default_shader_locations, ShaderLocation, MAX_SHADER_LOCATIONS};
