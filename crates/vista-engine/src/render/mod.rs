//! GPU rendering subsystem.
//!
//! Renderers consume `draw` streams and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - Vertex positions are already in clip space (textured quads) or are
//!   mapped there by a projection matrix (flat triangles).
//! - Each draw command becomes one instance; per-draw parameters travel in a
//!   per-instance vertex buffer.

mod common;
mod ctx;
mod flat_triangle;
mod textured_quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use flat_triangle::FlatTriangleRenderer;
pub use textured_quad::TexturedQuadRenderer;

/// WGSL source of the textured-quad pipeline.
pub const TEXTURED_QUAD_WGSL: &str = include_str!("shaders/textured_quad.wgsl");
/// WGSL source of the flat-triangle pipeline.
pub const FLAT_TRIANGLE_WGSL: &str = include_str!("shaders/flat_triangle.wgsl");
