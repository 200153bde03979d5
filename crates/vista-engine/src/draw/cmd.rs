use glam::Mat4;

use crate::assets::TextureId;
use crate::coords::Vec2;
use crate::geometry::{PosVertex, TexturedVertex, QUAD_VERTEX_COUNT};
use crate::paint::Color;

/// Renderer-agnostic draw command stream.
///
/// Adding a primitive:
/// - add a payload type + variant here
/// - add a `DrawList::push_*` helper
/// - add a matching renderer under `render::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    TexturedQuad(TexturedQuadCmd),
    FlatTriangle(FlatTriangleCmd),
}

/// One textured quad draw.
///
/// The vertex stage computes `pos * scale` and samples at `uv - uv_offset`;
/// with a repeating sampler a horizontal offset scrolls the image without
/// moving the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedQuadCmd {
    pub texture: TextureId,
    pub uv_offset: Vec2,
    pub scale: f32,
    pub vertices: [TexturedVertex; QUAD_VERTEX_COUNT],
}

/// One flat-colored triangle draw, transformed by `projection * model`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTriangleCmd {
    pub vertices: [PosVertex; 3],
    pub model: Mat4,
    pub color: Color,
}
