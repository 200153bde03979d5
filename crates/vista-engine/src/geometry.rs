//! Primitive builders.
//!
//! Pure functions from explicit coordinates to vertex arrays in the two
//! layouts the renderers consume:
//! - [`PosVertex`]: 3 floats, position only (flat-color primitives)
//! - [`TexturedVertex`]: 5 floats, position + UV (textured quads)

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};

/// Position-only vertex (stride: 3 floats).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PosVertex {
    pub pos: [f32; 3],
}

impl PosVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: [x, y, z] }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PosVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Interleaved position + texture-coordinate vertex (stride: 5 floats).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { pos: [x, y, 0.0], uv: [u, v] }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Three explicit vertices on the `z = 0` plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [PosVertex; 3],
}

impl Triangle {
    pub const fn new(v0: (f32, f32), v1: (f32, f32), v2: (f32, f32)) -> Self {
        Self {
            vertices: [
                PosVertex::new(v0.0, v0.1, 0.0),
                PosVertex::new(v1.0, v1.1, 0.0),
                PosVertex::new(v2.0, v2.1, 0.0),
            ],
        }
    }

    /// Unit triangle centered on the origin, apex up.
    pub const fn unit() -> Self {
        Self::new((-0.5, -0.5), (0.5, -0.5), (0.0, 0.5))
    }
}

/// Vertices per quad (two triangles, no index buffer).
pub const QUAD_VERTEX_COUNT: usize = 6;

/// Two triangles covering `bounds`, with UV `[0,1]²` (v = 1 at the top edge).
///
/// `bounds` is in a +Y-up space (NDC): `max().y` is the top edge.
pub fn textured_quad(bounds: Rect) -> [TexturedVertex; QUAD_VERTEX_COUNT] {
    let Vec2 { x: left, y: bottom } = bounds.min();
    let Vec2 { x: right, y: top } = bounds.max();

    [
        TexturedVertex::new(left, top, 0.0, 1.0),
        TexturedVertex::new(left, bottom, 0.0, 0.0),
        TexturedVertex::new(right, bottom, 1.0, 0.0),
        TexturedVertex::new(left, top, 0.0, 1.0),
        TexturedVertex::new(right, bottom, 1.0, 0.0),
        TexturedVertex::new(right, top, 1.0, 1.0),
    ]
}

/// Quad covering the whole of NDC `[-1, 1]²`.
pub fn fullscreen_quad() -> [TexturedVertex; QUAD_VERTEX_COUNT] {
    textured_quad(Rect::new(-1.0, -1.0, 2.0, 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_strides_match_float_counts() {
        assert_eq!(std::mem::size_of::<PosVertex>(), 3 * 4);
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 5 * 4);
    }

    #[test]
    fn triangle_keeps_explicit_coordinates() {
        let t = Triangle::new((-0.65, 0.33), (-0.27, 0.53), (-0.61, 0.79));
        assert_eq!(t.vertices[0].pos, [-0.65, 0.33, 0.0]);
        assert_eq!(t.vertices[1].pos, [-0.27, 0.53, 0.0]);
        assert_eq!(t.vertices[2].pos, [-0.61, 0.79, 0.0]);
    }

    #[test]
    fn fullscreen_quad_spans_ndc_with_unit_uvs() {
        let q = fullscreen_quad();
        assert_eq!(q[0], TexturedVertex::new(-1.0, 1.0, 0.0, 1.0));
        assert_eq!(q[2], TexturedVertex::new(1.0, -1.0, 1.0, 0.0));
        assert_eq!(q[5], TexturedVertex::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn quad_corners_follow_bounds() {
        let q = textured_quad(Rect::new(0.0, 0.0, 2.0, 1.0));
        let xs: Vec<f32> = q.iter().map(|v| v.pos[0]).collect();
        let ys: Vec<f32> = q.iter().map(|v| v.pos[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
    }
}
