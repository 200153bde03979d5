use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::draw::{DrawCmd, DrawList};
use crate::geometry::PosVertex;
use crate::render::{RenderCtx, RenderTarget};
use crate::shader;

use super::common::{begin_load_pass, ensure_vertex_capacity, premul_alpha_blend, triangle_list};

/// Flat-colored triangle renderer.
///
/// Each `DrawCmd::FlatTriangle` is one instance carrying its model matrix and
/// color. The projection is shared by the whole list and lives in a uniform.
#[derive(Default)]
pub struct FlatTriangleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    shader_failed: bool,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl FlatTriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders triangles contained in `draw_list` into `target` with `projection`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        projection: Mat4,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        let mut vertices: Vec<PosVertex> = Vec::new();
        let mut instances: Vec<TriangleInstance> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::FlatTriangle(cmd) = &item.cmd else { continue };
            vertices.extend_from_slice(&cmd.vertices);
            instances.push(TriangleInstance {
                model: cmd.model.to_cols_array_2d(),
                color: cmd.color.for_target(ctx.surface_format).to_array(),
            });
        }

        if instances.is_empty() {
            return;
        }

        self.vertex_capacity = ensure_vertex_capacity(
            ctx.device,
            &mut self.vertex_vbo,
            self.vertex_capacity,
            vertices.len(),
            std::mem::size_of::<PosVertex>(),
            "vista flat triangle vbo",
        );
        self.instance_capacity = ensure_vertex_capacity(
            ctx.device,
            &mut self.instance_vbo,
            self.instance_capacity,
            instances.len(),
            std::mem::size_of::<TriangleInstance>(),
            "vista flat triangle instance vbo",
        );

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(globals_ubo) = self.globals_ubo.as_ref() else { return };
        let Some(vertex_vbo) = self.vertex_vbo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        let globals = Globals {
            projection: projection.to_cols_array_2d(),
        };
        ctx.queue.write_buffer(globals_ubo, 0, bytemuck::bytes_of(&globals));
        ctx.queue.write_buffer(vertex_vbo, 0, bytemuck::cast_slice(&vertices));
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let mut rpass = begin_load_pass(target.encoder, target.color_view, "vista flat triangle pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vertex_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for i in 0..instances.len() as u32 {
            rpass.draw(i * 3..i * 3 + 3, i..i + 1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && (self.pipeline.is_some() || self.shader_failed)
        {
            return;
        }

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = None;
        self.bind_group = None;
        self.globals_ubo = None;

        let Some(shader) = shader::create_checked_module(
            ctx.device,
            "vista flat triangle shader",
            super::FLAT_TRIANGLE_WGSL,
        ) else {
            self.shader_failed = true;
            return;
        };

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("vista flat triangle bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<Globals>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("vista flat triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vista flat triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(shader::VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[PosVertex::layout(), TriangleInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(shader::FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: triangle_list(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.shader_failed = false;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.globals_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let globals_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vista flat triangle globals ubo"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista flat triangle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        self.globals_ubo = Some(globals_ubo);
        self.bind_group = Some(bind_group);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Globals {
    projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TriangleInstance {
    model: [[f32; 4]; 4], // column-major
    color: [f32; 4],
}

impl TriangleInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4, // model col 0
        2 => Float32x4, // model col 1
        3 => Float32x4, // model col 2
        4 => Float32x4, // model col 3
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TriangleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn instance_is_four_columns_then_color() {
        assert_eq!(std::mem::size_of::<TriangleInstance>(), 20 * 4);
        assert_eq!(std::mem::size_of::<Globals>(), 64);
        let offsets: Vec<u64> = TriangleInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 16, 32, 48, 64]);
    }
}
