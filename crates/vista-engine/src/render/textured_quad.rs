use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::assets::{TextureId, TextureStore};
use crate::draw::{DrawCmd, DrawList};
use crate::geometry::{TexturedVertex, QUAD_VERTEX_COUNT};
use crate::render::{RenderCtx, RenderTarget};
use crate::shader;

use super::common::{begin_load_pass, ensure_vertex_capacity, straight_alpha_blend, triangle_list};

/// Textured quad renderer.
///
/// Every `DrawCmd::TexturedQuad` becomes one instance: its six vertices go to
/// a shared vertex buffer, its `{ uv_offset, scale }` to the instance buffer.
/// Textures are sampled with a repeating linear sampler, so a UV offset
/// scrolls the image across a quad that never moves.
///
/// Commands whose texture does not resolve in the [`TextureStore`] are skipped.
#[derive(Default)]
pub struct TexturedQuadRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    /// Set when the shader failed validation; nothing is drawn afterwards.
    shader_failed: bool,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    bind_groups: HashMap<TextureId, wgpu::BindGroup>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    warned_missing_texture: bool,
}

impl TexturedQuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders textured quads contained in `draw_list` into `target`, in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        textures: &TextureStore,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);

        let mut vertices: Vec<TexturedVertex> = Vec::new();
        let mut instances: Vec<QuadInstance> = Vec::new();
        let mut draws: Vec<TextureId> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::TexturedQuad(cmd) = &item.cmd else { continue };
            if textures.get(cmd.texture).is_none() {
                if !self.warned_missing_texture {
                    log::debug!(
                        "TexturedQuadRenderer: texture {:?} not loaded; quad skipped",
                        cmd.texture
                    );
                    self.warned_missing_texture = true;
                }
                continue;
            }
            vertices.extend_from_slice(&cmd.vertices);
            instances.push(QuadInstance {
                offset: cmd.uv_offset.to_array(),
                scale: cmd.scale,
                _pad: 0.0,
            });
            draws.push(cmd.texture);
        }

        if draws.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        for &id in &draws {
            self.ensure_bind_group(ctx, textures, id);
        }
        self.vertex_capacity = ensure_vertex_capacity(
            ctx.device,
            &mut self.vertex_vbo,
            self.vertex_capacity,
            vertices.len(),
            std::mem::size_of::<TexturedVertex>(),
            "vista textured quad vbo",
        );
        self.instance_capacity = ensure_vertex_capacity(
            ctx.device,
            &mut self.instance_vbo,
            self.instance_capacity,
            instances.len(),
            std::mem::size_of::<QuadInstance>(),
            "vista textured quad instance vbo",
        );

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(vertex_vbo) = self.vertex_vbo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        ctx.queue.write_buffer(vertex_vbo, 0, bytemuck::cast_slice(&vertices));
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let mut rpass = begin_load_pass(target.encoder, target.color_view, "vista textured quad pass");
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vertex_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for (i, id) in draws.iter().enumerate() {
            let Some(bind_group) = self.bind_groups.get(id) else { continue };
            let first = (i * QUAD_VERTEX_COUNT) as u32;
            let instance = i as u32;
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw(first..first + QUAD_VERTEX_COUNT as u32, instance..instance + 1);
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
        self.bind_groups.clear();

        let Some(shader) = shader::create_checked_module(
            ctx.device,
            "vista textured quad shader",
            super::TEXTURED_QUAD_WGSL,
        ) else {
            self.shader_failed = true;
            return;
        };

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("vista textured quad bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("vista textured quad pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vista textured quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(shader::VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[TexturedVertex::layout(), QuadInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(shader::FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(straight_alpha_blend()),
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

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vista textured quad sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        }));
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>, textures: &TextureStore, id: TextureId) {
        if self.bind_groups.contains_key(&id) {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };
        let Some(texture) = textures.get(id) else { return };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista textured quad bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        self.bind_groups.insert(id, bind_group);
    }
}

/// Per-draw parameters: `pos * scale`, `uv - offset`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    offset: [f32; 2],
    scale: f32,
    _pad: f32,
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        2 => Float32x2, // offset
        3 => Float32    // scale
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
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
    fn instance_attributes_follow_vertex_attributes() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 16);
        let locations: Vec<u32> = QuadInstance::ATTRS.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![2, 3]);
        assert_eq!(QuadInstance::ATTRS[1].offset, 8);
    }
}
