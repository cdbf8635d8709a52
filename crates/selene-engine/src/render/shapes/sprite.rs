use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, SpriteCmd};
use crate::texture::{TextureId, TextureStore};

use super::common::{
    create_viewport_ubo, linear_sampler, quad_pipeline, texture_layout_entries,
    viewport_layout_entry, write_viewport, InstanceBuffer, UnitQuad,
};

/// Textured quad renderer.
///
/// Group 0 holds the viewport uniform; group 1 the texture and sampler. Bind
/// groups are cached per texture and dropped with [`SpriteRenderer::forget`]
/// when the texture is released.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    viewport_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    texture_groups: HashMap<TextureId, wgpu::BindGroup>,

    quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

/// Consecutive sprites sharing one texture.
struct Batch {
    texture: TextureId,
    range: std::ops::Range<u32>,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached bind group for a released texture.
    pub fn forget(&mut self, id: TextureId) {
        self.texture_groups.remove(&id);
    }

    /// Renders every sprite in `draw_list`, batching runs that share a texture.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        textures: &TextureStore,
    ) {
        let mut instances: Vec<SpriteInstance> = Vec::new();
        let mut batches: Vec<Batch> = Vec::new();

        for cmd in draw_list.sprites() {
            let Some((w, h)) = textures.size(cmd.texture) else {
                log::warn!("SpriteRenderer: unknown {:?}, skipping", cmd.texture);
                continue;
            };
            let index = instances.len() as u32;
            instances.push(SpriteInstance::from_cmd(cmd, w, h));
            match batches.last_mut() {
                Some(b) if b.texture == cmd.texture => b.range.end = index + 1,
                _ => batches.push(Batch { texture: cmd.texture, range: index..index + 1 }),
            }
        }

        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx, "selene sprite quad"));
        }
        for b in &batches {
            self.ensure_texture_group(ctx, textures, b.texture);
        }

        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        write_viewport(ctx, ubo);

        let Some(instance_vbo) = self.instances.upload(ctx, "selene sprite instances", &instances) else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport_group) = self.viewport_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };

        let mut rpass = target.load_pass("selene sprite pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_group, &[]);
        quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for b in batches {
            let Some(group) = self.texture_groups.get(&b.texture) else { continue };
            rpass.set_bind_group(1, group, &[]);
            rpass.draw_indexed(0..6, 0, b.range);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let viewport_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("selene sprite viewport bgl"),
            entries: &[viewport_layout_entry(0)],
        });
        let texture_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("selene sprite texture bgl"),
            entries: &texture_layout_entries(),
        });

        let pipeline = quad_pipeline(
            ctx,
            "selene sprite pipeline",
            include_str!("shaders/sprite.wgsl"),
            &[&viewport_layout, &texture_layout],
            SpriteInstance::layout(),
        );

        let ubo = create_viewport_ubo(ctx, "selene sprite viewport ubo");
        let viewport_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("selene sprite viewport group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_ubo = Some(ubo);
        self.viewport_group = Some(viewport_group);
        self.texture_layout = Some(texture_layout);
        self.sampler = Some(linear_sampler(ctx, "selene sprite sampler"));
        self.texture_groups.clear();
    }

    fn ensure_texture_group(&mut self, ctx: &RenderCtx<'_>, textures: &TextureStore, id: TextureId) {
        if self.texture_groups.contains_key(&id) {
            return;
        }
        let Some(texture) = textures.get(id) else { return };
        let Some(layout) = self.texture_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("selene sprite texture group"),
            layout,
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
        self.texture_groups.insert(id, group);
    }
}

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  tint     [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    tint: [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// A negative source width or height flips the sample direction.
    fn from_cmd(cmd: &SpriteCmd, tex_w: u32, tex_h: u32) -> Self {
        let (tw, th) = (tex_w.max(1) as f32, tex_h.max(1) as f32);
        let src = cmd.source;
        let dst = cmd.dest.normalized();
        Self {
            dst_min: [dst.origin.x, dst.origin.y],
            dst_max: [dst.origin.x + dst.size.x, dst.origin.y + dst.size.y],
            uv_min: [src.origin.x / tw, src.origin.y / th],
            uv_max: [(src.origin.x + src.size.x) / tw, (src.origin.y + src.size.y) / th],
            tint: cmd.tint.to_linear_premul(),
        }
    }
}
