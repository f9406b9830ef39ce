use super::helpers::{self, HDR_FORMAT};
use super::targets::RenderTargets;
use crate::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    strength: f32,
    threshold: f32,
    radius: f32,
    _pad: f32,
}

impl PostUniforms {
    fn for_pass(resolution: [u32; 2], blur_dir: [f32; 2]) -> Self {
        Self {
            resolution: [resolution[0] as f32, resolution[1] as f32],
            blur_dir,
            strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            radius: BLOOM_RADIUS,
            _pad: 0.0,
        }
    }
}

/// Bloom chain: bright pass, separable blur, composite onto the swapchain.
///
/// Every pass owns its uniform buffer; all passes are recorded into one
/// encoder, so a shared buffer would only ever hold the last write.
pub(crate) struct PostResources {
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    bg_bright: wgpu::BindGroup,   // hdr -> bloom_a
    bg_blur_h: wgpu::BindGroup,   // bloom_a -> bloom_b
    bg_blur_v: wgpu::BindGroup,   // bloom_b -> bloom_a
    bg_composite: wgpu::BindGroup, // hdr + group1
    bg_bloom: wgpu::BindGroup,    // group1 for composite, sampling bloom_a
    _uniforms: [wgpu::Buffer; 4],
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        swap_format: wgpu::TextureFormat,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let [tex, samp] = helpers::texture_layout_entries(0);
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                tex,
                samp,
                helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &helpers::texture_layout_entries(0),
        });
        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline =
            helpers::make_post_pipeline(device, &pl_single, &shader, "fs_bright", HDR_FORMAT, None);
        let blur_pipeline =
            helpers::make_post_pipeline(device, &pl_single, &shader, "fs_blur", HDR_FORMAT, None);
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            &pl_composite,
            &shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );

        let bloom = targets.bloom_size;
        let make_uniform = |label: &str, u: PostUniforms| {
            let buf = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PostUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            queue.write_buffer(&buf, 0, bytemuck::bytes_of(&u));
            buf
        };
        let u_bright = make_uniform("post_u_bright", PostUniforms::for_pass(bloom, [0.0, 0.0]));
        let u_blur_h = make_uniform("post_u_blur_h", PostUniforms::for_pass(bloom, [1.0, 0.0]));
        let u_blur_v = make_uniform("post_u_blur_v", PostUniforms::for_pass(bloom, [0.0, 1.0]));
        let u_comp = make_uniform("post_u_composite", PostUniforms::for_pass(bloom, [0.0, 0.0]));

        let source_group = |label: &str, view: &wgpu::TextureView, uniforms: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniforms.as_entire_binding(),
                    },
                ],
            })
        };
        let bg_bright = source_group("bg_bright", &targets.hdr_view, &u_bright);
        let bg_blur_h = source_group("bg_blur_h", &targets.bloom_a_view, &u_blur_h);
        let bg_blur_v = source_group("bg_blur_v", &targets.bloom_b_view, &u_blur_v);
        let bg_composite = source_group("bg_composite", &targets.hdr_view, &u_comp);
        let bg_bloom = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom"),
            layout: &bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            bg_bright,
            bg_blur_h,
            bg_blur_v,
            bg_composite,
            bg_bloom,
            _uniforms: [u_bright, u_blur_h, u_blur_v, u_comp],
        }
    }

    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        swap_view: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        blit(
            encoder,
            "bright_pass",
            &targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.bright_pipeline,
            &self.bg_bright,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.blur_pipeline,
            &self.bg_blur_h,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.blur_pipeline,
            &self.bg_blur_v,
            None,
        );
        blit(
            encoder,
            "composite",
            swap_view,
            clear,
            &self.composite_pipeline,
            &self.bg_composite,
            Some(&self.bg_bloom),
        );
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
